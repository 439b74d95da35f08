//! Anonymous visitor fingerprint extractor.
//!
//! The client address is the socket peer. When the peer is a configured
//! trusted proxy, the first `X-Forwarded-For` hop (then `X-Real-IP`) is used
//! instead. The address is salted and hashed before it leaves this module;
//! handlers never see it.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tyrantcam_core::fingerprint::derive_fingerprint;

use crate::error::AppError;
use crate::state::AppState;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// 64-character lowercase hex fingerprint of the calling visitor.
#[derive(Debug, Clone)]
pub struct ClientFingerprint(pub String);

impl FromRequestParts<AppState> for ClientFingerprint {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        let address = resolve_address(peer, &parts.headers, &state.config.trusted_proxies)
            .ok_or_else(|| AppError::BadRequest("Unable to determine client address".into()))?;

        Ok(ClientFingerprint(derive_fingerprint(
            &address,
            &state.config.fingerprint_salt,
        )))
    }
}

/// Visitor address for the given socket peer.
///
/// Proxy headers are only read when `peer` is in `trusted_proxies`.
fn resolve_address(
    peer: Option<IpAddr>,
    headers: &HeaderMap,
    trusted_proxies: &[IpAddr],
) -> Option<String> {
    let peer = peer?;
    if trusted_proxies.contains(&peer) {
        if let Some(forwarded) = forwarded_address(headers) {
            return Some(forwarded);
        }
    }
    Some(peer.to_string())
}

/// Client address as reported by a reverse proxy, if any.
fn forwarded_address(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let forwarded = header(X_FORWARDED_FOR).and_then(|value| {
        value
            .split(',')
            .next()
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .map(str::to_string)
    });

    forwarded.or_else(|| {
        header(X_REAL_IP)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}
