//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`fingerprint::ClientFingerprint`] -- Derives the anonymous visitor fingerprint.

pub mod auth;
pub mod fingerprint;
pub mod rbac;
