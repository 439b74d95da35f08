#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tyrantcam_api::auth::jwt::{generate_access_token, JwtConfig};
use tyrantcam_api::auth::password::hash_password;
use tyrantcam_api::config::ServerConfig;
use tyrantcam_api::router::build_app_router;
use tyrantcam_api::state::AppState;
use tyrantcam_core::roles::ROLE_ADMIN;
use tyrantcam_core::types::DbId;
use tyrantcam_db::models::admin::CreateAdmin;
use tyrantcam_db::repositories::AdminRepo;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";
pub const TEST_SALT: &str = "integration-test-fingerprint-salt";
pub const ADMIN_EMAIL: &str = "admin@tyrantcam.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";

/// Reverse proxy listed in `trusted_proxies` of [`test_config`].
pub const PROXY_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

/// Test configuration with a fixed JWT secret and fingerprint salt.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        fingerprint_salt: TEST_SALT.to_string(),
        trusted_proxies: vec![PROXY_IP],
        vote_window_hours: 24,
        admin_seed: None,
    }
}

/// Build the production router against the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an admin with [`ADMIN_PASSWORD`] and return its id.
pub async fn create_admin(pool: &PgPool, email: &str) -> DbId {
    let password_hash = hash_password(ADMIN_PASSWORD).expect("hashing should succeed");
    AdminRepo::create(
        pool,
        &CreateAdmin {
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .expect("admin creation should succeed")
    .id
}

/// Insert an admin and mint a bearer token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let id = create_admin(pool, ADMIN_EMAIL).await;
    generate_access_token(id, ROLE_ADMIN, &test_config().jwt).expect("token should encode")
}

/// A published tyrant body accepted by `POST /admin/tyrants`.
pub fn tyrant_body(name: &str, category: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "title": "Commissioner",
        "position": "County Commissioner",
        "category": category,
        "description": "Voted to sell the public park to his brother-in-law.",
        "evidence_urls": ["https://news.example.org/park-sale"],
        "is_published": true,
    })
}

/// Create a tyrant through the admin API and return its id.
pub async fn create_tyrant(app: Router, token: &str, body: serde_json::Value) -> DbId {
    let response = post_json_auth(app, "/api/v1/admin/tyrants", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("tyrant id should be a number")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn json_request(
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// Socket peer of a connection arriving from `ip`.
pub fn peer(ip: IpAddr) -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::new(ip, 40_000))
}

/// GET as an anonymous visitor behind the trusted proxy reporting `client_ip`.
pub async fn get_from(app: Router, uri: &str, client_ip: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .extension(peer(PROXY_IP))
        .header("x-forwarded-for", client_ip)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// POST with an empty body as an anonymous visitor at `client_ip`, relayed
/// by the trusted proxy.
pub async fn post_from(app: Router, uri: &str, client_ip: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .extension(peer(PROXY_IP))
        .header("x-forwarded-for", client_ip)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
