use std::net::IpAddr;

use tyrantcam_core::fingerprint::{resolve_window_hours, DEFAULT_VOTE_WINDOW_HOURS};

use crate::auth::jwt::JwtConfig;

/// Credentials for the first admin account, created on startup when the
/// `admins` table is empty.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Server-side secret mixed into every visitor fingerprint.
    pub fingerprint_salt: String,
    /// Reverse proxies whose `X-Forwarded-For` / `X-Real-IP` headers are
    /// believed. Empty means the socket peer is always the visitor.
    pub trusted_proxies: Vec<IpAddr>,
    /// Default look-back for the vote-status endpoint.
    pub vote_window_hours: i32,
    /// Optional initial admin.
    pub admin_seed: Option<AdminSeed>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `FINGERPRINT_SALT`     | required                   |
    /// | `TRUSTED_PROXIES`      | empty                      |
    /// | `VOTE_WINDOW_HOURS`    | `24`                       |
    /// | `ADMIN_EMAIL`          | unset                      |
    /// | `ADMIN_PASSWORD`       | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on malformed values or a missing `FINGERPRINT_SALT`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let fingerprint_salt = std::env::var("FINGERPRINT_SALT")
            .expect("FINGERPRINT_SALT must be set in the environment");
        assert!(
            !fingerprint_salt.is_empty(),
            "FINGERPRINT_SALT must not be empty"
        );

        let trusted_proxies: Vec<IpAddr> = std::env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse()
                    .unwrap_or_else(|_| panic!("TRUSTED_PROXIES entry {s:?} is not an IP address"))
            })
            .collect();

        let vote_window_hours: i32 = std::env::var("VOTE_WINDOW_HOURS")
            .unwrap_or_else(|_| DEFAULT_VOTE_WINDOW_HOURS.to_string())
            .parse()
            .expect("VOTE_WINDOW_HOURS must be a valid i32");
        let vote_window_hours = resolve_window_hours(Some(vote_window_hours))
            .unwrap_or_else(|e| panic!("VOTE_WINDOW_HOURS out of range: {e}"));

        let admin_seed = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            fingerprint_salt,
            trusted_proxies,
            vote_window_hours,
            admin_seed,
        }
    }
}
