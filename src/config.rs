// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. Anything
//! missing or invalid is a fatal startup error - never a per-request error.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HMAC signing key, at least 32 bytes | Required |
//! | `JWT_ACCESS_TTL_MS` | Access-token lifetime in milliseconds | `3600000` (1h) |
//! | `JWT_REFRESH_TTL_MS` | Refresh-token lifetime in milliseconds | `86400000` (24h) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use thiserror::Error;

use crate::auth::codec::MIN_KEY_BYTES;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const ACCESS_TTL_ENV: &str = "JWT_ACCESS_TTL_MS";
pub const REFRESH_TTL_ENV: &str = "JWT_REFRESH_TTL_MS";

const DEFAULT_ACCESS_TTL_MS: i64 = 3_600_000;
const DEFAULT_REFRESH_TTL_MS: i64 = 86_400_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{JWT_SECRET_ENV} is not set")]
    MissingSecret,
    #[error("{JWT_SECRET_ENV} must be at least {MIN_KEY_BYTES} bytes, got {0}")]
    WeakSecret(usize),
    #[error("{0} must be a positive number of milliseconds, got {1:?}")]
    InvalidLifetime(&'static str, String),
}

/// Immutable service settings, established once at process startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub jwt_secret: String,
    pub access_ttl_ms: i64,
    pub refresh_ttl_ms: i64,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Load settings from the environment, failing fast on anything
    /// missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret)?;
        if jwt_secret.len() < MIN_KEY_BYTES {
            return Err(ConfigError::WeakSecret(jwt_secret.len()));
        }

        Ok(Self {
            jwt_secret,
            access_ttl_ms: lifetime_from_env(ACCESS_TTL_ENV, DEFAULT_ACCESS_TTL_MS)?,
            refresh_ttl_ms: lifetime_from_env(REFRESH_TTL_ENV, DEFAULT_REFRESH_TTL_MS)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

fn lifetime_from_env(var: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.parse::<i64>() {
            Ok(ms) if ms > 0 => Ok(ms),
            _ => Err(ConfigError::InvalidLifetime(var, raw)),
        },
    }
}
