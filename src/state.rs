// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{TokenCodec, TokenIssuer, TokenValidator, WeakKeyError};
use crate::config::Settings;
use crate::store::UserStore;

/// Shared application state.
///
/// The signing key lives inside the codec shared by issuer and validator;
/// it is established once at startup and never mutated. The user store is
/// the only mutable piece and models the external relational store.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<UserStore>>,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(secret: &[u8], access_ttl_ms: i64, refresh_ttl_ms: i64) -> Result<Self, WeakKeyError> {
        let codec = Arc::new(TokenCodec::new(secret)?);
        Ok(Self {
            users: Arc::new(RwLock::new(UserStore::new())),
            issuer: Arc::new(TokenIssuer::new(codec.clone(), access_ttl_ms, refresh_ttl_ms)),
            validator: Arc::new(TokenValidator::new(codec)),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, WeakKeyError> {
        Self::new(
            settings.jwt_secret.as_bytes(),
            settings.access_ttl_ms,
            settings.refresh_ttl_ms,
        )
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Test state with a fixed signing key and the default lifetimes.
    fn default() -> Self {
        Self::new(b"test-secret-test-secret-test-secret!", 3_600_000, 86_400_000)
            .expect("test key is long enough")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_key_is_fatal_at_construction() {
        assert!(AppState::new(b"short", 3_600_000, 86_400_000).is_err());
    }

    #[test]
    fn issuer_and_validator_share_the_signing_key() {
        let state = AppState::default();
        let token = state
            .issuer
            .issue_access_token("joao@email.com", &[crate::auth::Role::Candidato])
            .unwrap();
        assert!(state.validator.validate(&token));
    }
}
