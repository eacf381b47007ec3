// SPDX-License-Identifier: AGPL-3.0-or-later

//! Token validation queries.
//!
//! Wraps the codec in yes/no questions so callers never handle decode
//! errors directly. `validate` and the classifiers swallow every failure
//! into `false`; only the extraction methods surface a [`TokenError`], and
//! callers are expected to validate before extracting.

use std::sync::Arc;

use chrono::Utc;

use super::claims::{TokenClaims, TokenType};
use super::codec::{TokenCodec, TokenError};

/// Answers validity and classification questions about tokens.
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// True iff signature, structure and expiry all check out.
    pub fn validate(&self, token: &str) -> bool {
        self.codec.decode(token).is_ok()
    }

    /// True iff the token decodes and its `type` claim is ACCESS.
    pub fn is_access_token(&self, token: &str) -> bool {
        matches!(
            self.codec.decode(token),
            Ok(TokenClaims {
                token_type: TokenType::Access,
                ..
            })
        )
    }

    /// True iff the token decodes and its `type` claim is REFRESH.
    pub fn is_refresh_token(&self, token: &str) -> bool {
        matches!(
            self.codec.decode(token),
            Ok(TokenClaims {
                token_type: TokenType::Refresh,
                ..
            })
        )
    }

    /// True if the token is past its expiry.
    ///
    /// Fail-safe: any decode failure reports the token as expired, since an
    /// undecodable token must never be treated as live.
    pub fn is_expired(&self, token: &str) -> bool {
        match self.codec.decode(token) {
            Ok(claims) => claims.exp <= Utc::now().timestamp(),
            Err(_) => true,
        }
    }

    /// Extract the subject. Callers must validate first.
    pub fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        self.codec.decode(token).map(|claims| claims.sub)
    }

    /// Extract the raw comma-joined roles claim, `None` when absent
    /// (refresh tokens). Callers must validate first.
    pub fn roles_of(&self, token: &str) -> Result<Option<String>, TokenError> {
        self.codec.decode(token).map(|claims| claims.roles)
    }

    /// Full decode, for callers that need every claim at once.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.codec.decode(token)
    }
}
