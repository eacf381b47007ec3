// SPDX-License-Identifier: AGPL-3.0-or-later

//! Token issuance.
//!
//! Produces access/refresh token pairs bound to the lifetimes fixed at
//! startup. Access tokens embed the subject's roles; refresh tokens
//! deliberately do not - roles are re-resolved from the user store when the
//! refresh is redeemed, so a role change takes effect at the next refresh
//! rather than riding along in a long-lived token.

use std::sync::Arc;

use chrono::Utc;

use super::claims::{TokenClaims, TokenType};
use super::codec::{TokenCodec, TokenError};
use super::roles::Role;

/// Issues signed access and refresh tokens.
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    access_ttl_ms: i64,
    refresh_ttl_ms: i64,
}

impl TokenIssuer {
    pub fn new(codec: Arc<TokenCodec>, access_ttl_ms: i64, refresh_ttl_ms: i64) -> Self {
        Self {
            codec,
            access_ttl_ms,
            refresh_ttl_ms,
        }
    }

    /// Issue an access token carrying the subject's roles.
    pub fn issue_access_token(&self, subject: &str, roles: &[Role]) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        self.codec.encode(&TokenClaims {
            sub: subject.to_string(),
            roles: Some(Role::join(roles)),
            token_type: TokenType::Access,
            iat: now,
            exp: now + self.access_ttl_ms / 1000,
        })
    }

    /// Issue a refresh token. Carries no roles claim.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        self.codec.encode(&TokenClaims {
            sub: subject.to_string(),
            roles: None,
            token_type: TokenType::Refresh,
            iat: now,
            exp: now + self.refresh_ttl_ms / 1000,
        })
    }

    /// Access-token lifetime in seconds, reported to clients as `expires_in`.
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_ttl_ms / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn issuer() -> TokenIssuer {
        let codec = Arc::new(TokenCodec::new(TEST_SECRET).unwrap());
        TokenIssuer::new(codec, 3_600_000, 86_400_000)
    }

    #[test]
    fn access_token_carries_roles_and_type() {
        let issuer = issuer();
        let token = issuer
            .issue_access_token("joao@email.com", &[Role::Candidato])
            .unwrap();

        let claims = issuer.codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "joao@email.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.parsed_roles(), vec![Role::Candidato]);
    }

    #[test]
    fn refresh_token_has_no_roles_claim() {
        let issuer = issuer();
        let token = issuer.issue_refresh_token("joao@email.com").unwrap();

        let claims = issuer.codec.decode(&token).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert!(claims.roles.is_none());
    }

    #[test]
    fn expiries_follow_configured_lifetimes() {
        let issuer = issuer();
        let now = Utc::now().timestamp();

        let access = issuer
            .issue_access_token("joao@email.com", &[Role::Candidato])
            .unwrap();
        let refresh = issuer.issue_refresh_token("joao@email.com").unwrap();

        let access_claims = issuer.codec.decode(&access).unwrap();
        let refresh_claims = issuer.codec.decode(&refresh).unwrap();

        // Allow a couple of seconds for test execution.
        assert!((access_claims.exp - now - 3600).abs() <= 2);
        assert!((refresh_claims.exp - now - 86_400).abs() <= 2);
        assert_eq!(issuer.access_token_expiry_secs(), 3600);
    }
}
