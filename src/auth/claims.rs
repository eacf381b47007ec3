// SPDX-License-Identifier: AGPL-3.0-or-later

//! JWT claims and the request-scoped identity derived from them.

use serde::{Deserialize, Serialize};

use super::roles::Role;

/// Discriminates access tokens from refresh tokens.
///
/// Stored in the `type` claim. A refresh token authenticates nothing except
/// the refresh endpoint; an access token is what protected routes accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by a signed token.
///
/// The roles claim is comma-joined (`"ADMIN,RECRUTADOR"`) for wire
/// compatibility with previously issued tokens. Refresh tokens carry no
/// roles claim at all; roles are re-resolved from the user store at refresh
/// time instead of being trusted from the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - the user's email
    pub sub: String,

    /// Comma-joined role tags; absent on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,

    /// Token type discriminator
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Typed view of the roles claim. Empty for refresh tokens.
    pub fn parsed_roles(&self) -> Vec<Role> {
        self.roles
            .as_deref()
            .map(Role::parse_list)
            .unwrap_or_default()
    }
}

/// Request-scoped authenticated identity.
///
/// Reconstructed fresh on every request from a validated access token and
/// never persisted server-side. Immutable once built; downstream code only
/// reads it through the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated subject (email)
    pub subject: String,
    /// Roles the subject held when the token was issued
    pub roles: Vec<Role>,
}

impl Identity {
    /// Build an identity from decoded access-token claims.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            subject: claims.sub.clone(),
            roles: claims.parsed_roles(),
        }
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.roles.iter().any(|role| allowed.contains(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access_claims(roles: Option<&str>) -> TokenClaims {
        TokenClaims {
            sub: "joao@email.com".to_string(),
            roles: roles.map(str::to_string),
            token_type: TokenType::Access,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        }
    }

    #[test]
    fn token_type_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TokenType::Access).unwrap(),
            r#""ACCESS""#
        );
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            r#""REFRESH""#
        );
    }

    #[test]
    fn roles_claim_is_omitted_when_absent() {
        let json = serde_json::to_value(access_claims(None)).unwrap();
        assert!(json.get("roles").is_none());
        assert_eq!(json["type"], "ACCESS");
    }

    #[test]
    fn identity_parses_comma_joined_roles() {
        let claims = access_claims(Some("CANDIDATO,RECRUTADOR"));
        let identity = Identity::from_claims(&claims);
        assert_eq!(identity.subject, "joao@email.com");
        assert_eq!(identity.roles, vec![Role::Candidato, Role::Recrutador]);
    }

    #[test]
    fn identity_without_roles_authorizes_nothing() {
        let identity = Identity::from_claims(&access_claims(None));
        assert!(identity.roles.is_empty());
        assert!(!identity.has_any_role(&[Role::Admin, Role::Candidato]));
    }

    #[test]
    fn has_any_role_matches_intersection() {
        let identity = Identity::from_claims(&access_claims(Some("CANDIDATO")));
        assert!(identity.has_any_role(&[Role::Admin, Role::Candidato]));
        assert!(!identity.has_any_role(&[Role::Admin]));
    }
}
