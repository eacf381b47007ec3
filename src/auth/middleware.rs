// SPDX-License-Identifier: AGPL-3.0-or-later

//! Request authentication middleware.
//!
//! First stage of the auth pipeline: turn one inbound request into an
//! attached [`Identity`], or leave it unauthenticated. This stage has no
//! error channel at all - a missing header, an invalid token, a refresh
//! token where an access token belongs, all just mean "no identity" and the
//! request proceeds so public endpoints keep working. Rejection happens
//! later, at the authorization gate.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::claims::{Identity, TokenType};
use super::validator::TokenValidator;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Derive an identity from a raw `Authorization` header value.
///
/// Returns `None` unless the header carries a bearer token that validates
/// and is an access token. Refresh tokens authenticate nothing here even
/// when they validate.
pub fn identity_from_bearer(validator: &TokenValidator, header: Option<&str>) -> Option<Identity> {
    let token = header?.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        return None;
    }

    match validator.decode(token) {
        Ok(claims) if claims.token_type == TokenType::Access => Some(Identity::from_claims(&claims)),
        Ok(_) => {
            debug!("bearer token is not an access token, request stays unauthenticated");
            None
        }
        Err(e) => {
            debug!(error = %e, "rejecting bearer token, request stays unauthenticated");
            None
        }
    }
}

/// Axum middleware that attaches the request-scoped identity.
///
/// Runs once before route dispatch. Never produces an error response
/// itself; it only populates or withholds the identity extension.
pub async fn authenticate_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if let Some(identity) = identity_from_bearer(&state.validator, header.as_deref()) {
        debug!(subject = %identity.subject, "request authenticated");
        request.extensions_mut().insert(identity);
    }

    next.run(request).await
}

/// Extractor for the identity the middleware may have attached.
///
/// Infallible by design: handlers receive `None` for unauthenticated
/// requests and pass it to the gate, which decides 401 vs 403.
pub struct CurrentIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentIdentity(parts.extensions.get::<Identity>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::Role;
    use crate::state::AppState;
    use axum::http::Request as HttpRequest;

    fn state() -> AppState {
        AppState::default()
    }

    #[test]
    fn missing_header_yields_no_identity() {
        let state = state();
        assert_eq!(identity_from_bearer(&state.validator, None), None);
    }

    #[test]
    fn non_bearer_header_yields_no_identity() {
        let state = state();
        assert_eq!(
            identity_from_bearer(&state.validator, Some("Basic am9hbzpzZWNyZXQ=")),
            None
        );
        assert_eq!(identity_from_bearer(&state.validator, Some("Bearer ")), None);
    }

    #[test]
    fn invalid_token_yields_no_identity() {
        let state = state();
        assert_eq!(
            identity_from_bearer(&state.validator, Some("Bearer not-a-token")),
            None
        );
    }

    #[test]
    fn valid_access_token_yields_identity() {
        let state = state();
        let token = state
            .issuer
            .issue_access_token("joao@email.com", &[Role::Candidato])
            .unwrap();

        let identity =
            identity_from_bearer(&state.validator, Some(&format!("Bearer {token}"))).unwrap();
        assert_eq!(identity.subject, "joao@email.com");
        assert_eq!(identity.roles, vec![Role::Candidato]);
    }

    #[test]
    fn valid_refresh_token_yields_no_identity() {
        let state = state();
        let refresh = state.issuer.issue_refresh_token("joao@email.com").unwrap();

        // The token itself validates, but it must not authenticate a
        // protected request.
        assert!(state.validator.validate(&refresh));
        assert_eq!(
            identity_from_bearer(&state.validator, Some(&format!("Bearer {refresh}"))),
            None
        );
    }

    #[tokio::test]
    async fn extractor_reads_extension_when_present() {
        let mut parts = HttpRequest::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let CurrentIdentity(absent) = CurrentIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(absent.is_none());

        parts.extensions.insert(Identity {
            subject: "joao@email.com".to_string(),
            roles: vec![Role::Candidato],
        });
        let CurrentIdentity(present) = CurrentIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(present.unwrap().subject, "joao@email.com");
    }
}
