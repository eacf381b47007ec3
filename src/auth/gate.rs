// SPDX-License-Identifier: AGPL-3.0-or-later

//! Authorization gate.
//!
//! Declarative per-operation role check, evaluated against the
//! request-scoped [`Identity`] the middleware may have attached. The
//! allow-set is fixed at each call site. This is the second stage of the
//! auth pipeline and the only place a request is actually rejected for
//! auth reasons.

use super::claims::Identity;
use super::error::AuthError;
use super::roles::Role;

/// Permit the operation iff an identity is present and holds one of the
/// allowed roles.
///
/// Returns the identity on success so handlers can read the subject
/// without re-extracting it.
pub fn authorize<'a>(
    identity: Option<&'a Identity>,
    allowed: &[Role],
) -> Result<&'a Identity, AuthError> {
    let identity = identity.ok_or(AuthError::Unauthenticated)?;
    if identity.has_any_role(allowed) {
        Ok(identity)
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Role check composed with an ownership rule: permit if the role check
/// passes OR the identity's subject is the resource owner.
pub fn authorize_owner<'a>(
    identity: Option<&'a Identity>,
    allowed: &[Role],
    owner_subject: &str,
) -> Result<&'a Identity, AuthError> {
    let identity = identity.ok_or(AuthError::Unauthenticated)?;
    if identity.has_any_role(allowed) || identity.subject == owner_subject {
        Ok(identity)
    } else {
        Err(AuthError::Forbidden)
    }
}
