// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Authentication Module
//!
//! JWT authentication and authorization pipeline for the Recrutec API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in with email + password
//! 2. Server issues an access/refresh token pair (HS256, shared secret)
//! 3. Client sends `Authorization: Bearer <access token>` on each request
//! 4. Middleware validates the token and attaches an [`Identity`]
//!    (subject + roles) to the request, or leaves it unauthenticated
//! 5. Each protected handler runs a declarative role gate against that
//!    identity; the gate is the only place requests are rejected for auth
//!
//! ## Security
//!
//! - Signing key is immutable process-wide configuration, minimum 256 bits
//! - Expiry checks use zero leeway
//! - Malformed and bad-signature tokens are indistinguishable to clients
//! - Refresh tokens carry no roles; roles are re-resolved at refresh time

pub mod claims;
pub mod codec;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod middleware;
pub mod roles;
pub mod validator;

pub use claims::{Identity, TokenClaims, TokenType};
pub use codec::{TokenCodec, TokenError, WeakKeyError};
pub use error::AuthError;
pub use issuer::TokenIssuer;
pub use middleware::{authenticate_request, CurrentIdentity};
pub use roles::Role;
pub use validator::TokenValidator;
