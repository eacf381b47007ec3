// SPDX-License-Identifier: AGPL-3.0-or-later

//! Signed token codec.
//!
//! A pure encode/decode pair over [`TokenClaims`]: no clocks beyond the
//! expiry check, no I/O, no shared mutable state. The signing key is
//! symmetric (HMAC-SHA256) and fixed at construction; every validation is a
//! stateless recomputation from the token bytes plus that key.

use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use super::claims::TokenClaims;

/// Minimum signing key length in bytes (256-bit floor for HMAC-SHA256).
pub const MIN_KEY_BYTES: usize = 32;

/// Decode failure taxonomy.
///
/// Callers at the HTTP boundary must treat `Malformed` and
/// `InvalidSignature` identically so responses leak nothing about which
/// check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token is not structurally parseable
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the signing key
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token decodes but is past its expiry
    #[error("token has expired")]
    Expired,
    /// Token uses an unrecognized signing scheme
    #[error("token signing scheme is not supported")]
    Unsupported,
}

/// Signing key shorter than [`MIN_KEY_BYTES`]. Fatal at startup.
#[derive(Debug, Error)]
#[error("signing key must be at least {MIN_KEY_BYTES} bytes, got {0}")]
pub struct WeakKeyError(pub usize);

/// Encodes and decodes signed tokens with a fixed HS256 key.
#[derive(Debug)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec over a symmetric signing key.
    ///
    /// Rejects keys shorter than 256 bits; a weak key is a configuration
    /// error, not something to fall back from.
    pub fn new(secret: &[u8]) -> Result<Self, WeakKeyError> {
        if secret.len() < MIN_KEY_BYTES {
            return Err(WeakKeyError(secret.len()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry boundaries are exact: a token one second past exp is dead.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Serialize claims into a compact signed token.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::Malformed)
    }

    /// Verify signature, structure and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        // Classify unsupported signing schemes before signature checking;
        // the validation below only ever accepts HS256.
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::Unsupported);
        }

        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::TokenType;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::Utc;

    const TEST_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn codec() -> TokenCodec {
        TokenCodec::new(TEST_SECRET).expect("test key is long enough")
    }

    fn claims_expiring_at(exp: i64) -> TokenClaims {
        TokenClaims {
            sub: "joao@email.com".to_string(),
            roles: Some("CANDIDATO".to_string()),
            token_type: TokenType::Access,
            iat: Utc::now().timestamp(),
            exp,
        }
    }

    #[test]
    fn short_key_is_rejected() {
        let err = TokenCodec::new(b"too-short").unwrap_err();
        assert_eq!(err.0, 9);
    }

    #[test]
    fn encode_decode_round_trip() {
        let codec = codec();
        let claims = claims_expiring_at(Utc::now().timestamp() + 3600);
        let token = codec.encode(&claims).unwrap();

        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.sub, "joao@email.com");
        assert_eq!(decoded.roles.as_deref(), Some("CANDIDATO"));
        assert_eq!(decoded.token_type, TokenType::Access);
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let codec = codec();
        let claims = claims_expiring_at(Utc::now().timestamp() - 1);
        let token = codec.encode(&claims).unwrap();

        assert_eq!(codec.decode(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn future_expiry_passes() {
        let codec = codec();
        let claims = claims_expiring_at(Utc::now().timestamp() + 3600);
        let token = codec.encode(&claims).unwrap();
        assert!(codec.decode(&token).is_ok());
    }

    #[test]
    fn garbage_fails_with_malformed() {
        let codec = codec();
        assert_eq!(codec.decode("not-a-token").unwrap_err(), TokenError::Malformed);
        assert_eq!(codec.decode("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let codec = codec();
        let claims = claims_expiring_at(Utc::now().timestamp() + 3600);
        let token = codec.encode(&claims).unwrap();

        let (rest, signature) = token.rsplit_once('.').unwrap();
        let mut sig_bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        // Flip one byte of the signature segment.
        sig_bytes[0] ^= 0x01;
        let tampered = format!("{rest}.{}", URL_SAFE_NO_PAD.encode(sig_bytes));

        assert_eq!(
            codec.decode(&tampered).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn wrong_key_is_rejected() {
        let codec_a = codec();
        let codec_b = TokenCodec::new(b"ffffffffffffffffffffffffffffffff").unwrap();

        let claims = claims_expiring_at(Utc::now().timestamp() + 3600);
        let token = codec_a.encode(&claims).unwrap();

        assert_eq!(
            codec_b.decode(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn unrecognized_algorithm_is_unsupported() {
        let codec = codec();

        // Hand-build a token whose header claims an RSA scheme.
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"sub":"joao@email.com","type":"ACCESS","iat":0,"exp":{}}}"#,
                Utc::now().timestamp() + 3600
            )
            .as_bytes(),
        );
        let token = format!("{header}.{payload}.AAAA");

        assert_eq!(codec.decode(&token).unwrap_err(), TokenError::Unsupported);
    }
}
