// SPDX-License-Identifier: AGPL-3.0-or-later

//! API request and response types.
//!
//! Field names follow the established wire format of the platform
//! (`nome`, `senha`, `telefone`), so existing clients keep working.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub telefone: Option<String>,
    pub senha: String,
}

/// Successful login/refresh response: the token pair plus basic user info.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"Bearer"`
    pub token_type: &'static str,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub role: Role,
}

/// Plain acknowledgment body (logout, registration status).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: i64,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
