// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory user store.
//!
//! Plays the role the relational store plays in production: credential
//! verification at login and role lookup by subject at refresh time. The
//! auth pipeline itself never touches this store outside those two points.
//!
//! Passwords are stored as salted HMAC-SHA256 digests with a random
//! per-user salt; verification is constant-time via the `Mac` trait.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::models::{RegisterRequest, UserInfo};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub role: Role,
    salt: [u8; 16],
    password_hash: Vec<u8>,
}

impl UserRecord {
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            nome: self.nome.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[derive(Default)]
pub struct UserStore {
    by_email: HashMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user with the given role. Fails with 409 if the
    /// email is already taken.
    pub fn register(&mut self, request: RegisterRequest, role: Role) -> Result<UserRecord, ApiError> {
        if request.email.trim().is_empty() || request.senha.is_empty() {
            return Err(ApiError::bad_request("Email and password are required"));
        }
        if self.by_email.contains_key(&request.email) {
            return Err(ApiError::conflict("Email is already registered"));
        }

        let salt = *Uuid::new_v4().as_bytes();
        let record = UserRecord {
            id: Uuid::new_v4(),
            nome: request.nome,
            email: request.email.clone(),
            telefone: request.telefone,
            role,
            salt,
            password_hash: hash_password(&salt, &request.senha),
        };
        self.by_email.insert(request.email, record.clone());
        Ok(record)
    }

    /// Verify credentials, returning the user on success.
    ///
    /// A missing user and a wrong password are indistinguishable to the
    /// caller.
    pub fn verify_credentials(&self, email: &str, senha: &str) -> Option<&UserRecord> {
        let record = self.by_email.get(email)?;
        let mut mac = HmacSha256::new_from_slice(&record.salt).ok()?;
        mac.update(senha.as_bytes());
        mac.verify_slice(&record.password_hash).ok()?;
        Some(record)
    }

    /// Current roles for a subject, used to re-resolve authority at
    /// refresh time.
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.by_email.get(email)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&UserRecord> {
        self.by_email.values().find(|record| record.id == id)
    }

    pub fn list(&self) -> Vec<&UserRecord> {
        let mut users: Vec<_> = self.by_email.values().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }
}

fn hash_password(salt: &[u8], senha: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts any key length");
    mac.update(senha.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
