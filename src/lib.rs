// SPDX-License-Identifier: AGPL-3.0-or-later

//! Recrutec - Recruitment Platform Auth Service
//!
//! REST backend providing JWT authentication (access + refresh tokens) and
//! role-based authorization for the Recrutec recruitment platform.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec/issuer/validator, request authentication,
//!   authorization gate
//! - `store` - In-memory user store (credential verification, role lookup)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
