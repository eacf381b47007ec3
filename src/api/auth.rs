// SPDX-License-Identifier: AGPL-3.0-or-later

//! Authentication endpoints: login, refresh, logout, registration, me.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    auth::{gate, CurrentIdentity, Role},
    error::ApiError,
    models::{
        AuthResponse, LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest, UserInfo,
    },
    state::AppState,
    store::UserRecord,
};

/// Authenticate with email + password and receive a token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    debug!(email = %request.email, "login attempt");

    let users = state.users.read().await;
    let Some(record) = users.verify_credentials(&request.email, &request.senha) else {
        warn!(email = %request.email, "login failed: invalid credentials");
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    let response = issue_pair(&state, record)?;
    info!(email = %record.email, role = %record.role, "login succeeded");
    Ok(Json(response))
}

/// Exchange a valid refresh token for a fresh token pair.
///
/// Roles are re-resolved from the user store by subject; if the subject no
/// longer exists the refresh fails rather than falling back to stale
/// claims.
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let token = &request.refresh_token;

    if !state.validator.validate(token) {
        warn!("refresh rejected: token failed validation");
        return Err(ApiError::unauthorized("Invalid refresh token"));
    }
    if !state.validator.is_refresh_token(token) {
        warn!("refresh rejected: token is not a refresh token");
        return Err(ApiError::unauthorized("Invalid refresh token"));
    }

    let subject = state
        .validator
        .subject_of(token)
        .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

    let users = state.users.read().await;
    let Some(record) = users.find_by_email(&subject) else {
        warn!(subject = %subject, "refresh rejected: subject no longer exists");
        return Err(ApiError::unauthorized("Invalid refresh token"));
    };

    let response = issue_pair(&state, record)?;
    info!(subject = %subject, "token refreshed");
    Ok(Json(response))
}

/// Acknowledge a logout.
///
/// Stateless: the refresh token is checked and the event logged, but the
/// token stays usable until natural expiry. There is no server-side
/// revocation state by design; see DESIGN.md.
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.validator.validate(&request.refresh_token) {
        return Err(ApiError::bad_request("Could not invalidate token"));
    }

    if let Ok(subject) = state.validator.subject_of(&request.refresh_token) {
        info!(subject = %subject, "logout acknowledged");
    }
    Ok(Json(MessageResponse::ok("Logout successful")))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: String,
    pub roles: Vec<Role>,
}

/// Who am I - any authenticated user.
pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Result<Json<MeResponse>, ApiError> {
    let identity = gate::authorize(
        identity.as_ref(),
        &[Role::Admin, Role::Recrutador, Role::Candidato],
    )?;

    Ok(Json(MeResponse {
        subject: identity.subject.clone(),
        roles: identity.roles.clone(),
    }))
}

/// Register a candidate account. Public.
pub async fn register_candidato(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    register(state, request, Role::Candidato).await
}

/// Register a recruiter account. Public.
pub async fn register_recrutador(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    register(state, request, Role::Recrutador).await
}

async fn register(
    state: AppState,
    request: RegisterRequest,
    role: Role,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    let email = request.email.clone();
    let mut users = state.users.write().await;
    let record = users.register(request, role)?;
    info!(email = %email, role = %role, "user registered");
    Ok((StatusCode::CREATED, Json(record.info())))
}

fn issue_pair(state: &AppState, record: &UserRecord) -> Result<AuthResponse, ApiError> {
    let access_token = state
        .issuer
        .issue_access_token(&record.email, &[record.role])
        .map_err(|e| ApiError::internal(format!("Failed to issue access token: {e}")))?;
    let refresh_token = state
        .issuer
        .issue_refresh_token(&record.email)
        .map_err(|e| ApiError::internal(format!("Failed to issue refresh token: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: state.issuer.access_token_expiry_secs(),
        user: record.info(),
    })
}
