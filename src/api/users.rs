// SPDX-License-Identifier: AGPL-3.0-or-later

//! User endpoints, demonstrating both gate forms: a fixed role allow-set
//! and role-or-owner composition.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{gate, CurrentIdentity, Role},
    error::ApiError,
    models::UserInfo,
    state::AppState,
};

/// List all users. ADMIN only.
pub async fn list_users(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    gate::authorize(identity.as_ref(), &[Role::Admin])?;

    let users = state.users.read().await;
    Ok(Json(users.list().into_iter().map(|u| u.info()).collect()))
}

/// Fetch one user. ADMIN, or the user themselves.
pub async fn get_user(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserInfo>, ApiError> {
    // Authentication first, so unauthenticated callers cannot probe ids.
    gate::authorize(
        identity.as_ref(),
        &[Role::Admin, Role::Recrutador, Role::Candidato],
    )?;

    let users = state.users.read().await;
    let record = users
        .find_by_id(user_id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    gate::authorize_owner(identity.as_ref(), &[Role::Admin], &record.email)?;
    Ok(Json(record.info()))
}
