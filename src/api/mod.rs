// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::authenticate_request;
use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/register/candidato", post(auth::register_candidato))
        .route("/auth/register/recrutador", post(auth::register_recrutador))
        .route("/auth/health", get(health::health))
        .route("/admin/users", get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        // Authentication runs once per request, before route dispatch. It
        // only attaches or withholds an identity; public routes above are
        // unaffected by an absent or invalid token.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_request,
        ))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
