//! API route handlers

pub mod account;
pub mod chat;
pub mod health;
pub mod market;
pub mod position;
pub mod session;

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use moneyhack_client::MoneyHackClient;

use crate::dto::ApiError;
use crate::state::{AppState, SessionState};

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/session", session::router())
        .nest("/market", market::router())
        .nest("/position", position::router())
        .nest("/account", account::router())
        .nest("/agent", chat::router())
        .with_state(state)
}

/// Error tuple type returned by every handler
pub(crate) type ErrorResponse = (StatusCode, Json<ApiError>);

/// The connected wallet session, or 401
pub(crate) async fn require_session(state: &AppState) -> Result<SessionState, ErrorResponse> {
    state.session().await.ok_or((
        StatusCode::UNAUTHORIZED,
        Json(ApiError::new("no_session", "Wallet not connected")),
    ))
}

/// The backend client, or 503
pub(crate) async fn require_client(state: &AppState) -> Result<Arc<MoneyHackClient>, ErrorResponse> {
    state.client().await.ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiError::new("backend_unavailable", "Backend not reachable")),
    ))
}
