//! Wallet session endpoints
//!
//! The SPA signs in with the wallet, then hands the gateway the address
//! and signature token; every authenticated backend call forwards them.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moneyhack_core::types::EvmAddress;

use crate::dto::{ApiError, SessionConnectRequest, SessionStatusResponse};
use crate::state::AppState;

use super::ErrorResponse;

/// Create session router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/status", get(status))
        .route("/disconnect", post(disconnect))
}

/// POST /session/connect - Establish a wallet session
async fn connect(
    State(state): State<AppState>,
    Json(request): Json<SessionConnectRequest>,
) -> Result<Json<SessionStatusResponse>, ErrorResponse> {
    let address = EvmAddress::new(request.address);
    state
        .set_session(address.clone(), request.auth_token)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::bad_request(e.to_string())),
            )
        })?;

    tracing::info!("Wallet session established for {}", address);

    Ok(Json(SessionStatusResponse {
        connected: true,
        address: Some(address.0),
    }))
}

/// GET /session/status - Current session state
async fn status(State(state): State<AppState>) -> Json<SessionStatusResponse> {
    let session = state.session().await;
    Json(SessionStatusResponse {
        connected: session.is_some(),
        address: session.map(|s| s.address.0),
    })
}

/// POST /session/disconnect - Clear the session
async fn disconnect(State(state): State<AppState>) -> Json<SessionStatusResponse> {
    state.clear_session().await;
    Json(SessionStatusResponse {
        connected: false,
        address: None,
    })
}
