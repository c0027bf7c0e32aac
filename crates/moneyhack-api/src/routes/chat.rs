//! Agent chat endpoints

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use moneyhack_client::endpoints::GetChatMessagesResponse;

use crate::dto::{core_error_response, SendChatRequest};
use crate::state::AppState;

use super::{require_client, require_session, ErrorResponse};

/// Create agent chat router
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", get(get_messages).post(send_message))
}

/// GET /agent/messages - Chat history
async fn get_messages(
    State(state): State<AppState>,
) -> Result<Json<GetChatMessagesResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let messages = client
        .get_chat_messages(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(GetChatMessagesResponse { messages }))
}

/// POST /agent/messages - Send a message; the reply carries every message
/// the exchange produced
async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendChatRequest>,
) -> Result<Json<GetChatMessagesResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let messages = client
        .send_chat_message(&session.address, request.text, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(GetChatMessagesResponse { messages }))
}
