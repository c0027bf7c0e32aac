//! Account settings endpoints: user config and Telegram notifications

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};

use crate::dto::{
    core_error_response, TelegramBotResponse, TelegramVerifyRequest, UpdateUserConfigApiRequest,
    UserConfigResponse,
};
use crate::state::AppState;

use super::{require_client, require_session, ErrorResponse};

/// Create account router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config).post(update_config))
        .route("/telegram/bot", get(get_telegram_bot))
        .route("/telegram/verify", post(verify_telegram))
        .route("/telegram", delete(disconnect_telegram))
}

/// GET /account/config - Notification and strategy settings
async fn get_config(
    State(state): State<AppState>,
) -> Result<Json<UserConfigResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let user_config = client
        .get_user_config(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(UserConfigResponse { user_config }))
}

/// POST /account/config - Update settings
async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<UpdateUserConfigApiRequest>,
) -> Result<Json<UserConfigResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let user_config = client
        .update_user_config(
            &session.address,
            request.telegram_handle,
            request.preferred_ltv,
            &session.auth_token,
        )
        .await
        .map_err(core_error_response)?;
    Ok(Json(UserConfigResponse { user_config }))
}

/// GET /account/telegram/bot - Bot to message for notification linking
async fn get_telegram_bot(
    State(state): State<AppState>,
) -> Result<Json<TelegramBotResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let bot_username = client
        .get_telegram_bot_username(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(TelegramBotResponse { bot_username }))
}

/// POST /account/telegram/verify - Complete the Telegram link
async fn verify_telegram(
    State(state): State<AppState>,
    Json(request): Json<TelegramVerifyRequest>,
) -> Result<Json<UserConfigResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let user_config = client
        .verify_telegram_secret(&session.address, request.telegram_secret, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(UserConfigResponse { user_config }))
}

/// DELETE /account/telegram - Unlink Telegram notifications
async fn disconnect_telegram(
    State(state): State<AppState>,
) -> Result<Json<UserConfigResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let user_config = client
        .disconnect_telegram(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(UserConfigResponse { user_config }))
}
