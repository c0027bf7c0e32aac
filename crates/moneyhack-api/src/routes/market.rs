//! Market data endpoints

use axum::{extract::State, routing::get, Json, Router};
use moneyhack_client::endpoints::GetSupportedCollateralsResponse;

use crate::dto::{core_error_response, MarketDataResponse};
use crate::state::AppState;

use super::{require_client, require_session, ErrorResponse};

/// Create market router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data", get(get_market_data))
        .route("/collaterals", get(get_collaterals))
}

/// GET /market/data - Borrow markets and yield vault snapshot
async fn get_market_data(
    State(state): State<AppState>,
) -> Result<Json<MarketDataResponse>, ErrorResponse> {
    let client = require_client(&state).await?;
    let market_data = client
        .get_market_data()
        .await
        .map_err(core_error_response)?;
    Ok(Json(MarketDataResponse { market_data }))
}

/// GET /market/collaterals - Supported collateral assets
async fn get_collaterals(
    State(state): State<AppState>,
) -> Result<Json<GetSupportedCollateralsResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;
    let collaterals = client
        .get_supported_collaterals(&session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(Json(GetSupportedCollateralsResponse { collaterals }))
}
