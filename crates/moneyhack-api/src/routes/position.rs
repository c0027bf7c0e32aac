//! Position endpoints
//!
//! Dashboard view, previews for the deposit/withdraw dialogs, and
//! pass-through of the backend's position operations. Previews parse the
//! user's typed amount with the shared fixed-point parser and label every
//! projected ratio as an estimate; withdrawal gating always comes from
//! the backend's preview, never from local arithmetic.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use moneyhack_client::endpoints::{CreatePositionRequest, CreatePositionResponse};
use moneyhack_client::MoneyHackClient;
use moneyhack_core::amount::{
    format_amount, format_usd, format_usdc, parse_amount_strict,
};
use moneyhack_core::errors::PositionError;
use moneyhack_core::types::constants::{EXPLORER_TX_URL, USDC_ADDRESS, USDC_DECIMALS, USDC_UNIT};
use moneyhack_core::types::{EvmAddress, RawAmount};
use position::calculator;
use position::constants::{DEFAULT_MAX_LTV, DEFAULT_TARGET_LTV, LTV_PRESETS};
use position::state::Position;

use crate::dto::{
    core_error_response, ApiError, ClosePositionResponse, CreatePositionApiRequest,
    DepositPreviewRequest, DepositPreviewResponse, DepositUsdcPreviewRequest,
    DepositUsdcPreviewResponse, PositionViewResponse, WithdrawPreviewRequest,
    WithdrawPreviewResponse, WithdrawSubmitRequest, WithdrawSubmitResponse,
};
use crate::state::{AppState, SessionState};

use super::{require_client, require_session, ErrorResponse};

/// Create position router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_position_view))
        .route("/create", post(create_position))
        .route("/deposit/preview", post(deposit_preview))
        .route("/deposit-usdc/preview", post(deposit_usdc_preview))
        .route("/withdraw/preview", post(withdraw_preview))
        .route("/withdraw", post(withdraw))
        .route("/close", post(close_position))
}

/// Parse a typed amount or map the failure to `invalid_amount`
fn parse_typed_amount(text: &str, decimals: u8) -> Result<RawAmount, ErrorResponse> {
    match parse_amount_strict(text, decimals) {
        Ok(Some(raw)) => Ok(raw),
        Ok(None) => Err(core_error_response(
            PositionError::InvalidAmount {
                message: "no amount entered".to_string(),
            }
            .into(),
        )),
        Err(e) => Err(core_error_response(
            PositionError::InvalidAmount {
                message: e.to_string(),
            }
            .into(),
        )),
    }
}

/// The user's position, or 404
async fn fetch_position(
    client: &MoneyHackClient,
    session: &SessionState,
) -> Result<Position, ErrorResponse> {
    client
        .get_position(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?
        .ok_or_else(|| {
            core_error_response(
                PositionError::NoPosition {
                    address: session.address.to_string(),
                }
                .into(),
            )
        })
}

/// Balance of one asset in the user's wallet, zero when absent
async fn fetch_wallet_balance(
    client: &MoneyHackClient,
    session: &SessionState,
    asset_address: &EvmAddress,
) -> Result<RawAmount, ErrorResponse> {
    let wallet = client
        .get_wallet(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    Ok(wallet
        .balance_of(asset_address)
        .map(|b| b.balance)
        .unwrap_or(0))
}

/// GET /position - Dashboard view with health banding and display strings
async fn get_position_view(
    State(state): State<AppState>,
) -> Result<Json<PositionViewResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let position = fetch_position(&client, &session).await?;
    let market_data = client
        .get_market_data()
        .await
        .map_err(core_error_response)?;

    let market = market_data.market_for(&position.collateral_asset.address);
    let max_ltv = market.map(|m| m.max_ltv).unwrap_or(DEFAULT_MAX_LTV);
    let borrow_apy = market.map(|m| m.borrow_apy).unwrap_or(0.0);

    let decimals = position.collateral_asset.decimals;
    Ok(Json(PositionViewResponse {
        health_status: calculator::health_status(position.current_ltv, max_ltv),
        health_percent: calculator::health_percent(position.current_ltv, max_ltv),
        max_ltv,
        net_spread: market_data.yield_apy - borrow_apy,
        collateral_display: format_amount(position.collateral_amount, decimals),
        collateral_value_display: format_usd(position.collateral_value_usd),
        vault_balance_display: format_usdc(position.vault_balance),
        position,
    }))
}

/// POST /position/create - Open a position via the backend
async fn create_position(
    State(state): State<AppState>,
    Json(request): Json<CreatePositionApiRequest>,
) -> Result<Json<CreatePositionResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let collaterals = client
        .get_supported_collaterals(&session.auth_token)
        .await
        .map_err(core_error_response)?;
    let asset = collaterals
        .iter()
        .find(|c| c.address.matches(&request.collateral_asset_address))
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::not_found(format!(
                    "Unsupported collateral '{}'",
                    request.collateral_asset_address
                ))),
            )
        })?;

    let amount_raw = parse_typed_amount(&request.amount, asset.decimals)?;
    if amount_raw == 0 {
        return Err(core_error_response(
            PositionError::InvalidAmount {
                message: "amount must be greater than zero".to_string(),
            }
            .into(),
        ));
    }
    // Target LTV must stay within the offered preset range
    let min_ltv = LTV_PRESETS
        .first()
        .map(|p| p.value)
        .unwrap_or(DEFAULT_TARGET_LTV);
    let max_ltv = LTV_PRESETS
        .last()
        .map(|p| p.value)
        .unwrap_or(DEFAULT_TARGET_LTV);
    if !(min_ltv..=max_ltv).contains(&request.target_ltv) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(format!(
                "Target LTV {} outside the supported range",
                request.target_ltv
            ))),
        ));
    }

    let response = client
        .create_position(
            &session.address,
            CreatePositionRequest {
                collateral_asset_address: asset.address.to_string(),
                collateral_amount: amount_raw,
                target_ltv: request.target_ltv,
                agent_name: request.agent_name,
                agent_emoji: request.agent_emoji,
            },
            &session.auth_token,
        )
        .await
        .map_err(core_error_response)?;

    tracing::info!(
        "Position {} created for {}",
        response.position.position_id,
        session.address
    );
    Ok(Json(response))
}

/// POST /position/deposit/preview - Validate a collateral top-up
async fn deposit_preview(
    State(state): State<AppState>,
    Json(request): Json<DepositPreviewRequest>,
) -> Result<Json<DepositPreviewResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let position = fetch_position(&client, &session).await?;
    let decimals = position.collateral_asset.decimals;
    let amount_raw = parse_typed_amount(&request.amount, decimals)?;

    let available =
        fetch_wallet_balance(&client, &session, &position.collateral_asset.address).await?;
    calculator::validate_deposit(Some(amount_raw), available)
        .map_err(|e| core_error_response(e.into()))?;

    let collateral_after = position.collateral_amount.saturating_add(amount_raw);
    Ok(Json(DepositPreviewResponse {
        amount_raw,
        amount_display: format_amount(amount_raw, decimals),
        collateral_after,
        collateral_after_display: format_amount(collateral_after, decimals),
    }))
}

/// POST /position/deposit-usdc/preview - Validate a debt-reducing USDC
/// deposit and estimate the post-repay LTV
async fn deposit_usdc_preview(
    State(state): State<AppState>,
    Json(request): Json<DepositUsdcPreviewRequest>,
) -> Result<Json<DepositUsdcPreviewResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let position = fetch_position(&client, &session).await?;
    let amount_raw = parse_typed_amount(&request.amount, USDC_DECIMALS)?;

    let usdc_address = EvmAddress::new(USDC_ADDRESS);
    let available = fetch_wallet_balance(&client, &session, &usdc_address).await?;
    calculator::validate_deposit(Some(amount_raw), available)
        .map_err(|e| core_error_response(e.into()))?;

    // The agent applies the deposit against debt, valuing USDC at par
    let deposit_value_usd = amount_raw as f64 / USDC_UNIT as f64;
    let estimated_new_ltv = calculator::estimate_ltv(
        position.borrow_value_usd,
        position.collateral_value_usd,
        deposit_value_usd,
    );

    Ok(Json(DepositUsdcPreviewResponse {
        amount_raw,
        amount_display: format_usdc(amount_raw),
        current_ltv: position.current_ltv,
        estimated_new_ltv,
        target_ltv: position.target_ltv,
    }))
}

/// POST /position/withdraw/preview - Local bounds check, then the
/// backend's authoritative preview
async fn withdraw_preview(
    State(state): State<AppState>,
    Json(request): Json<WithdrawPreviewRequest>,
) -> Result<Json<WithdrawPreviewResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let position = fetch_position(&client, &session).await?;
    let amount_raw = parse_typed_amount(&request.amount, USDC_DECIMALS)?;
    calculator::validate_withdraw(Some(amount_raw), position.vault_balance)
        .map_err(|e| core_error_response(e.into()))?;

    let preview = client
        .get_withdraw_preview(&session.address, amount_raw, &session.auth_token)
        .await
        .map_err(core_error_response)?;

    let vault_balance_after = position.vault_balance_after_withdraw(amount_raw);
    Ok(Json(WithdrawPreviewResponse {
        amount_raw,
        preview,
        vault_balance_after,
        vault_balance_after_display: format_usdc(vault_balance_after),
    }))
}

/// POST /position/withdraw - Execute a withdrawal unless the backend
/// blocks it
async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<WithdrawSubmitRequest>,
) -> Result<Json<WithdrawSubmitResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let position = fetch_position(&client, &session).await?;
    let amount_raw = parse_typed_amount(&request.amount, USDC_DECIMALS)?;
    calculator::validate_withdraw(Some(amount_raw), position.vault_balance)
        .map_err(|e| core_error_response(e.into()))?;

    let preview = client
        .get_withdraw_preview(&session.address, amount_raw, &session.auth_token)
        .await
        .map_err(core_error_response)?;
    calculator::ensure_not_blocked(&preview).map_err(|e| core_error_response(e.into()))?;

    let response = client
        .withdraw(&session.address, amount_raw, &session.auth_token)
        .await
        .map_err(core_error_response)?;

    tracing::info!(
        "Withdrawal of {} submitted for {}: {}",
        amount_raw,
        session.address,
        response.transaction_hash
    );
    Ok(Json(WithdrawSubmitResponse {
        explorer_url: format!("{}{}", EXPLORER_TX_URL, response.transaction_hash),
        position: response.position,
        transaction_hash: response.transaction_hash,
    }))
}

/// POST /position/close - Unwind the position
async fn close_position(
    State(state): State<AppState>,
) -> Result<Json<ClosePositionResponse>, ErrorResponse> {
    let session = require_session(&state).await?;
    let client = require_client(&state).await?;

    let response = client
        .close_position(&session.address, &session.auth_token)
        .await
        .map_err(core_error_response)?;

    tracing::info!(
        "Close requested for {}: {}",
        session.address,
        response.transaction_hash
    );
    Ok(Json(ClosePositionResponse {
        explorer_url: format!("{}{}", EXPLORER_TX_URL, response.transaction_hash),
        transaction_hash: response.transaction_hash,
    }))
}
