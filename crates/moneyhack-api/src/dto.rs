//! Data Transfer Objects for gateway requests and responses

use axum::http::StatusCode;
use axum::Json;
use moneyhack_core::amount::raw_amount_string;
use moneyhack_core::types::{RawAmount, TxHash};
use moneyhack_core::Error;
use serde::{Deserialize, Serialize};

use moneyhack_client::resources::{
    HealthStatus, MarketData, Position, UserConfig, WithdrawPreview,
};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Map a core error to an HTTP response, using the error taxonomy's own
/// code and status mappings
pub fn core_error_response(err: Error) -> (StatusCode, Json<ApiError>) {
    let (status, code) = match &err {
        Error::Backend(e) => (e.status_code(), e.error_code()),
        Error::Position(e) => (e.status_code(), e.error_code()),
        Error::Config(_) => (500, "config_error"),
        Error::Serialization(_) => (500, "serialization_error"),
    };
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiError::new(code, err.to_string())))
}

// =============================================================================
// Session DTOs
// =============================================================================

/// Request to establish a wallet session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConnectRequest {
    /// 0x-prefixed EVM address
    pub address: String,
    /// Wallet-signature token forwarded to the backend
    pub auth_token: String,
}

/// Session status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub connected: bool,
    pub address: Option<String>,
}

// =============================================================================
// Position DTOs
// =============================================================================

/// Position with display-side derived fields for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionViewResponse {
    pub position: Position,
    /// Health banding against the collateral market's max LTV
    pub health_status: HealthStatus,
    /// Health meter fill percentage
    pub health_percent: f64,
    /// Max LTV used for banding (market value or default fallback)
    pub max_ltv: f64,
    /// Vault yield minus borrow cost
    pub net_spread: f64,
    pub collateral_display: String,
    pub collateral_value_display: String,
    pub vault_balance_display: String,
}

/// Collateral deposit preview request; `amount` is the raw text the user
/// typed into the dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositPreviewRequest {
    pub amount: String,
}

/// Collateral deposit preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositPreviewResponse {
    #[serde(with = "raw_amount_string")]
    pub amount_raw: RawAmount,
    pub amount_display: String,
    #[serde(with = "raw_amount_string")]
    pub collateral_after: RawAmount,
    pub collateral_after_display: String,
}

/// USDC deposit (debt repay) preview request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositUsdcPreviewRequest {
    pub amount: String,
}

/// USDC deposit preview: the agent applies the deposit against debt, so
/// the interesting output is the estimated post-repay LTV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositUsdcPreviewResponse {
    #[serde(with = "raw_amount_string")]
    pub amount_raw: RawAmount,
    pub amount_display: String,
    pub current_ltv: f64,
    /// Display estimate only; the backend recomputes at execution time
    pub estimated_new_ltv: f64,
    pub target_ltv: f64,
}

/// Withdrawal preview request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawPreviewRequest {
    pub amount: String,
}

/// Withdrawal preview: backend gating relayed verbatim plus local
/// display projections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawPreviewResponse {
    #[serde(with = "raw_amount_string")]
    pub amount_raw: RawAmount,
    pub preview: WithdrawPreview,
    #[serde(with = "raw_amount_string")]
    pub vault_balance_after: RawAmount,
    pub vault_balance_after_display: String,
}

/// Withdrawal submit request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawSubmitRequest {
    pub amount: String,
}

/// Withdrawal result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawSubmitResponse {
    pub position: Position,
    pub transaction_hash: TxHash,
    pub explorer_url: String,
}

/// Close-position result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosePositionResponse {
    pub transaction_hash: TxHash,
    pub explorer_url: String,
}

/// Create-position request; `amount` is typed text, parsed with the
/// collateral asset's decimals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePositionApiRequest {
    pub collateral_asset_address: String,
    pub amount: String,
    pub target_ltv: f64,
    pub agent_name: String,
    pub agent_emoji: String,
}

// =============================================================================
// Market DTOs
// =============================================================================

/// Market data response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataResponse {
    pub market_data: MarketData,
}

// =============================================================================
// Account DTOs
// =============================================================================

/// User config response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfigResponse {
    pub user_config: UserConfig,
}

/// User config update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserConfigApiRequest {
    pub telegram_handle: Option<String>,
    pub preferred_ltv: f64,
}

/// Telegram bot response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramBotResponse {
    pub bot_username: String,
}

/// Telegram secret verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramVerifyRequest {
    pub telegram_secret: String,
}

// =============================================================================
// Chat DTOs
// =============================================================================

/// Chat send request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChatRequest {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneyhack_core::errors::{BackendError, PositionError};

    #[test]
    fn test_core_error_response_mapping() {
        let (status, body) = core_error_response(
            PositionError::InvalidAmount {
                message: "bad".into(),
            }
            .into(),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.code, "invalid_amount");

        let (status, body) = core_error_response(BackendError::Unauthorized.into());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.0.code, "unauthorized");

        let (status, _) = core_error_response(
            BackendError::Unreachable {
                url: "https://example.com".into(),
            }
            .into(),
        );
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_health_response_default() {
        let health = HealthResponse::default();
        assert_eq!(health.status, "ok");
        assert!(!health.version.is_empty());
    }
}
