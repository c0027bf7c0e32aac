//! Backend endpoint request/response shapes
//!
//! One pair per operation, camelCase on the wire, raw amounts as decimal
//! strings.

use moneyhack_core::amount::raw_amount_string;
use moneyhack_core::types::{RawAmount, TxHash};
use serde::{Deserialize, Serialize};

use crate::resources::{
    Agent, ChatMessage, CollateralAsset, MarketData, Position, PositionTransactions, UserConfig,
    Wallet, WithdrawPreview,
};

/// GET v1/collaterals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSupportedCollateralsResponse {
    pub collaterals: Vec<CollateralAsset>,
}

/// GET v1/users/{address}/config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserConfigResponse {
    pub user_config: UserConfig,
}

/// POST v1/users/{address}/config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserConfigRequest {
    pub telegram_handle: Option<String>,
    pub preferred_ltv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserConfigResponse {
    pub user_config: UserConfig,
}

/// POST v1/users/{address}/positions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionRequest {
    pub collateral_asset_address: String,
    #[serde(with = "raw_amount_string")]
    pub collateral_amount: RawAmount,
    pub target_ltv: f64,
    pub agent_name: String,
    pub agent_emoji: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionResponse {
    pub position: Position,
    pub agent: Agent,
}

/// GET v1/users/{address}/position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPositionResponse {
    pub position: Option<Position>,
}

/// POST v1/users/{address}/position/transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPositionTransactionsRequest {
    pub collateral_asset_address: String,
    #[serde(with = "raw_amount_string")]
    pub collateral_amount: RawAmount,
    pub target_ltv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPositionTransactionsResponse {
    pub position_transactions: PositionTransactions,
}

/// POST v1/users/{address}/position/withdraw/preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWithdrawPreviewRequest {
    #[serde(with = "raw_amount_string")]
    pub amount: RawAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWithdrawPreviewResponse {
    pub withdraw_preview: WithdrawPreview,
}

/// POST v1/users/{address}/position/withdraw
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    #[serde(with = "raw_amount_string")]
    pub amount: RawAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    pub position: Position,
    pub transaction_hash: TxHash,
}

/// POST v1/users/{address}/position/close
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionResponse {
    pub transaction_hash: TxHash,
}

/// GET v1/market-data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMarketDataResponse {
    pub market_data: MarketData,
}

/// GET v1/wallets/{address}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWalletResponse {
    pub wallet: Wallet,
}

/// GET v1/users/{address}/agent/messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetChatMessagesResponse {
    pub messages: Vec<ChatMessage>,
}

/// POST v1/users/{address}/agent/messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendChatMessageRequest {
    pub text: String,
}

/// The reply includes every message the exchange produced (the agent may
/// answer with more than one)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendChatMessageResponse {
    pub messages: Vec<ChatMessage>,
}

/// GET v1/users/{address}/telegram/login-url
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramLoginUrlResponse {
    pub bot_username: String,
}

/// POST v1/users/{address}/telegram/secret-verify
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramSecretVerifyRequest {
    pub telegram_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramSecretVerifyResponse {
    pub user_config: UserConfig,
}

/// DELETE v1/users/{address}/telegram
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectTelegramResponse {
    pub user_config: UserConfig,
}

/// Error body the backend returns on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_position_request_wire_shape() {
        let request = CreatePositionRequest {
            collateral_asset_address: "0x4200000000000000000000000000000000000006".to_string(),
            collateral_amount: 2_000_000_000_000_000_000,
            target_ltv: 0.75,
            agent_name: "Scrooge".to_string(),
            agent_emoji: "🦆".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["collateralAmount"], "2000000000000000000");
        assert_eq!(value["targetLtv"], 0.75);
        assert_eq!(value["agentEmoji"], "🦆");
    }

    #[test]
    fn test_get_position_response_handles_null() {
        let response: GetPositionResponse =
            serde_json::from_str(r#"{"position": null}"#).unwrap();
        assert!(response.position.is_none());
    }

    #[test]
    fn test_withdraw_request_amount_as_string() {
        let request = WithdrawRequest { amount: 10_000_000 };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"amount":"10000000"}"#
        );
    }

    #[test]
    fn test_update_user_config_round_trip() {
        let json = r#"{"telegramHandle":"@duckfan","preferredLtv":0.7}"#;
        let request: UpdateUserConfigRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.telegram_handle.as_deref(), Some("@duckfan"));
        assert_eq!(serde_json::to_string(&request).unwrap(), json);
    }
}
