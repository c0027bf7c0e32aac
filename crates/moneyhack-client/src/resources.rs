//! Backend API resources
//!
//! Wire shapes shared by several endpoints. Position state types live in
//! the `position` crate and are re-exported here so callers see one
//! resource namespace.

use chrono::{DateTime, Utc};
use moneyhack_core::amount::raw_amount_string;
use moneyhack_core::types::{EvmAddress, RawAmount};
use serde::{Deserialize, Serialize};

pub use position::state::{
    CollateralAsset, HealthStatus, Position, PositionStatus, WithdrawPreview,
};

/// Per-user notification and strategy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    pub telegram_handle: Option<String>,
    pub preferred_ltv: f64,
}

/// Borrow market data for one collateral asset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralMarketData {
    pub collateral_address: EvmAddress,
    pub collateral_symbol: String,
    pub borrow_apy: f64,
    pub max_ltv: f64,
    pub market_id: Option<String>,
}

/// Market data snapshot: borrow markets plus the yield vault
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub collateral_markets: Vec<CollateralMarketData>,
    pub yield_apy: f64,
    pub yield_vault_address: EvmAddress,
    pub yield_vault_name: String,
}

impl MarketData {
    /// Find the borrow market for a collateral address (case-insensitive)
    pub fn market_for(&self, collateral_address: &EvmAddress) -> Option<&CollateralMarketData> {
        self.collateral_markets
            .iter()
            .find(|m| m.collateral_address.matches(collateral_address.as_str()))
    }
}

/// One token balance inside a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub asset_address: EvmAddress,
    #[serde(with = "raw_amount_string")]
    pub balance: RawAmount,
    pub balance_usd: f64,
}

/// Wallet balances as reported by the backend indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub address: EvmAddress,
    pub asset_balances: Vec<AssetBalance>,
}

impl Wallet {
    /// Balance entry for an asset address (case-insensitive)
    pub fn balance_of(&self, asset_address: &EvmAddress) -> Option<&AssetBalance> {
        self.asset_balances
            .iter()
            .find(|b| b.asset_address.matches(asset_address.as_str()))
    }
}

/// The agent managing a position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub emoji: String,
    pub wallet_address: EvmAddress,
    pub status: String,
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Agent,
}

/// One message in the agent chat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: String,
    pub sender: ChatSender,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

/// An unsigned transaction payload for the user's wallet to sign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    pub to: EvmAddress,
    pub data: String,
    pub value: String,
}

/// The signing steps required to open a position (approve + transfer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionTransactions {
    pub transactions: Vec<UnsignedTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_lookup_ignores_case() {
        let market_data: MarketData = serde_json::from_str(
            r#"{
                "collateralMarkets": [{
                    "collateralAddress": "0x4200000000000000000000000000000000000006",
                    "collateralSymbol": "WETH",
                    "borrowApy": 0.032,
                    "maxLtv": 0.86,
                    "marketId": "weth-usdc"
                }],
                "yieldApy": 0.071,
                "yieldVaultAddress": "0xbeeF010f9cb27031ad51e3333f9aF9C6B1228183",
                "yieldVaultName": "Steakhouse USDC"
            }"#,
        )
        .unwrap();

        let checksummed = EvmAddress::new("0x4200000000000000000000000000000000000006");
        let market = market_data.market_for(&checksummed).unwrap();
        assert_eq!(market.collateral_symbol, "WETH");
        assert!(market_data
            .market_for(&EvmAddress::new("0x0000000000000000000000000000000000000001"))
            .is_none());
    }

    #[test]
    fn test_wallet_balance_lookup() {
        let wallet: Wallet = serde_json::from_str(
            r#"{
                "address": "0x1111111111111111111111111111111111111111",
                "assetBalances": [{
                    "assetAddress": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                    "balance": "25000000",
                    "balanceUsd": 25.0
                }]
            }"#,
        )
        .unwrap();

        let usdc = EvmAddress::new("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913");
        assert_eq!(wallet.balance_of(&usdc).unwrap().balance, 25_000_000);
    }

    #[test]
    fn test_chat_message_round_trip() {
        let json = r#"{
            "messageId": "msg-1",
            "sender": "agent",
            "text": "Rebalanced to 74% LTV",
            "createdDate": "2026-01-15T09:30:00Z"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.sender, ChatSender::Agent);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["sender"], "agent");
    }
}
