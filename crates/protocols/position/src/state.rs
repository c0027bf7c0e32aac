//! Position state types
//!
//! Data structures mirroring the backend's position resources. Raw token
//! amounts ride JSON as decimal strings; USD valuations and LTV figures
//! are backend-computed floats that this crate displays but never
//! recomputes for enforcement.

use chrono::{DateTime, Utc};
use moneyhack_core::amount::raw_amount_string;
use moneyhack_core::types::{ChainId, EvmAddress, RawAmount};
use serde::{Deserialize, Serialize};

/// A collateral token the product accepts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralAsset {
    pub chain_id: ChainId,
    pub address: EvmAddress,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub logo_uri: Option<String>,
}

/// Lifecycle of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Active,
    Closing,
    Closed,
}

impl PositionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

/// A user's borrow-and-earn position, as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub position_id: String,
    pub created_date: DateTime<Utc>,
    pub user_address: EvmAddress,
    pub collateral_asset: CollateralAsset,
    #[serde(with = "raw_amount_string")]
    pub collateral_amount: RawAmount,
    pub collateral_value_usd: f64,
    #[serde(with = "raw_amount_string")]
    pub borrow_amount: RawAmount,
    pub borrow_value_usd: f64,
    pub current_ltv: f64,
    pub target_ltv: f64,
    pub health_factor: f64,
    #[serde(with = "raw_amount_string")]
    pub vault_balance: RawAmount,
    pub vault_balance_usd: f64,
    #[serde(with = "raw_amount_string")]
    pub accrued_yield: RawAmount,
    pub accrued_yield_usd: f64,
    pub estimated_apy: f64,
    pub status: PositionStatus,
}

impl Position {
    /// Health banding against the collateral market's max LTV
    pub fn health_status(&self, max_ltv: f64) -> HealthStatus {
        crate::calculator::health_status(self.current_ltv, max_ltv)
    }

    /// Vault balance after a hypothetical withdrawal, floored at zero
    pub fn vault_balance_after_withdraw(&self, amount: RawAmount) -> RawAmount {
        self.vault_balance.saturating_sub(amount)
    }
}

/// Backend-computed withdrawal preview.
///
/// `is_blocked` / `is_warning` / `max_safe_withdraw` are the authoritative
/// safety gates; the UI relays them and must not substitute its own ratio
/// arithmetic for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawPreview {
    pub current_ltv: f64,
    pub estimated_new_ltv: f64,
    pub target_ltv: f64,
    pub is_warning: bool,
    pub is_blocked: bool,
    #[serde(with = "raw_amount_string")]
    pub max_safe_withdraw: RawAmount,
    pub warning_message: Option<String>,
}

/// Health banding for UI color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy, // Green: ltv well under max
    Warning, // Amber: ltv at >= 85% of max
    Danger,  // Red: ltv at >= 95% of max
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}
