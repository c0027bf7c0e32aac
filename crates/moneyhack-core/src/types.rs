//! Core type definitions for moneyhack

use serde::{Deserialize, Serialize};
use std::fmt;

/// EVM account address (0x-prefixed, 20 bytes hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvmAddress(pub String);

impl EvmAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the 0x-prefix + 40 hex digit shape (no checksum validation)
    pub fn is_well_formed(&self) -> bool {
        let Some(body) = self.0.strip_prefix("0x") else {
            return false;
        };
        body.len() == 40 && hex::decode(body).is_ok()
    }

    /// Case-insensitive address comparison (checksummed vs lowercase forms)
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction hash (0x-prefixed, 32 bytes hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_well_formed(&self) -> bool {
        let Some(body) = self.0.strip_prefix("0x") else {
            return false;
        };
        body.len() == 64 && hex::decode(body).is_ok()
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM chain ID (8453 = Base mainnet)
pub type ChainId = u64;

/// Token amount in the token's smallest unit, scaled by 10^decimals
pub type RawAmount = u128;

/// Constants
pub mod constants {
    use super::{ChainId, RawAmount};

    /// Base mainnet chain ID
    pub const BASE_CHAIN_ID: ChainId = 8453;

    /// USDC contract address on Base
    pub const USDC_ADDRESS: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

    /// USDC decimal places on Base
    pub const USDC_DECIMALS: u8 = 6;

    /// 1 USDC in base units
    pub const USDC_UNIT: RawAmount = 1_000_000;

    /// Block explorer transaction URL prefix
    pub const EXPLORER_TX_URL: &str = "https://basescan.org/tx/";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_well_formed() {
        let addr = EvmAddress::new("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
        assert!(addr.is_well_formed());

        assert!(!EvmAddress::new("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913").is_well_formed());
        assert!(!EvmAddress::new("0x1234").is_well_formed());
        assert!(!EvmAddress::new("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA0291z").is_well_formed());
    }

    #[test]
    fn test_address_matches_ignores_case() {
        let addr = EvmAddress::new("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
        assert!(addr.matches("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"));
        assert!(!addr.matches("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn test_tx_hash_well_formed() {
        let hash = TxHash::new(
            "0x2c6a8c2fa91a18dcbd2898deab6d8d8969437a00d02a91e02a1edca5ae99e6ce",
        );
        assert!(hash.is_well_formed());
        assert!(!TxHash::new("0xdeadbeef").is_well_formed());
    }

    #[test]
    fn test_explorer_url() {
        let hash = TxHash::new("0xabc");
        let url = format!("{}{}", constants::EXPLORER_TX_URL, hash);
        assert_eq!(url, "https://basescan.org/tx/0xabc");
    }
}
