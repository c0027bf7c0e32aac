//! Position Calculator
//!
//! Pure math for LTV previews, health banding, and amount validation.
//! No I/O - just calculations. Every ratio produced here is a display
//! estimate; the backend recomputes and enforces the authoritative
//! values at execution time.

use moneyhack_core::errors::PositionError;
use moneyhack_core::types::RawAmount;

use crate::constants::health;
use crate::state::{HealthStatus, WithdrawPreview};

/// Estimate the loan-to-value ratio after a debt-reducing deposit.
///
/// `delta_value_usd` is the USD value applied against the debt (positive
/// for a deposit the agent will use to repay). The projected borrow value
/// never goes negative, and a zero-collateral position has ratio 0 by
/// convention rather than a division error.
pub fn estimate_ltv(
    current_borrow_value_usd: f64,
    current_collateral_value_usd: f64,
    delta_value_usd: f64,
) -> f64 {
    let new_borrow_value_usd = (current_borrow_value_usd - delta_value_usd).max(0.0);
    if current_collateral_value_usd > 0.0 {
        new_borrow_value_usd / current_collateral_value_usd
    } else {
        0.0
    }
}

/// Current loan-to-value ratio from USD valuations
pub fn current_ltv(borrow_value_usd: f64, collateral_value_usd: f64) -> f64 {
    estimate_ltv(borrow_value_usd, collateral_value_usd, 0.0)
}

/// Determine health banding from the position's LTV and the market's max
pub fn health_status(ltv: f64, max_ltv: f64) -> HealthStatus {
    if max_ltv <= 0.0 {
        return if ltv > 0.0 {
            HealthStatus::Danger
        } else {
            HealthStatus::Healthy
        };
    }
    let ratio = ltv / max_ltv;
    if ratio >= health::DANGER_RATIO {
        HealthStatus::Danger
    } else if ratio >= health::WARNING_RATIO {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

/// Health meter fill percentage, capped at 100
pub fn health_percent(ltv: f64, max_ltv: f64) -> f64 {
    if max_ltv <= 0.0 {
        return if ltv > 0.0 { 100.0 } else { 0.0 };
    }
    ((ltv / max_ltv) * 100.0).min(100.0)
}

/// Net APY of the strategy: vault yield minus borrow cost, scaled by the
/// target LTV (only the borrowed fraction earns the spread)
pub fn net_apy(yield_apy: f64, borrow_apy: f64, target_ltv: f64) -> f64 {
    (yield_apy - borrow_apy) * target_ltv
}

/// USD the agent is expected to borrow against the collateral
pub fn estimated_borrow_usd(collateral_value_usd: f64, target_ltv: f64) -> f64 {
    collateral_value_usd * target_ltv
}

/// Projected yearly yield in USD for a borrowed amount at a net APY
pub fn estimated_yearly_yield_usd(borrow_value_usd: f64, net_apy: f64) -> f64 {
    borrow_value_usd * net_apy
}

fn validate_amount(
    amount: Option<RawAmount>,
    available: RawAmount,
) -> Result<RawAmount, PositionError> {
    let amount = amount.ok_or_else(|| PositionError::InvalidAmount {
        message: "no amount entered".to_string(),
    })?;
    if amount == 0 {
        return Err(PositionError::InvalidAmount {
            message: "amount must be greater than zero".to_string(),
        });
    }
    if amount > available {
        return Err(PositionError::InsufficientBalance {
            required: amount,
            available,
        });
    }
    Ok(amount)
}

/// Validate a deposit amount against the wallet's available balance
pub fn validate_deposit(
    amount: Option<RawAmount>,
    available_balance: RawAmount,
) -> Result<RawAmount, PositionError> {
    validate_amount(amount, available_balance)
}

/// Validate a withdrawal amount against the vault balance
pub fn validate_withdraw(
    amount: Option<RawAmount>,
    vault_balance: RawAmount,
) -> Result<RawAmount, PositionError> {
    validate_amount(amount, vault_balance)
}

/// Surface the backend's withdrawal gate as a typed error.
///
/// The flag is authoritative; this helper only translates it, it never
/// derives a block from local ratio arithmetic.
pub fn ensure_not_blocked(preview: &WithdrawPreview) -> Result<(), PositionError> {
    if preview.is_blocked {
        return Err(PositionError::WithdrawBlocked {
            reason: preview
                .warning_message
                .clone()
                .unwrap_or_else(|| "withdrawal would exceed the safe LTV".to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneyhack_core::amount::parse_amount;

    #[test]
    fn test_estimate_ltv_no_delta() {
        assert_eq!(estimate_ltv(1000.0, 2000.0, 0.0), 0.5);
    }

    #[test]
    fn test_estimate_ltv_zero_collateral() {
        assert_eq!(estimate_ltv(1000.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_estimate_ltv_floors_borrow_at_zero() {
        // max(0, 500 - 600) = 0, ratio 0 / 2000 = 0
        assert_eq!(estimate_ltv(500.0, 2000.0, 600.0), 0.0);
    }

    #[test]
    fn test_estimate_ltv_partial_repay() {
        // 3000 borrowed, 5000 collateral, 1000 deposited -> 0.4
        assert_eq!(estimate_ltv(3000.0, 5000.0, 1000.0), 0.4);
    }

    #[test]
    fn test_current_ltv() {
        assert_eq!(current_ltv(3000.0, 5000.0), 0.6);
        assert_eq!(current_ltv(0.0, 5000.0), 0.0);
    }

    #[test]
    fn test_health_bands() {
        // max_ltv 0.86: warning from 0.731, danger from 0.817
        assert_eq!(health_status(0.60, 0.86), HealthStatus::Healthy);
        assert_eq!(health_status(0.75, 0.86), HealthStatus::Warning);
        assert_eq!(health_status(0.83, 0.86), HealthStatus::Danger);
    }

    #[test]
    fn test_health_band_boundaries() {
        assert_eq!(health_status(0.85, 1.0), HealthStatus::Warning);
        assert_eq!(health_status(0.95, 1.0), HealthStatus::Danger);
        assert_eq!(health_status(0.0, 0.0), HealthStatus::Healthy);
        assert_eq!(health_status(0.5, 0.0), HealthStatus::Danger);
    }

    #[test]
    fn test_health_percent_caps_at_100() {
        assert_eq!(health_percent(0.43, 0.86), 50.0);
        assert_eq!(health_percent(1.2, 0.86), 100.0);
        assert_eq!(health_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_net_apy_and_projections() {
        let net = net_apy(0.08, 0.04, 0.75);
        assert!((net - 0.03).abs() < 1e-12);
        assert_eq!(estimated_borrow_usd(10_000.0, 0.75), 7_500.0);
        assert!((estimated_yearly_yield_usd(7_500.0, 0.03) - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_deposit_bounds() {
        assert!(matches!(
            validate_deposit(None, 100),
            Err(PositionError::InvalidAmount { .. })
        ));
        assert!(matches!(
            validate_deposit(Some(0), 100),
            Err(PositionError::InvalidAmount { .. })
        ));
        assert!(matches!(
            validate_deposit(Some(101), 100),
            Err(PositionError::InsufficientBalance {
                required: 101,
                available: 100
            })
        ));
        assert_eq!(validate_deposit(Some(100), 100).unwrap(), 100);
    }

    #[test]
    fn test_deposit_dialog_scenario() {
        // 1.0 token balance at 18 decimals; user types "1.0"
        let balance: RawAmount = 1_000_000_000_000_000_000;
        let amount = parse_amount("1.0", 18);
        assert_eq!(validate_deposit(amount, balance).unwrap(), balance);
    }

    #[test]
    fn test_withdraw_dialog_scenario() {
        // 5.00 USDC vault balance; user requests "10"
        let vault_balance: RawAmount = 5_000_000;
        let amount = parse_amount("10", 6);
        assert!(matches!(
            validate_withdraw(amount, vault_balance),
            Err(PositionError::InsufficientBalance {
                required: 10_000_000,
                available: 5_000_000
            })
        ));
    }

    #[test]
    fn test_ensure_not_blocked() {
        let mut preview = WithdrawPreview {
            current_ltv: 0.6,
            estimated_new_ltv: 0.7,
            target_ltv: 0.75,
            is_warning: true,
            is_blocked: false,
            max_safe_withdraw: 1_000_000,
            warning_message: None,
        };
        assert!(ensure_not_blocked(&preview).is_ok());

        preview.is_blocked = true;
        preview.warning_message = Some("would exceed max LTV".to_string());
        assert!(matches!(
            ensure_not_blocked(&preview),
            Err(PositionError::WithdrawBlocked { .. })
        ));
    }
}
