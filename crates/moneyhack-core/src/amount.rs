//! Fixed-point token amount parsing and formatting
//!
//! Pure functions shared by every screen that accepts or displays token
//! amounts. A raw amount is an integer count of the token's smallest unit;
//! the real value is `raw / 10^decimals`. All splitting into whole and
//! fractional digits is done with integer division and remainder so exact
//! displays never drift, including for very large balances.

use thiserror::Error;

use crate::types::RawAmount;

/// Largest `decimals` for which 10^decimals fits in a `RawAmount`
pub const MAX_DECIMALS: u8 = 38;

/// Errors from the strict amount parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("amount contains non-digit characters")]
    NonDigit,

    #[error("amount has more than one decimal point")]
    TooManyDots,

    #[error("amount exceeds the representable range")]
    Overflow,

    #[error("unsupported decimals: {0}")]
    UnsupportedDecimals(u8),
}

fn pow10(decimals: u8) -> Option<RawAmount> {
    10u128.checked_pow(u32::from(decimals))
}

/// Parse a user-typed decimal string into a raw amount, strictly.
///
/// `Ok(None)` means "nothing entered yet": empty/whitespace input or a lone
/// `"."`. Malformed input (multiple dots, non-digit characters, overflow) is
/// an error so API consumers can distinguish empty from garbage.
///
/// Fractional digits beyond `decimals` are silently truncated, never
/// rounded; a short fraction is right-padded with zeros. No sign handling:
/// the result is always non-negative and `"-1"` is rejected as non-digit.
pub fn parse_amount_strict(
    text: &str,
    decimals: u8,
) -> Result<Option<RawAmount>, ParseAmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Ok(None);
    }
    let scale = pow10(decimals).ok_or(ParseAmountError::UnsupportedDecimals(decimals))?;

    let mut parts = trimmed.split('.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(ParseAmountError::TooManyDots);
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::NonDigit);
    }

    // Truncate before validating: trailing garbage past the supported
    // precision is dropped along with the excess digits. Char-wise, so a
    // multi-byte character at the cut point cannot split.
    let cut = frac
        .char_indices()
        .nth(usize::from(decimals))
        .map(|(i, _)| i)
        .unwrap_or(frac.len());
    let frac = &frac[..cut];
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::NonDigit);
    }

    let whole_value: RawAmount = whole.parse().map_err(|_| ParseAmountError::Overflow)?;
    let frac_value: RawAmount = if frac.is_empty() {
        0
    } else {
        let digits: RawAmount = frac.parse().map_err(|_| ParseAmountError::Overflow)?;
        // Right-pad to exactly `decimals` digits
        let pad = pow10(decimals - frac.len() as u8).ok_or(ParseAmountError::Overflow)?;
        digits
            .checked_mul(pad)
            .ok_or(ParseAmountError::Overflow)?
    };

    whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .map(Some)
        .ok_or(ParseAmountError::Overflow)
}

/// Parse a user-typed decimal string into a raw amount, forgivingly.
///
/// `None` covers both "nothing entered yet" and malformed input, so a
/// dialog can disable its submit button without an error banner. This is
/// the reference dialog behavior; see [`parse_amount_strict`] for the
/// variant that reports why input was rejected.
pub fn parse_amount(text: &str, decimals: u8) -> Option<RawAmount> {
    parse_amount_strict(text, decimals).ok().flatten()
}

/// Insert thousands separators into a whole-number digit string
fn group_thousands(value: RawAmount) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// True when `0 < raw / 10^decimals < 10^-threshold_digits`
fn is_below_threshold(raw: RawAmount, decimals: u8, threshold_digits: u8) -> bool {
    if raw == 0 || decimals < threshold_digits {
        return false;
    }
    match pow10(decimals - threshold_digits) {
        Some(limit) => raw < limit,
        None => false,
    }
}

fn split_raw(raw: RawAmount, decimals: u8) -> (RawAmount, String) {
    let scale = pow10(decimals).unwrap_or(RawAmount::MAX);
    let whole = raw / scale;
    let frac = raw % scale;
    (whole, format!("{:0>width$}", frac, width = usize::from(decimals)))
}

/// Format a raw amount for generic token display.
///
/// Zero renders as `"0"`; nonzero values below 0.0001 render as
/// `"<0.0001"` instead of a misleadingly precise near-zero number.
/// Otherwise: thousands separators, up to 4 fractional digits, truncated,
/// trailing zeros trimmed.
pub fn format_amount(raw: RawAmount, decimals: u8) -> String {
    if raw == 0 {
        return "0".to_string();
    }
    if is_below_threshold(raw, decimals, 4) {
        return "<0.0001".to_string();
    }
    let (whole, frac) = split_raw(raw, decimals);
    let frac = frac[..frac.len().min(4)].trim_end_matches('0');
    if frac.is_empty() {
        group_thousands(whole)
    } else {
        format!("{}.{}", group_thousands(whole), frac)
    }
}

/// Format a raw USDC amount (6 decimals) for display.
///
/// Zero renders as `"0"`; nonzero values below one cent render as
/// `"<0.01"`. Otherwise: thousands separators and exactly two fractional
/// digits, truncated.
pub fn format_usdc(raw: RawAmount) -> String {
    const DECIMALS: u8 = crate::types::constants::USDC_DECIMALS;
    if raw == 0 {
        return "0".to_string();
    }
    if is_below_threshold(raw, DECIMALS, 2) {
        return "<0.01".to_string();
    }
    let (whole, frac) = split_raw(raw, DECIMALS);
    format!("{}.{}", group_thousands(whole), &frac[..2])
}

/// Format a raw amount exactly, reproducing every stored digit.
///
/// No separators, no trimming, fraction zero-padded to `decimals` digits
/// (`1.500000`). Round-trips through [`parse_amount`] for any amount.
pub fn format_amount_exact(raw: RawAmount, decimals: u8) -> String {
    if raw == 0 {
        return "0".to_string();
    }
    if decimals == 0 {
        return raw.to_string();
    }
    let (whole, frac) = split_raw(raw, decimals);
    format!("{}.{}", whole, frac)
}

/// Format a raw amount exactly with trailing fractional zeros trimmed,
/// keeping at least one fractional digit (`5.000000` -> `5.0`).
///
/// Used for withdrawal amounts, including prefilling the amount input, so
/// the output stays parseable (no separators).
pub fn format_amount_trimmed(raw: RawAmount, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let (whole, frac) = split_raw(raw, decimals);
    let trimmed = frac.trim_end_matches('0');
    let frac = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{}.{}", whole, frac)
}

/// Format a wallet balance: truncated to at most 4 fractional digits,
/// zeros preserved (`1.5` at 6 decimals -> `1.5000`).
pub fn format_balance(raw: RawAmount, decimals: u8) -> String {
    if raw == 0 {
        return "0".to_string();
    }
    if decimals == 0 {
        return group_thousands(raw);
    }
    let (whole, frac) = split_raw(raw, decimals);
    let frac = &frac[..frac.len().min(4)];
    if whole == 0 {
        format!("0.{}", frac)
    } else {
        format!("{}.{}", group_thousands(whole), frac)
    }
}

/// Serde adapter for raw amounts, which ride JSON as decimal strings
/// (JSON numbers cannot hold a 256-bit-era token balance losslessly).
pub mod raw_amount_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::RawAmount;

    pub fn serialize<S: Serializer>(value: &RawAmount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawAmount, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Compact USD display: `$1.23M`, `$45.60K`, `$789.01`
pub fn format_usd(value_usd: f64) -> String {
    if value_usd >= 1_000_000.0 {
        format!("${:.2}M", value_usd / 1_000_000.0)
    } else if value_usd >= 1_000.0 {
        format!("${:.2}K", value_usd / 1_000.0)
    } else {
        format!("${:.2}", value_usd)
    }
}

/// Ratio display: 0.1234 -> `12.34%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_value_states() {
        for decimals in [0u8, 6, 18] {
            assert_eq!(parse_amount("", decimals), None);
            assert_eq!(parse_amount("   ", decimals), None);
            assert_eq!(parse_amount(".", decimals), None);
            assert_eq!(parse_amount("1.2.3", decimals), None);
        }
    }

    #[test]
    fn test_parse_strict_distinguishes_empty_from_garbage() {
        assert_eq!(parse_amount_strict("", 6), Ok(None));
        assert_eq!(parse_amount_strict(" . ", 6), Ok(None));
        assert_eq!(
            parse_amount_strict("1.2.3", 6),
            Err(ParseAmountError::TooManyDots)
        );
        assert_eq!(
            parse_amount_strict("12a", 6),
            Err(ParseAmountError::NonDigit)
        );
        assert_eq!(
            parse_amount_strict("-1", 6),
            Err(ParseAmountError::NonDigit)
        );
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_amount("0", 6), Some(0));
        assert_eq!(parse_amount("1", 6), Some(1_000_000));
        assert_eq!(parse_amount("1.", 6), Some(1_000_000));
        assert_eq!(parse_amount(".5", 6), Some(500_000));
        assert_eq!(parse_amount(" 2.25 ", 2), Some(225));
    }

    #[test]
    fn test_parse_truncates_excess_fraction() {
        // Extra digits are dropped, never rounded
        assert_eq!(parse_amount("0.123456789", 6), Some(123_456));
        assert_eq!(parse_amount("0.9999999", 6), Some(999_999));
        // Garbage past the truncation point is dropped with the digits
        assert_eq!(parse_amount("0.123456x", 6), Some(123_456));
    }

    #[test]
    fn test_parse_pads_short_fraction() {
        assert_eq!(parse_amount("1.5", 6), Some(1_500_000));
        assert_eq!(parse_amount("0.00042", 18), Some(420_000_000_000_000));
    }

    #[test]
    fn test_parse_zero_decimals() {
        assert_eq!(parse_amount("42", 0), Some(42));
        assert_eq!(parse_amount("42.9", 0), Some(42));
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(40);
        assert_eq!(
            parse_amount_strict(&huge, 18),
            Err(ParseAmountError::Overflow)
        );
        assert_eq!(parse_amount(&huge, 18), None);
    }

    #[test]
    fn test_parse_one_token_at_18_decimals() {
        // Deposit dialog scenario: typed "1.0" equals a 1.0 token balance
        let balance: RawAmount = 1_000_000_000_000_000_000;
        assert_eq!(parse_amount("1.0", 18), Some(balance));
    }

    #[test]
    fn test_parse_withdraw_over_balance() {
        // Withdraw dialog scenario: "10" exceeds a 5.00 USDC vault balance
        let vault_balance: RawAmount = 5_000_000;
        let requested = parse_amount("10", 6).unwrap();
        assert_eq!(requested, 10_000_000);
        assert!(requested > vault_balance);
    }

    #[test]
    fn test_format_amount_zero_and_threshold() {
        assert_eq!(format_amount(0, 18), "0");
        // 0.00005 at 6 decimals
        assert_eq!(format_amount(50, 6), "<0.0001");
        // Exactly 0.0001 is shown, not thresholded
        assert_eq!(format_amount(100, 6), "0.0001");
        // Low decimals can never be below the threshold
        assert_eq!(format_amount(1, 2), "0.01");
    }

    #[test]
    fn test_format_amount_display() {
        assert_eq!(format_amount(1_234_567_890, 6), "1,234.5678");
        assert_eq!(format_amount(1_500_000, 6), "1.5");
        assert_eq!(format_amount(2_000_000, 6), "2");
    }

    #[test]
    fn test_format_usdc() {
        assert_eq!(format_usdc(0), "0");
        assert_eq!(format_usdc(9_999), "<0.01");
        assert_eq!(format_usdc(10_000), "0.01");
        assert_eq!(format_usdc(5_000_000), "5.00");
        assert_eq!(format_usdc(1_234_567_890), "1,234.56");
    }

    #[test]
    fn test_format_exact_preserves_digits() {
        assert_eq!(format_amount_exact(0, 6), "0");
        assert_eq!(format_amount_exact(1_500_000, 6), "1.500000");
        assert_eq!(format_amount_exact(5, 6), "0.000005");
        assert_eq!(format_amount_exact(42, 0), "42");
    }

    #[test]
    fn test_format_exact_round_trip() {
        let samples: &[RawAmount] = &[
            0,
            1,
            7,
            999,
            1_000_000,
            123_456_789,
            1_000_000_000_000_000_000,
            340_282_366_920_938_463_463,
        ];
        for decimals in 0..=18u8 {
            for &raw in samples {
                let text = format_amount_exact(raw, decimals);
                assert_eq!(
                    parse_amount(&text, decimals),
                    Some(raw),
                    "round trip failed for raw={} decimals={}",
                    raw,
                    decimals
                );
            }
        }
    }

    #[test]
    fn test_format_trimmed() {
        assert_eq!(format_amount_trimmed(5_000_000, 6), "5.0");
        assert_eq!(format_amount_trimmed(5_250_000, 6), "5.25");
        assert_eq!(format_amount_trimmed(0, 6), "0.0");
        assert_eq!(format_amount_trimmed(42, 0), "42");
        // Stays parseable for input prefill
        assert_eq!(parse_amount(&format_amount_trimmed(5_250_000, 6), 6), Some(5_250_000));
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(0, 18), "0");
        assert_eq!(format_balance(1_500_000, 6), "1.5000");
        assert_eq!(format_balance(123_456, 6), "0.1234");
        assert_eq!(format_balance(1_234_000_000, 6), "1,234.0000");
        assert_eq!(format_balance(42, 0), "42");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(2_500_000.0), "$2.50M");
        assert_eq!(format_usd(45_600.0), "$45.60K");
        assert_eq!(format_usd(999.99), "$999.99");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(0.0753), "7.53%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_raw_amount_string_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Holder {
            #[serde(with = "super::raw_amount_string")]
            amount: RawAmount,
        }

        let json = serde_json::to_string(&Holder {
            amount: 1_000_000_000_000_000_000,
        })
        .unwrap();
        assert_eq!(json, r#"{"amount":"1000000000000000000"}"#);

        let parsed: Holder = serde_json::from_str(r#"{"amount":"5000000"}"#).unwrap();
        assert_eq!(parsed.amount, 5_000_000);

        assert!(serde_json::from_str::<Holder>(r#"{"amount":"1.5"}"#).is_err());
    }

    #[test]
    fn test_unsupported_decimals() {
        assert_eq!(
            parse_amount_strict("1", MAX_DECIMALS + 1),
            Err(ParseAmountError::UnsupportedDecimals(39))
        );
    }
}
