//! Position protocol constants
//!
//! Target-LTV presets and display thresholds. LTV figures are decimals
//! (0.75 means 75%); the frontend multiplies by 100 for display.

/// A selectable target loan-to-value preset
#[derive(Debug, Clone, Copy)]
pub struct LtvPreset {
    pub value: f64,
    pub label: &'static str,
    pub description: &'static str,
}

/// Target-LTV options offered during setup
pub const LTV_PRESETS: &[LtvPreset] = &[
    LtvPreset {
        value: 0.65,
        label: "65%",
        description: "Conservative",
    },
    LtvPreset {
        value: 0.70,
        label: "70%",
        description: "Moderate",
    },
    LtvPreset {
        value: 0.75,
        label: "75%",
        description: "Standard",
    },
    LtvPreset {
        value: 0.80,
        label: "80%",
        description: "Aggressive",
    },
];

/// Default target LTV when the user has not picked a preset
pub const DEFAULT_TARGET_LTV: f64 = 0.75;

/// Fallback max LTV when market data lacks the collateral's market
pub const DEFAULT_MAX_LTV: f64 = 0.86;

/// Health banding thresholds on the ltv / max_ltv ratio
///
/// - >= DANGER_RATIO (0.95): liquidation imminent, displayed in red
/// - >= WARNING_RATIO (0.85): at risk, displayed in amber
/// - below: healthy, displayed in green
pub mod health {
    pub const DANGER_RATIO: f64 = 0.95;
    pub const WARNING_RATIO: f64 = 0.85;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_sorted_and_default_is_offered() {
        let values: Vec<f64> = LTV_PRESETS.iter().map(|p| p.value).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, sorted);
        assert!(values.contains(&DEFAULT_TARGET_LTV));
    }

    #[test]
    fn test_bands_are_ordered() {
        assert!(health::WARNING_RATIO < health::DANGER_RATIO);
        assert!(DEFAULT_MAX_LTV > DEFAULT_TARGET_LTV);
    }
}
