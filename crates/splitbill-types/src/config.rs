//! Configuration for settlement and the shareable recap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{SplitBillError, Result, constants};

/// Numeric knobs for the balance calculator and settlement resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Balances with magnitude at or below this are treated as settled.
    pub tolerance: Decimal,
    /// Decimal places every balance update is rounded to.
    pub money_scale: u32,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: constants::SETTLEMENT_TOLERANCE,
            money_scale: constants::MONEY_SCALE,
        }
    }
}

impl SettlementConfig {
    /// Parse from JSON; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the resolver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance < Decimal::ZERO {
            return Err(SplitBillError::Configuration(format!(
                "tolerance must not be negative, got {}",
                self.tolerance
            )));
        }
        if self.money_scale > constants::MAX_MONEY_SCALE {
            return Err(SplitBillError::Configuration(format!(
                "money_scale {} exceeds maximum {}",
                self.money_scale,
                constants::MAX_MONEY_SCALE
            )));
        }
        Ok(())
    }
}

/// How the plain-text settlement recap is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecapFormat {
    /// First line of the recap.
    pub title: String,
    /// Prepended to every amount (e.g., "Rp").
    pub currency_prefix: String,
    /// Digit grouping separator for the integer part.
    pub thousands_separator: char,
    /// Separator between integer and fractional part.
    pub decimal_separator: char,
}

impl Default for RecapFormat {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_RECAP_TITLE.to_string(),
            currency_prefix: constants::DEFAULT_CURRENCY_PREFIX.to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

impl RecapFormat {
    pub fn validate(&self) -> Result<()> {
        if self.thousands_separator == self.decimal_separator {
            return Err(SplitBillError::Configuration(format!(
                "thousands and decimal separator are both '{}'",
                self.decimal_separator
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_config_defaults() {
        let cfg = SettlementConfig::default();
        assert_eq!(cfg.tolerance, Decimal::new(1, 2));
        assert_eq!(cfg.money_scale, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = SettlementConfig::from_json(r#"{"tolerance": "0.05"}"#).unwrap();
        assert_eq!(cfg.tolerance, Decimal::new(5, 2));
        assert_eq!(cfg.money_scale, 2);
    }

    #[test]
    fn negative_tolerance_rejected() {
        let err = SettlementConfig::from_json(r#"{"tolerance": "-1"}"#).unwrap_err();
        assert!(matches!(err, SplitBillError::Configuration(_)));
    }

    #[test]
    fn oversized_scale_rejected() {
        let cfg = SettlementConfig {
            money_scale: 29,
            ..SettlementConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = SettlementConfig::from_json("{").unwrap_err();
        assert!(matches!(err, SplitBillError::Serialization(_)));
    }

    #[test]
    fn recap_format_defaults() {
        let fmt = RecapFormat::default();
        assert_eq!(fmt.currency_prefix, "Rp");
        assert!(fmt.validate().is_ok());
    }

    #[test]
    fn recap_format_rejects_identical_separators() {
        let fmt = RecapFormat {
            thousands_separator: ',',
            ..RecapFormat::default()
        };
        assert!(fmt.validate().is_err());
    }
}
