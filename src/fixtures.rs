//! External fixture dataset
//!
//! A JSON file provides card records, the currency code-to-label map, tip
//! and cashback amount sets and the terminal's cashback limits. It is
//! loaded once per run into an immutable value passed explicitly to
//! whoever needs it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};

/// One card record for manual entry
#[derive(Debug, Clone, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "PAN")]
    pub pan: String,
    pub expiration: String,
    pub cvc: String,
}

/// Terminal cashback bounds, as configured in the profile under test
#[derive(Debug, Clone, Deserialize)]
pub struct CashbackLimits {
    pub min: String,
    pub max: String,
}

impl Default for CashbackLimits {
    fn default() -> Self {
        Self {
            min: "10".to_string(),
            max: "3000".to_string(),
        }
    }
}

/// The fixture dataset, deserialized once and treated as read-only
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureData {
    /// Card records by name (mastercard, expired, invalid_PAN, ...)
    pub cards: BTreeMap<String, CardRecord>,

    /// Currency code to display label (CZK -> Kč)
    pub currency: BTreeMap<String, String>,

    /// Tip amount set, keyed by case name
    #[serde(default)]
    pub amounts_tips: BTreeMap<String, String>,

    /// Cashback amount set, keyed by case name
    #[serde(default)]
    pub amounts_cashback: BTreeMap<String, String>,

    /// Cashback bounds used by the limit-exceeded announcement
    #[serde(default)]
    pub cashback_limits: CashbackLimits,
}

impl FixtureData {
    /// Load the dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Fixture(e.to_string()))
    }

    /// Display label for a currency code
    pub fn currency_label(&self, code: &str) -> Result<&str> {
        self.currency
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| Error::Fixture(format!("unknown currency '{}'", code)))
    }

    /// Card record by fixture name
    pub fn card(&self, name: &str) -> Result<&CardRecord> {
        self.cards
            .get(name)
            .ok_or_else(|| Error::Fixture(format!("unknown card '{}'", name)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "cards": {
            "mastercard": { "PAN": "5413330089020011", "expiration": "1230", "cvc": "999" },
            "expired":    { "PAN": "5413330089020029", "expiration": "0119", "cvc": "999" },
            "invalid_PAN": { "PAN": "1111222233334444", "expiration": "1230", "cvc": "999" }
        },
        "currency": { "CZK": "Kč", "EUR": "€", "USD": "$" },
        "amounts_tips": { "small": "1", "round": "10", "large": "5000" },
        "amounts_cashback": { "min": "10", "mid": "500" },
        "cashback_limits": { "min": "10", "max": "3000" }
    }"#;

    #[test]
    fn sample_dataset_parses() {
        let data: FixtureData = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(data.currency_label("CZK").unwrap(), "Kč");
        assert_eq!(data.card("mastercard").unwrap().expiration, "1230");
        assert_eq!(data.amounts_tips.len(), 3);
        assert_eq!(data.cashback_limits.max, "3000");
    }

    #[test]
    fn unknown_keys_are_fixture_faults() {
        let data: FixtureData = serde_json::from_str(SAMPLE).unwrap();
        assert!(matches!(
            data.currency_label("GBP").unwrap_err(),
            Error::Fixture(_)
        ));
        assert!(matches!(data.card("visa").unwrap_err(), Error::Fixture(_)));
    }

    #[test]
    fn limits_default_when_absent() {
        let data: FixtureData = serde_json::from_str(
            r#"{ "cards": {}, "currency": { "CZK": "Kč" } }"#,
        )
        .unwrap();
        assert_eq!(data.cashback_limits.min, "10");
        assert_eq!(data.cashback_limits.max, "3000");
    }
}
