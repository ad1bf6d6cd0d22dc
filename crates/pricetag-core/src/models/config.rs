//! Configuration structures for price extraction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::price::DecimalSeparator;
use crate::error::{PriceError, Result};
use crate::parser::NoChargeLexicon;

/// Main configuration for the pricetag pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Price extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Price extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Force a decimal separator instead of guessing it.
    pub decimal_separator: Option<DecimalSeparator>,

    /// Text searched for a currency when the price text names none.
    pub currency_hint: Option<String>,

    /// Currency reported verbatim, skipping currency search.
    pub currency: Option<String>,

    /// Extra phrases meaning "no charge", on top of the built-in ones.
    pub no_charge_synonyms: Vec<String>,

    /// Prefer the first amount written next to a currency over the first amount.
    pub prefer_amount_near_currency: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            decimal_separator: None,
            currency_hint: None,
            currency: None,
            no_charge_synonyms: Vec::new(),
            prefer_amount_near_currency: true,
        }
    }
}

impl PriceConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would silently change every result.
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;

        if extraction.currency.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(PriceError::Config("currency must not be blank".to_string()));
        }

        for phrase in &extraction.no_charge_synonyms {
            let normalized = NoChargeLexicon::normalize(phrase);
            if normalized.is_empty() || normalized.chars().any(|c| c.is_ascii_digit()) {
                return Err(PriceError::Config(format!(
                    "no-charge synonym {phrase:?} must contain words and no digits"
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PriceConfig =
            serde_json::from_str(r#"{"extraction": {"decimal_separator": ","}}"#).unwrap();

        assert_eq!(config.extraction.decimal_separator, Some(DecimalSeparator::Comma));
        assert!(config.extraction.prefer_amount_near_currency);
        assert!(config.extraction.no_charge_synonyms.is_empty());
    }

    #[test]
    fn test_invalid_separator_rejected() {
        let result: std::result::Result<PriceConfig, _> =
            serde_json::from_str(r#"{"extraction": {"decimal_separator": ";"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PriceConfig::default();
        config.extraction.currency_hint = Some("EUR".to_string());
        config.extraction.no_charge_synonyms = vec!["on the house".to_string()];
        config.save(&path).unwrap();

        assert_eq!(PriceConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validation() {
        let mut config = PriceConfig::default();
        assert!(config.validate().is_ok());

        config.extraction.no_charge_synonyms = vec!["2 for 1".to_string()];
        assert!(matches!(config.validate(), Err(PriceError::Config(_))));

        config.extraction.no_charge_synonyms = vec!["!!".to_string()];
        assert!(matches!(config.validate(), Err(PriceError::Config(_))));

        config.extraction.no_charge_synonyms.clear();
        config.extraction.currency = Some("  ".to_string());
        assert!(matches!(config.validate(), Err(PriceError::Config(_))));
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"currency": ""}}"#).unwrap();

        assert!(matches!(PriceConfig::from_file(&path), Err(PriceError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PriceConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(PriceError::Io(_))));
    }
}
