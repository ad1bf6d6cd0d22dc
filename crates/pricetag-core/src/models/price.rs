//! Price model returned by the parser.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PriceError;
use crate::parser::{PriceExtractor, PriceParser};

/// A price extracted from text.
///
/// Fields are public and may be overwritten by the caller; the parser does
/// not revalidate them afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Price amount as an exact decimal.
    pub amount: Option<Decimal>,

    /// Currency text as it appeared in the input or hint.
    pub currency: Option<String>,

    /// Amount text exactly as it appeared, before separator normalization.
    pub amount_text: Option<String>,
}

impl Price {
    /// Create a price from its parts.
    pub fn new(amount: Option<Decimal>, currency: Option<String>, amount_text: Option<String>) -> Self {
        Self {
            amount,
            currency,
            amount_text,
        }
    }

    /// Parse a price from scraped text.
    ///
    /// `currency_hint` is consulted only when `text` names no currency.
    pub fn parse(
        text: &str,
        currency_hint: Option<&str>,
        decimal_separator: Option<DecimalSeparator>,
    ) -> Self {
        PriceParser::new()
            .with_decimal_separator(decimal_separator)
            .extract(text, currency_hint)
    }

    /// Amount as a float, for display and rough comparisons.
    pub fn amount_float(&self) -> Option<f64> {
        self.amount.and_then(|a| a.to_f64())
    }
}

/// Decimal separator accepted as an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecimalSeparator {
    #[serde(rename = ".")]
    Dot,
    #[serde(rename = ",")]
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }
}

impl TryFrom<char> for DecimalSeparator {
    type Error = PriceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Self::Dot),
            ',' => Ok(Self::Comma),
            other => Err(PriceError::InvalidDecimalSeparator(other.to_string())),
        }
    }
}

impl FromStr for DecimalSeparator {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(PriceError::InvalidDecimalSeparator(s.to_string())),
        }
    }
}

impl fmt::Display for DecimalSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Format an amount as dot-decimal text with no grouping.
///
/// A fraction of exactly three digits gets a trailing zero so the text
/// cannot be read back as thousands grouping.
pub fn format_canonical(amount: Decimal) -> String {
    let s = amount.to_string();

    match s.split_once('.') {
        Some((_, fraction)) if fraction.len() == 3 => format!("{s}0"),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decimal_separator_validation() {
        assert_eq!(DecimalSeparator::try_from('.').unwrap(), DecimalSeparator::Dot);
        assert_eq!(DecimalSeparator::try_from(',').unwrap(), DecimalSeparator::Comma);
        assert!(matches!(
            DecimalSeparator::try_from(';'),
            Err(PriceError::InvalidDecimalSeparator(_))
        ));

        assert_eq!(",".parse::<DecimalSeparator>().unwrap(), DecimalSeparator::Comma);
        assert!("..".parse::<DecimalSeparator>().is_err());
        assert!("".parse::<DecimalSeparator>().is_err());
    }

    #[test]
    fn test_amount_float() {
        let price = Price::new(Some(Decimal::from_str("12.50").unwrap()), None, Some("12,50".into()));
        assert_eq!(price.amount_float(), Some(12.5));
        assert_eq!(Price::default().amount_float(), None);
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_canonical(Decimal::from_str("1234.56").unwrap()), "1234.56");
        assert_eq!(format_canonical(Decimal::from_str("140.600").unwrap()), "140.6000");
        assert_eq!(format_canonical(Decimal::from_str("-0.125").unwrap()), "-0.1250");
        assert_eq!(format_canonical(Decimal::from(1550000)), "1550000");
    }

    #[test]
    fn test_fields_are_mutable() {
        let mut price = Price::parse("12,50 €", None, None);
        price.currency = Some("EUR".to_string());
        price.amount = Some(Decimal::from(13));

        assert_eq!(price.currency.as_deref(), Some("EUR"));
        assert_eq!(price.amount_text.as_deref(), Some("12,50"));
    }

    #[test]
    fn test_serializes_amount_as_string() {
        let price = Price::parse("$1,299.00", None, None);
        let json = serde_json::to_value(&price).unwrap();

        assert_eq!(json["amount"], "1299.00");
        assert_eq!(json["currency"], "$");
        assert_eq!(json["amount_text"], "1,299.00");
    }
}
