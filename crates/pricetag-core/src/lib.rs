//! Core library for price extraction from scraped text.
//!
//! This crate provides:
//! - A static currency alias table (symbols, ISO codes, national abbreviations)
//! - Numeric candidate scanning over noisy text
//! - Decimal/thousands separator disambiguation
//! - Currency matching anchored at the chosen amount
//! - The `Price` model and a configurable `PriceParser`

pub mod currency;
pub mod error;
pub mod models;
pub mod parser;

pub use currency::{AliasKind, CurrencyMatch, CurrencySymbolTable, CurrencyTableEntry, CURRENCY_TABLE};
pub use error::{PriceError, Result};
pub use models::config::{ExtractionConfig, PriceConfig};
pub use models::price::{format_canonical, DecimalSeparator, Price};
pub use parser::{
    CurrencyMatcher, NoChargeLexicon, NumberScanner, NumericToken, PriceExtractor, PriceParser,
    ResolvedAmount, SeparatorResolver,
};

/// Parse a price from `text`, validating the decimal separator at the boundary.
///
/// `decimal_separator` must be `'.'`, `','` or absent; anything else is a
/// caller error and is reported as [`PriceError::InvalidDecimalSeparator`].
pub fn parse_price(
    text: &str,
    currency_hint: Option<&str>,
    decimal_separator: Option<char>,
) -> Result<Price> {
    let decimal_separator = decimal_separator.map(DecimalSeparator::try_from).transpose()?;
    Ok(Price::parse(text, currency_hint, decimal_separator))
}
