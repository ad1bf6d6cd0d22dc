//! Price extraction from scraped text.
//!
//! The pipeline runs in a fixed order:
//! 1. No-charge phrases short-circuit to a zero amount
//! 2. [`NumberScanner`] splits the text into numeric candidates
//! 3. One candidate is chosen, preferring one next to a currency
//! 4. [`SeparatorResolver`] decides which separator is decimal
//! 5. [`CurrencyMatcher`] picks the currency anchored at that candidate

pub mod assembler;
pub mod lexicon;
pub mod matcher;
pub mod patterns;
pub mod scanner;
pub mod separators;

pub use assembler::PriceParser;
pub use lexicon::{NoChargeLexicon, NO_CHARGE_SYNONYMS};
pub use matcher::{CurrencyChoice, CurrencyMatcher, CurrencySource};
pub use scanner::{NumberScanner, NumericToken, Separator, SeparatorKind, Tokens};
pub use separators::{Decision, ResolvedAmount, SeparatorResolver, SeparatorRule};

use crate::models::price::Price;

/// Trait for price extraction.
pub trait PriceExtractor {
    /// Extract the price from text. Never fails: missing parts are `None`.
    fn extract(&self, text: &str, currency_hint: Option<&str>) -> Price;

    /// Extract every amount in text, left to right.
    fn extract_all(&self, text: &str, currency_hint: Option<&str>) -> Vec<Price>;
}
