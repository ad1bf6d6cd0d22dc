//! Price assembly: ties scanning, separator resolution and currency matching together.

use rust_decimal::Decimal;
use tracing::debug;

use super::lexicon::NoChargeLexicon;
use super::matcher::{CurrencyChoice, CurrencyMatcher, CurrencySource, is_adjacent};
use super::scanner::{leading_sign, NumberScanner, NumericToken};
use super::separators::SeparatorResolver;
use super::PriceExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::price::{DecimalSeparator, Price};

/// Configurable price parser.
///
/// Holds no per-call state, so one parser can serve any number of threads.
#[derive(Debug, Clone)]
pub struct PriceParser {
    /// Forced decimal separator.
    decimal_separator: Option<DecimalSeparator>,
    /// Fallback text searched for a currency.
    currency_hint: Option<String>,
    /// Currency reported verbatim.
    currency: Option<String>,
    lexicon: NoChargeLexicon,
    /// Prefer the first amount next to a currency.
    prefer_amount_near_currency: bool,
    scanner: NumberScanner<'static>,
    resolver: SeparatorResolver,
    matcher: CurrencyMatcher<'static>,
}

impl PriceParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            decimal_separator: None,
            currency_hint: None,
            currency: None,
            lexicon: NoChargeLexicon::new(),
            prefer_amount_near_currency: true,
            scanner: NumberScanner::new(),
            resolver: SeparatorResolver::new(),
            matcher: CurrencyMatcher::new(),
        }
    }

    /// Create a parser from an extraction config.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut parser = Self::new()
            .with_decimal_separator(config.decimal_separator)
            .with_no_charge_synonyms(&config.no_charge_synonyms)
            .with_amount_near_currency(config.prefer_amount_near_currency);
        parser.currency_hint = config.currency_hint.clone();
        parser.currency = config.currency.clone();
        parser
    }

    /// Set the decimal separator, or `None` to guess it.
    pub fn with_decimal_separator(mut self, decimal_separator: Option<DecimalSeparator>) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }

    /// Set the default currency hint.
    pub fn with_currency_hint(mut self, hint: impl Into<String>) -> Self {
        self.currency_hint = Some(hint.into());
        self
    }

    /// Report this currency instead of searching for one.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Add no-charge phrases.
    pub fn with_no_charge_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lexicon = self.lexicon.with_synonyms(synonyms);
        self
    }

    /// Set whether an amount next to a currency beats the first amount.
    pub fn with_amount_near_currency(mut self, prefer: bool) -> Self {
        self.prefer_amount_near_currency = prefer;
        self
    }

    /// Pick the numeric candidate to report.
    fn choose_token<'t>(&self, text: &'t str, tokens: Vec<NumericToken<'t>>) -> Option<NumericToken<'t>> {
        if self.prefer_amount_near_currency {
            let currencies = self.matcher.table().find_all(text);
            if let Some(index) = tokens
                .iter()
                .position(|t| currencies.iter().any(|m| is_adjacent(text, m, t.span())))
            {
                debug!("Using candidate {} next to a currency", index);
                return tokens.into_iter().nth(index);
            }
        }

        tokens.into_iter().next()
    }

    /// Build the price for one token.
    fn assemble(&self, text: &str, token: Option<&NumericToken<'_>>, hint: Option<&str>) -> Price {
        let resolved = token.and_then(|t| self.resolver.resolve(t, self.decimal_separator));
        if let Some(resolved) = &resolved {
            debug!("Amount {} from {:?} via {:?}", resolved.value, resolved.text, resolved.rule);
        }

        let choice = self.matcher.find(
            text,
            hint.or(self.currency_hint.as_deref()),
            self.currency.as_deref(),
            token.map(NumericToken::span),
        );
        if let Some(choice) = &choice {
            debug!("Currency {:?} from {:?}", choice.text, choice.source);
        }

        let mut amount = resolved.as_ref().map(|r| r.value);
        if let (Some(value), Some(token), Some(choice)) = (amount.as_mut(), token, &choice) {
            if signed_by_currency(text, token, choice) && value.is_sign_positive() && !value.is_zero() {
                value.set_sign_negative(true);
            }
        }

        Price {
            amount,
            currency: choice.map(|c| c.text),
            amount_text: resolved.map(|r| r.text.to_string()),
        }
    }
}

impl Default for PriceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceExtractor for PriceParser {
    fn extract(&self, text: &str, currency_hint: Option<&str>) -> Price {
        if self.lexicon.matches(text) {
            debug!("No-charge phrase {:?}", text.trim());
            return Price {
                amount: Some(Decimal::ZERO),
                currency: None,
                amount_text: Some(text.trim().to_string()),
            };
        }

        let tokens: Vec<_> = self.scanner.scan(text).collect();
        debug!("Found {} numeric candidates", tokens.len());

        let token = self.choose_token(text, tokens);
        self.assemble(text, token.as_ref(), currency_hint)
    }

    fn extract_all(&self, text: &str, currency_hint: Option<&str>) -> Vec<Price> {
        if self.lexicon.matches(text) {
            return vec![self.extract(text, currency_hint)];
        }

        self.scanner
            .scan(text)
            .map(|token| self.assemble(text, Some(&token), currency_hint))
            .filter(|price| price.amount.is_some())
            .collect()
    }
}

/// `-$12`: a minus directly before a currency that precedes the amount.
fn signed_by_currency(text: &str, token: &NumericToken<'_>, choice: &CurrencyChoice) -> bool {
    let Some((start, end)) = choice.span else {
        return false;
    };
    if choice.source != CurrencySource::Adjacent || end > token.start {
        return false;
    }

    leading_sign(text, start)
}
