//! WASM bindings for price extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use pricetag_core::{DecimalSeparator, Price, PriceConfig, PriceError, PriceExtractor, PriceParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Price as handed to JavaScript. The amount stays a string so no precision is lost.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct PriceJs {
    amount: Option<String>,
    amount_float: Option<f64>,
    currency: Option<String>,
    amount_text: Option<String>,
}

impl From<&Price> for PriceJs {
    fn from(price: &Price) -> Self {
        Self {
            amount: price.amount.map(|a| a.to_string()),
            amount_float: price.amount_float(),
            currency: price.currency.clone(),
            amount_text: price.amount_text.clone(),
        }
    }
}

fn decimal_separator(value: Option<String>) -> Result<Option<DecimalSeparator>, PriceError> {
    value.as_deref().map(str::parse).transpose()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

fn js_error(error: PriceError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// Parse a price from text.
///
/// Returns `{amount, amount_float, currency, amount_text}`. Throws when the
/// decimal separator is anything other than "." or ",".
#[wasm_bindgen]
pub fn parse_price(
    text: &str,
    currency_hint: Option<String>,
    decimal_separator: Option<String>,
) -> Result<JsValue, JsValue> {
    let separator = self::decimal_separator(decimal_separator).map_err(js_error)?;
    let price = Price::parse(text, currency_hint.as_deref(), separator);
    to_js(&PriceJs::from(&price))
}

/// Price parser class for browser use.
#[wasm_bindgen]
pub struct PriceTagParser {
    parser: PriceParser,
}

#[wasm_bindgen]
impl PriceTagParser {
    /// Create a parser with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: PriceParser::new(),
        }
    }

    /// Create a parser from a JSON configuration document.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<PriceTagParser, JsValue> {
        let config: PriceConfig = serde_json::from_str(json)
            .map_err(|e| js_error(PriceError::Json(e)))?;
        config.validate().map_err(js_error)?;

        Ok(Self {
            parser: PriceParser::from_config(&config.extraction),
        })
    }

    /// Force a decimal separator, or pass nothing to guess it again.
    #[wasm_bindgen]
    pub fn set_decimal_separator(&mut self, separator: Option<String>) -> Result<(), JsValue> {
        let separator = decimal_separator(separator).map_err(js_error)?;
        self.parser = std::mem::take(&mut self.parser).with_decimal_separator(separator);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_currency_hint(&mut self, hint: String) {
        self.parser = std::mem::take(&mut self.parser).with_currency_hint(hint);
    }

    #[wasm_bindgen]
    pub fn add_no_charge_synonym(&mut self, phrase: String) {
        self.parser = std::mem::take(&mut self.parser).with_no_charge_synonyms([phrase]);
    }

    /// Extract the price from text.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str, currency_hint: Option<String>) -> Result<JsValue, JsValue> {
        let price = self.parser.extract(text, currency_hint.as_deref());
        to_js(&PriceJs::from(&price))
    }

    /// Extract every amount in text as an array.
    #[wasm_bindgen]
    pub fn parse_all(&self, text: &str, currency_hint: Option<String>) -> Result<JsValue, JsValue> {
        let prices: Vec<PriceJs> = self
            .parser
            .extract_all(text, currency_hint.as_deref())
            .iter()
            .map(PriceJs::from)
            .collect();
        to_js(&prices)
    }
}

impl Default for PriceTagParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decimal_separator() {
        assert_eq!(decimal_separator(None).unwrap(), None);
        assert_eq!(
            decimal_separator(Some(",".to_string())).unwrap(),
            Some(DecimalSeparator::Comma)
        );
        assert!(decimal_separator(Some(";".to_string())).is_err());
    }

    #[wasm_bindgen_test]
    fn test_price_js_keeps_exact_amount() {
        let price = Price::parse("1,235€ 99", None, None);
        let js = PriceJs::from(&price);

        assert_eq!(js.amount.as_deref(), Some("1235.99"));
        assert!((js.amount_float.unwrap() - 1235.99).abs() < 0.001);
        assert_eq!(js.currency.as_deref(), Some("€"));
        assert_eq!(js.amount_text.as_deref(), Some("1,235€ 99"));
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
