//! Property tests over generated inputs.

use proptest::prelude::*;
use proptest::sample::select;
use pricetag_core::parser::NO_CHARGE_SYNONYMS;
use pricetag_core::{format_canonical, NoChargeLexicon, Price, SeparatorResolver};
use rust_decimal::Decimal;

const LEADING: &[&str] = &["", " ", "  ", "\t"];
const TRAILING: &[&str] = &["", "!", " .", "  "];

proptest! {
    #[test]
    fn test_canonical_round_trip(mantissa in -1_000_000_000_000_000i64..1_000_000_000_000_000, scale in 0u32..8) {
        let value = Decimal::new(mantissa, scale);
        let text = format_canonical(value);

        let resolved = SeparatorResolver::new().resolve_text(&text, None);
        prop_assert_eq!(resolved, Some(value), "canonical text {}", text);
    }

    #[test]
    fn test_no_digits_no_amount(text in "[^0-9]{0,40}") {
        prop_assume!(!NoChargeLexicon::new().matches(&text));
        prop_assert_eq!(Price::parse(&text, None, None).amount, None);
    }

    #[test]
    fn test_no_charge_phrases(
        phrase in select(NO_CHARGE_SYNONYMS),
        upper in any::<bool>(),
        before in select(LEADING),
        after in select(TRAILING),
    ) {
        let phrase = if upper { phrase.to_uppercase() } else { phrase.to_string() };
        let text = format!("{before}{phrase}{after}");

        let price = Price::parse(&text, Some("USD"), None);
        prop_assert_eq!(price.amount, Some(Decimal::ZERO));
        prop_assert_eq!(price.currency, None);
    }

    #[test]
    fn test_arbitrary_text_keeps_invariants(text in "\\PC{0,60}", hint in proptest::option::of("\\PC{0,10}")) {
        let price = Price::parse(&text, hint.as_deref(), None);
        if price.amount.is_none() {
            prop_assert_eq!(&price.amount_text, &None);
        }
        if let Some(amount_text) = &price.amount_text {
            prop_assert!(price.amount.is_some());
            prop_assert!(text.contains(amount_text.as_str()));
        }
    }
}
