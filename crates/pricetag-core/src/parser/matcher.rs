//! Currency matching anchored at the chosen amount.

use std::cmp::Reverse;

use tracing::debug;

use crate::currency::{CurrencyMatch, CurrencySymbolTable, CURRENCY_TABLE};

/// Where the currency came from, most trusted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CurrencySource {
    /// Supplied by the caller and used verbatim.
    Explicit,
    /// Written next to the amount in the main text.
    Adjacent,
    /// Found elsewhere in the main text.
    Text,
    /// Found in the hint text.
    Hint,
}

/// The currency chosen for a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyChoice {
    /// Currency text as it appeared.
    pub text: String,
    /// ISO code of the matched alias, when known.
    pub code: Option<String>,
    pub source: CurrencySource,
    /// Byte span in the main text, for `Adjacent` and `Text` sources.
    pub span: Option<(usize, usize)>,
}

/// Finds the currency for an amount.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyMatcher<'a> {
    table: &'a CurrencySymbolTable,
}

impl CurrencyMatcher<'static> {
    /// Matcher over the process-wide currency table.
    pub fn new() -> Self {
        Self::with_table(&CURRENCY_TABLE)
    }
}

impl Default for CurrencyMatcher<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CurrencyMatcher<'a> {
    pub fn with_table(table: &'a CurrencySymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a CurrencySymbolTable {
        self.table
    }

    /// Pick the currency for an amount at `anchor` in `main`.
    ///
    /// Preference: explicit value, alias adjacent to the anchor, any alias in
    /// `main`, any alias in `hint`. Within a tier the highest priority wins,
    /// then the leftmost. The explicit value is returned exactly as given; a
    /// blank one counts as absent.
    pub fn find(
        &self,
        main: &str,
        hint: Option<&str>,
        explicit: Option<&str>,
        anchor: Option<(usize, usize)>,
    ) -> Option<CurrencyChoice> {
        if let Some(explicit) = explicit.filter(|s| !s.trim().is_empty()) {
            return Some(CurrencyChoice {
                text: explicit.to_string(),
                code: None,
                source: CurrencySource::Explicit,
                span: None,
            });
        }

        let candidates = self.table.find_all(main);

        if let Some(anchor) = anchor {
            let adjacent = candidates
                .iter()
                .filter(|m| is_adjacent(main, m, anchor));
            if let Some(best) = best_of(adjacent) {
                return Some(choice(best, CurrencySource::Adjacent, true));
            }
        }

        if let Some(best) = best_of(candidates.iter()) {
            return Some(choice(best, CurrencySource::Text, true));
        }

        let hint = hint?;
        let hinted = self.table.find_all(hint);
        let chosen = best_of(hinted.iter()).map(|m| choice(m, CurrencySource::Hint, false));
        if chosen.is_none() {
            debug!("No currency in text or hint");
        }
        chosen
    }
}

/// Whether a currency match touches the span, with only whitespace or a sign between.
pub fn is_adjacent(text: &str, candidate: &CurrencyMatch<'_>, (start, end): (usize, usize)) -> bool {
    if candidate.start < end && start < candidate.end {
        return true;
    }

    let gap = if candidate.end <= start {
        &text[candidate.end..start]
    } else {
        &text[end..candidate.start]
    };
    gap.chars().all(|c| c.is_whitespace() || c == '-' || c == '\u{2212}')
}

fn best_of<'m, 'a: 'm>(candidates: impl Iterator<Item = &'m CurrencyMatch<'a>>) -> Option<&'m CurrencyMatch<'a>> {
    candidates.min_by_key(|m| (Reverse(m.priority()), m.start))
}

fn choice(found: &CurrencyMatch<'_>, source: CurrencySource, in_main: bool) -> CurrencyChoice {
    CurrencyChoice {
        text: found.text.trim().to_string(),
        code: found.entry.code.clone(),
        source,
        span: in_main.then_some((found.start, found.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn find(main: &str, hint: Option<&str>, anchor: Option<(usize, usize)>) -> Option<(String, CurrencySource)> {
        CurrencyMatcher::new()
            .find(main, hint, None, anchor)
            .map(|c| (c.text, c.source))
    }

    #[test]
    fn test_explicit_override() {
        let choice = CurrencyMatcher::new()
            .find("12 €", Some("USD"), Some("GBP"), Some((0, 2)))
            .unwrap();
        assert_eq!(choice.text, "GBP");
        assert_eq!(choice.source, CurrencySource::Explicit);

        // Used as given, not looked up or normalized
        let choice = CurrencyMatcher::new()
            .find("12", None, Some("zł (PLN)"), None)
            .unwrap();
        assert_eq!(choice.text, "zł (PLN)");
    }

    #[test]
    fn test_blank_explicit_is_ignored() {
        let choice = CurrencyMatcher::new()
            .find("12 €", None, Some("  "), Some((0, 2)))
            .unwrap();
        assert_eq!(choice.text, "€");
        assert_eq!(choice.source, CurrencySource::Adjacent);
    }

    #[test]
    fn test_adjacent_wins_over_elsewhere() {
        // "Kč" is next to the amount, "$" is not
        assert_eq!(
            find("$ shipping, 75 990,00 Kč", None, Some((12, 21))),
            Some(("Kč".to_string(), CurrencySource::Adjacent))
        );
    }

    #[test]
    fn test_adjacent_tie_break() {
        // Codes outrank glyphs
        assert_eq!(find("$ 12 USD", None, Some((2, 4))).unwrap().0, "USD");
        // Same priority on both sides: leftmost
        assert_eq!(find("€ 12 £", None, Some((4, 6))).unwrap().0, "€");
        // Longer alias outranks a shorter one of the same kind
        assert_eq!(find("US$ 12 $", None, Some((4, 6))).unwrap().0, "US$");
    }

    #[test]
    fn test_text_then_hint() {
        assert_eq!(
            find("R$", None, None),
            Some(("R$".to_string(), CurrencySource::Text))
        );
        assert_eq!(
            find("12.99", Some("Prices in EUR"), Some((0, 5))),
            Some(("EUR".to_string(), CurrencySource::Hint))
        );
        // Main text is preferred over the hint
        assert_eq!(find("12 руб.", Some("USD"), Some((0, 2))).unwrap().0, "руб.");
        assert_eq!(find("12.99", Some("nothing"), Some((0, 5))), None);
    }

    #[test]
    fn test_glyph_inside_amount_is_adjacent() {
        let choice = CurrencyMatcher::new()
            .find("1,235€ 99", None, None, Some((0, 11)))
            .unwrap();
        assert_eq!(choice.text, "€");
        assert_eq!(choice.source, CurrencySource::Adjacent);
        assert_eq!(choice.code.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_redundant_suffix_in_choice() {
        let choice = CurrencyMatcher::new()
            .find("NZD $123", None, None, Some((5, 8)))
            .unwrap();
        assert_eq!(choice.text, "NZD");
        assert_eq!(choice.source, CurrencySource::Adjacent);
    }
}
