//! Common regex patterns for price extraction.
//!
//! The regex engine runs in linear time, so none of these can backtrack
//! catastrophically on long scraped strings.

use lazy_static::lazy_static;
use regex::Regex;

use crate::currency::CURRENCY_TABLE;

/// Characters that may sit between two digit groups of one number.
pub const NUMBER_SEPARATORS: &str = ".,'\u{2019} \u{a0}\u{2009}\u{202f}";

lazy_static! {
    // Digit groups, optionally followed by an ambiguous glyph and a fractional group
    pub static ref NUMBER_PATTERN: Regex =
        number_pattern(CURRENCY_TABLE.ambiguous_glyphs()).unwrap();

    // Whitespace and punctuation around a phrase
    pub static ref SURROUNDING_PUNCTUATION: Regex = Regex::new(
        r"^[\s\p{P}]+|[\s\p{P}]+$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}

/// Build the number candidate pattern for a set of ambiguous glyphs.
pub fn number_pattern<'a>(glyphs: impl IntoIterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let separators = regex::escape(NUMBER_SEPARATORS);
    let mut pattern = format!(r"(?P<int>[0-9]+(?:[{separators}][0-9]+)*)");

    let glyphs: Vec<String> = glyphs.into_iter().map(regex::escape).collect();
    if !glyphs.is_empty() {
        pattern.push_str(&format!(
            r"(?:\s*(?P<glyph>{})\s*(?P<frac>[0-9]+))?",
            glyphs.join("|")
        ));
    }

    Regex::new(&pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_pattern_groups() {
        let caps = NUMBER_PATTERN.captures("total 1,235€ 99").unwrap();
        assert_eq!(&caps["int"], "1,235");
        assert_eq!(&caps["glyph"], "€");
        assert_eq!(&caps["frac"], "99");

        let caps = NUMBER_PATTERN.captures("75\u{a0}990,00 Kč").unwrap();
        assert_eq!(&caps["int"], "75\u{a0}990,00");
        assert!(caps.name("glyph").is_none());
    }

    #[test]
    fn test_number_pattern_without_glyphs() {
        let pattern = number_pattern(std::iter::empty()).unwrap();
        let caps = pattern.captures("12€34").unwrap();
        assert_eq!(&caps["int"], "12");
        assert!(caps.name("frac").is_none());
    }
}
