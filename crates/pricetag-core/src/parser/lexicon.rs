//! Phrases that mean "no charge".

use std::collections::HashSet;

use regex::Regex;

use super::patterns::{SURROUNDING_PUNCTUATION, WHITESPACE_RUN};

/// Built-in no-charge phrases, already normalized.
pub const NO_CHARGE_SYNONYMS: &[&str] = &[
    "free",
    "free of charge",
    "for free",
    "no charge",
    "complimentary",
    "gratis",
    "gratuit",
    "gratuite",
    "gratuito",
    "gratuita",
    "kostenlos",
    "umsonst",
    "darmowy",
    "za darmo",
    "bezpłatnie",
    "zdarma",
    "ingyenes",
    "бесплатно",
    "безкоштовно",
];

lazy_static::lazy_static! {
    /// Normalization rules applied in order: pattern and its replacement.
    static ref NORMALIZATION_RULES: [(&'static Regex, &'static str); 2] = [
        (&*SURROUNDING_PUNCTUATION, ""),
        (&*WHITESPACE_RUN, " "),
    ];
}

/// Set of phrases that resolve to a zero amount.
///
/// Matching is on the whole text after normalization, so `"FREE!"` matches
/// but `"Free shipping"` does not.
#[derive(Debug, Clone)]
pub struct NoChargeLexicon {
    phrases: HashSet<String>,
}

impl NoChargeLexicon {
    /// Lexicon with the built-in phrases only.
    pub fn new() -> Self {
        Self {
            phrases: NO_CHARGE_SYNONYMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add phrases on top of the current ones.
    pub fn with_synonyms<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.phrases.extend(
            extra
                .into_iter()
                .map(|s| Self::normalize(s.as_ref()))
                .filter(|s| !s.is_empty()),
        );
        self
    }

    /// Trim surrounding whitespace and punctuation, collapse inner whitespace, lowercase.
    pub fn normalize(text: &str) -> String {
        let normalized = NORMALIZATION_RULES
            .iter()
            .fold(text.to_string(), |current, (pattern, replacement)| {
                pattern.replace_all(&current, *replacement).into_owned()
            });
        normalized.to_lowercase()
    }

    pub fn matches(&self, text: &str) -> bool {
        let normalized = Self::normalize(text);
        !normalized.is_empty() && self.phrases.contains(&normalized)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Default for NoChargeLexicon {
    fn default() -> Self {
        Self::new()
    }
}
