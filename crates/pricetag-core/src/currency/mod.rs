//! Currency symbol table.
//!
//! The table is built once from embedded data and only read afterwards,
//! so the process-wide [`CURRENCY_TABLE`] can be shared across threads
//! without locking.

pub mod data;
mod table;

pub use table::CurrencySymbolTable;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Process-wide currency table built from the embedded data file.
    pub static ref CURRENCY_TABLE: CurrencySymbolTable =
        CurrencySymbolTable::embedded().expect("embedded currency table compiles");
}

/// How much an alias can be trusted to mean a currency, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasKind {
    /// National symbols and abbreviations that also occur in ordinary text.
    Loose,
    /// Curated glyphs and words that are a currency wherever they appear.
    Symbol,
    /// Three-letter ISO code.
    Code,
}

/// One alias in the currency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyTableEntry {
    /// Alias text as listed in the table.
    pub alias: String,
    /// ISO code this alias stands for, when it is unambiguous.
    pub code: Option<String>,
    /// Reliability class.
    pub kind: AliasKind,
    /// Glyph may act as a decimal separator between two digit groups.
    pub ambiguous: bool,
    /// Alias matches regardless of letter case.
    pub case_insensitive: bool,
}

impl CurrencyTableEntry {
    /// Priority weight: reliability first, then specificity (alias length).
    pub fn priority(&self) -> (AliasKind, usize) {
        (self.kind, self.alias.chars().count())
    }

    /// Whether every character of the alias is a letter.
    pub fn is_alphabetic(&self) -> bool {
        self.alias.chars().all(char::is_alphabetic)
    }
}

/// A currency alias found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyMatch<'a> {
    /// Byte offset where the alias starts.
    pub start: usize,
    /// Byte offset where the match ends, including any absorbed suffix glyph.
    pub end: usize,
    /// Currency text as it appeared in the source, without absorbed suffixes.
    pub text: &'a str,
    /// Table entry that matched.
    pub entry: &'a CurrencyTableEntry,
}

impl CurrencyMatch<'_> {
    /// Priority weight of the matched entry.
    pub fn priority(&self) -> (AliasKind, usize) {
        self.entry.priority()
    }

    /// Whether the match span covers the byte offset.
    pub fn covers(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }
}
