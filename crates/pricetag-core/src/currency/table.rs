//! Alias table construction and lookup.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use super::data::{self, REDUNDANT_SUFFIXES};
use super::{AliasKind, CurrencyMatch, CurrencyTableEntry};
use crate::error::Result;

/// Immutable lexicon of currency aliases.
///
/// Matching is leftmost-longest: at any position the longest alias wins, so
/// `R$` is never reported as a bare `$`.
#[derive(Debug)]
pub struct CurrencySymbolTable {
    entries: Vec<CurrencyTableEntry>,
    exact: HashMap<String, usize>,
    folded: HashMap<String, usize>,
    pattern: Regex,
}

impl CurrencySymbolTable {
    /// Build the table from the embedded data file.
    pub fn embedded() -> Result<Self> {
        Self::from_data(data::CURRENCIES_TSV)
    }

    /// Build the table from tab-separated currency records.
    pub fn from_data(tsv: &str) -> Result<Self> {
        let records = data::records(tsv);
        let mut builder = TableBuilder::default();

        for record in &records {
            builder.add(record.code, AliasKind::Code, Some(record.code));
        }
        for record in &records {
            for symbol in record.symbols() {
                builder.add(symbol, AliasKind::Loose, Some(record.code));
            }
        }
        for (alias, code) in data::EXTRA_LOOSE_ALIASES {
            builder.add(alias, AliasKind::Loose, Some(code));
        }
        for alias in data::SYMBOL_ALIASES {
            builder.add(alias, AliasKind::Symbol, None);
        }

        let table = builder.build()?;
        debug!(
            "Built currency table with {} aliases from {} records",
            table.len(),
            records.len()
        );
        Ok(table)
    }

    /// All entries in the table.
    pub fn entries(&self) -> &[CurrencyTableEntry] {
        &self.entries
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for an alias, compared exactly.
    pub fn get(&self, alias: &str) -> Option<&CurrencyTableEntry> {
        self.exact.get(alias).map(|&i| &self.entries[i])
    }

    /// Glyphs flagged as possible decimal separators.
    pub fn ambiguous_glyphs(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.ambiguous)
            .map(|e| e.alias.as_str())
    }

    /// Best alias covering or starting at `position`.
    pub fn lookup<'a>(&'a self, text: &'a str, position: usize) -> Option<CurrencyMatch<'a>> {
        self.find_all(text).into_iter().find(|m| m.covers(position))
    }

    /// All non-overlapping aliases in `text`, left to right.
    pub fn find_all<'a>(&'a self, text: &'a str) -> Vec<CurrencyMatch<'a>> {
        let mut matches = Vec::new();
        let mut position = 0;

        while position < text.len() {
            let Some(found) = self.pattern.find_at(text, position) else {
                break;
            };

            let entry = match self.resolve(found.as_str()) {
                Some(entry) if at_word_edges(text, found.start(), found.end()) => entry,
                _ => {
                    position = next_char_boundary(text, found.start());
                    continue;
                }
            };

            let end = absorb_suffix(entry, text, found.end());
            matches.push(CurrencyMatch {
                start: found.start(),
                end,
                text: found.as_str(),
                entry,
            });
            position = end;
        }

        matches
    }

    /// Entry for matched text; a case-folded alias may outrank an exact one.
    fn resolve(&self, matched: &str) -> Option<&CurrencyTableEntry> {
        let exact = self.exact.get(matched).map(|&i| &self.entries[i]);
        let folded = self
            .folded
            .get(&matched.to_lowercase())
            .map(|&i| &self.entries[i]);

        match (exact, folded) {
            (Some(a), Some(b)) if b.priority() > a.priority() => Some(b),
            (a, b) => a.or(b),
        }
    }
}

/// Aliases collected before the table is frozen.
#[derive(Default)]
struct TableBuilder {
    pending: Vec<PendingEntry>,
    positions: HashMap<String, usize>,
}

struct PendingEntry {
    alias: String,
    kind: AliasKind,
    codes: Vec<String>,
}

impl TableBuilder {
    fn add(&mut self, alias: &str, kind: AliasKind, code: Option<&str>) {
        let alias = alias.trim();
        if !is_usable_alias(alias) {
            return;
        }

        match self.positions.get(alias) {
            Some(&i) => {
                let entry = &mut self.pending[i];
                entry.kind = entry.kind.max(kind);
                if let Some(code) = code {
                    if !entry.codes.iter().any(|c| c == code) {
                        entry.codes.push(code.to_string());
                    }
                }
            }
            None => {
                self.positions.insert(alias.to_string(), self.pending.len());
                self.pending.push(PendingEntry {
                    alias: alias.to_string(),
                    kind,
                    codes: code.map(|c| vec![c.to_string()]).unwrap_or_default(),
                });
            }
        }
    }

    fn build(self) -> Result<CurrencySymbolTable> {
        let entries: Vec<CurrencyTableEntry> = self
            .pending
            .into_iter()
            .map(|p| {
                let code = data::PREFERRED_CODES
                    .iter()
                    .find(|(alias, _)| *alias == p.alias)
                    .map(|(_, code)| code.to_string())
                    .or_else(|| match p.codes.as_slice() {
                        [only] => Some(only.clone()),
                        _ => None,
                    });
                let case_insensitive =
                    p.kind == AliasKind::Symbol && p.alias.chars().all(char::is_alphabetic);
                let ambiguous = data::AMBIGUOUS_GLYPHS.contains(&p.alias.as_str());

                CurrencyTableEntry {
                    alias: p.alias,
                    code,
                    kind: p.kind,
                    ambiguous,
                    case_insensitive,
                }
            })
            .collect();

        let mut exact = HashMap::new();
        let mut folded = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            exact.insert(entry.alias.clone(), i);
            if entry.case_insensitive {
                folded.insert(entry.alias.to_lowercase(), i);
            }
        }

        // Longest first: the regex engine prefers earlier alternatives.
        let mut order: Vec<&CurrencyTableEntry> = entries.iter().collect();
        order.sort_by(|a, b| {
            b.alias
                .chars()
                .count()
                .cmp(&a.alias.chars().count())
                .then_with(|| a.alias.cmp(&b.alias))
        });
        let alternatives: Vec<String> = order
            .iter()
            .map(|e| {
                let escaped = regex::escape(&e.alias);
                if e.case_insensitive {
                    format!("(?i:{escaped})")
                } else {
                    escaped
                }
            })
            .collect();
        let pattern = Regex::new(&alternatives.join("|"))?;

        Ok(CurrencySymbolTable {
            entries,
            exact,
            folded,
            pattern,
        })
    }
}

fn is_usable_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    let single_capital = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase());

    !alias.is_empty() && !single_capital && !data::PLACEHOLDER_ALIASES.contains(&alias)
}

/// Alphabetic alias ends must not run into neighbouring letters.
fn at_word_edges(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let starts_with_letter = matched.chars().next().is_some_and(char::is_alphabetic);
    let ends_with_letter = matched.chars().next_back().is_some_and(char::is_alphabetic);

    let letter_before = text[..start].chars().next_back().is_some_and(char::is_alphabetic);
    let letter_after = text[end..].chars().next().is_some_and(char::is_alphabetic);

    !(starts_with_letter && letter_before) && !(ends_with_letter && letter_after)
}

fn next_char_boundary(text: &str, position: usize) -> usize {
    position + text[position..].chars().next().map_or(1, char::len_utf8)
}

/// Extend the span over a redundant glyph trailing an alphabetic alias.
fn absorb_suffix(entry: &CurrencyTableEntry, text: &str, end: usize) -> usize {
    if !entry.is_alphabetic() {
        return end;
    }

    let rest = &text[end..];
    for rule in REDUNDANT_SUFFIXES {
        let candidate = if rule.allow_whitespace {
            rest.trim_start()
        } else {
            rest
        };
        if candidate.starts_with(rule.glyph) {
            return end + (rest.len() - candidate.len()) + rule.glyph.len();
        }
    }

    end
}
