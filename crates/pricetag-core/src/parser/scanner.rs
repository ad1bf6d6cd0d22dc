//! Numeric candidate scanning.

use regex::{Captures, Regex};
use tracing::trace;

use super::patterns::{number_pattern, NUMBER_PATTERN};
use crate::currency::{CurrencySymbolTable, CURRENCY_TABLE};
use crate::error::Result;

/// Role a non-digit character plays inside a numeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    /// `.` or `,`: may be decimal or thousands.
    Mark,
    /// Space-like or apostrophe: always thousands grouping.
    Grouping,
    /// Ambiguous currency glyph between integer and fractional digits.
    Currency,
}

/// A separator occurrence inside a numeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    pub ch: char,
    /// Byte offset within the token text.
    pub offset: usize,
    pub kind: SeparatorKind,
}

/// A candidate number found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericToken<'t> {
    /// Byte offset of the first digit.
    pub start: usize,
    /// Byte offset after the last digit.
    pub end: usize,
    /// Raw text between `start` and `end`.
    pub text: &'t str,
    /// A minus sign applies to this number.
    pub negative: bool,
    /// Separators in order of appearance.
    pub separators: Vec<Separator>,
}

impl<'t> NumericToken<'t> {
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn has_digits(&self) -> bool {
        self.text.bytes().any(|b| b.is_ascii_digit())
    }

    /// The ambiguous glyph acting as decimal separator, if any.
    pub fn currency_separator(&self) -> Option<&Separator> {
        self.separators
            .iter()
            .find(|s| s.kind == SeparatorKind::Currency)
    }

    /// The token cut before its currency glyph.
    pub fn integer_part(&self) -> NumericToken<'t> {
        let Some(glyph) = self.currency_separator() else {
            return self.clone();
        };

        let text = self.text[..glyph.offset].trim_end();
        NumericToken {
            start: self.start,
            end: self.start + text.len(),
            text,
            negative: self.negative,
            separators: self
                .separators
                .iter()
                .filter(|s| s.offset < text.len())
                .copied()
                .collect(),
        }
    }
}

/// Splits text into numeric candidates.
///
/// The scanner only segments; which separator is decimal is decided later.
#[derive(Debug, Clone)]
pub struct NumberScanner<'a> {
    pattern: Regex,
    table: &'a CurrencySymbolTable,
}

impl NumberScanner<'static> {
    /// Scanner using the process-wide table.
    pub fn new() -> Self {
        Self {
            pattern: NUMBER_PATTERN.clone(),
            table: &CURRENCY_TABLE,
        }
    }
}

impl Default for NumberScanner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> NumberScanner<'a> {
    /// Scanner using the currencies of a custom table.
    pub fn with_table(table: &'a CurrencySymbolTable) -> Result<Self> {
        Ok(Self {
            pattern: number_pattern(table.ambiguous_glyphs())?,
            table,
        })
    }

    /// Lazily scan `text` for numeric candidates, left to right.
    pub fn scan<'s, 't>(&'s self, text: &'t str) -> Tokens<'s, 't> {
        Tokens {
            pattern: &self.pattern,
            table: self.table,
            text,
            position: 0,
            currency_ends: None,
        }
    }
}

/// Iterator over the numeric candidates of one text.
#[derive(Debug, Clone)]
pub struct Tokens<'s, 't> {
    pattern: &'s Regex,
    table: &'s CurrencySymbolTable,
    text: &'t str,
    position: usize,
    /// End offsets of the currencies in `text`, found on first use.
    currency_ends: Option<Vec<usize>>,
}

impl Tokens<'_, '_> {
    /// `€20 €15`: a number led by its own currency is a price, not the
    /// integer part of a glyph fraction.
    fn led_by_currency(&mut self, start: usize) -> bool {
        let (table, text) = (self.table, self.text);
        let ends = self
            .currency_ends
            .get_or_insert_with(|| table.find_all(text).iter().map(|m| m.end).collect());

        ends.iter().any(|&end| {
            end <= start
                && text[end..start]
                    .chars()
                    .all(|c| c.is_whitespace() || c == '-' || c == '\u{2212}')
        })
    }
}

impl<'t> Iterator for Tokens<'_, 't> {
    type Item = NumericToken<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;

        while self.position < text.len() {
            let caps = self.pattern.captures_at(text, self.position)?;
            let int = caps.name("int")?;

            let start = int.start();
            let int_end = grouped_end(text, start, int.end());
            let mut end = int_end;
            let mut glyph = None;

            if int_end == int.end() {
                if let Some((g, frac_end)) = fraction_tail(text, &caps) {
                    if self.led_by_currency(start) {
                        trace!("Not joining {:?} to a currency-led number", &text[g..frac_end]);
                    } else {
                        glyph = Some(g);
                        end = frac_end;
                    }
                }
            }

            self.position = end;

            if text[end..].trim_start().starts_with('%') {
                trace!("Skipping percentage {:?}", &text[start..end]);
                continue;
            }

            let token = build_token(text, start, int_end, end, glyph);
            trace!("Numeric candidate {:?} at {}..{}", token.text, token.start, token.end);
            return Some(token);
        }

        None
    }
}

fn is_grouping(c: char) -> bool {
    matches!(c, ' ' | '\u{a0}' | '\u{2009}' | '\u{202f}' | '\'' | '\u{2019}')
}

/// Cut the integer run before a grouping separator not followed by exactly three digits.
fn grouped_end(text: &str, start: usize, end: usize) -> usize {
    let run = &text[start..end];

    for (i, c) in run.char_indices() {
        if is_grouping(c) {
            let digits = run[i + c.len_utf8()..]
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
            if digits != 3 {
                return start + i;
            }
        }
    }

    end
}

/// Glyph offset and end of a valid `€ 99` style fraction.
fn fraction_tail(text: &str, caps: &Captures<'_>) -> Option<(usize, usize)> {
    let glyph = caps.name("glyph")?;
    let frac = caps.name("frac")?;

    if frac.as_str().len() != 2 {
        return None;
    }

    let rest = &text[frac.end()..];
    let mut chars = rest.chars();
    if let (Some('.' | ','), Some(c)) = (chars.next(), chars.next()) {
        if c.is_ascii_digit() {
            return None;
        }
    }

    // `99 € 95 €`: the second number carries its own glyph
    let next = rest.trim_start();
    if next.starts_with(glyph.as_str()) || next.starts_with('%') {
        return None;
    }

    Some((glyph.start(), frac.end()))
}

fn build_token(text: &str, start: usize, int_end: usize, end: usize, glyph: Option<usize>) -> NumericToken<'_> {
    let mut separators: Vec<Separator> = text[start..int_end]
        .char_indices()
        .filter_map(|(offset, ch)| {
            let kind = match ch {
                '.' | ',' => SeparatorKind::Mark,
                c if is_grouping(c) => SeparatorKind::Grouping,
                _ => return None,
            };
            Some(Separator { ch, offset, kind })
        })
        .collect();

    if let Some(position) = glyph {
        if let Some(ch) = text[position..].chars().next() {
            separators.push(Separator {
                ch,
                offset: position - start,
                kind: SeparatorKind::Currency,
            });
        }
    }

    NumericToken {
        start,
        end,
        text: &text[start..end],
        negative: leading_sign(text, start) || trailing_sign(text, end),
        separators,
    }
}

/// Minus sign ending `text[..start]`: `-12`, `- 12`.
///
/// Not the second half of a range (`10-20`) or a hyphenated word (`SKU-12`).
pub(crate) fn leading_sign(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end_matches(' ');
    let Some(rest) = before.strip_suffix(['-', '\u{2212}']) else {
        return false;
    };

    !rest.ends_with(char::is_alphabetic) && !rest.trim_end().ends_with(|c: char| c.is_ascii_digit())
}

/// `12.50-` as written on statements, but not `1-2` or `5-pack`.
fn trailing_sign(text: &str, end: usize) -> bool {
    let mut after = text[end..].chars();
    after.next() == Some('-') && !after.next().is_some_and(|c| c.is_ascii_digit() || c.is_alphabetic())
}
