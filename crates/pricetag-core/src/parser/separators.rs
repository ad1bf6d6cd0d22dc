//! Decimal vs. thousands separator resolution.
//!
//! Each heuristic is a separate rule in [`RULES`], tried in order; the first
//! rule that returns a [`Decision`] wins.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::scanner::{NumberScanner, NumericToken, SeparatorKind};
use crate::models::price::DecimalSeparator;

/// Which rule decided the decimal separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorRule {
    /// Caller supplied the decimal separator.
    Override,
    /// An ambiguous currency glyph sits between integer and fraction.
    CurrencyGlyph,
    /// Both `.` and `,` occur; the rightmost is decimal.
    MixedMarks,
    /// One mark type occurs; the final group length decides.
    SingleMark,
    /// No marks at all.
    GroupingOnly,
}

/// Outcome of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Every separator groups thousands.
    Integer,
    /// The separator at this index is decimal; all others group thousands.
    DecimalAt(usize),
}

type RuleFn = fn(&NumericToken<'_>, Option<DecimalSeparator>) -> Option<Decision>;

/// Decision table, in priority order.
pub const RULES: &[(SeparatorRule, RuleFn)] = &[
    (SeparatorRule::Override, override_rule),
    (SeparatorRule::CurrencyGlyph, currency_glyph_rule),
    (SeparatorRule::MixedMarks, mixed_marks_rule),
    (SeparatorRule::SingleMark, single_mark_rule),
    (SeparatorRule::GroupingOnly, grouping_only_rule),
];

/// An amount resolved from a numeric token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAmount<'t> {
    /// Exact value.
    pub value: Decimal,
    /// Text consumed, as it appeared in the source.
    pub text: &'t str,
    pub start: usize,
    pub end: usize,
    /// Rule that decided the separators.
    pub rule: SeparatorRule,
}

/// Turns numeric tokens into exact decimal amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatorResolver;

impl SeparatorResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a token, or `None` when it holds no parseable number.
    pub fn resolve<'t>(
        &self,
        token: &NumericToken<'t>,
        decimal_separator: Option<DecimalSeparator>,
    ) -> Option<ResolvedAmount<'t>> {
        // An explicit separator outranks the glyph; the fraction is left unconsumed
        let token = match decimal_separator {
            Some(_) if token.currency_separator().is_some() => token.integer_part(),
            _ => token.clone(),
        };

        if !token.has_digits() {
            return None;
        }

        let (rule, decision) = decide(&token, decimal_separator);
        let normalized = normalize(&token, decision);
        let mut value = Decimal::from_str(&normalized).ok()?;
        if token.negative && !value.is_zero() {
            value.set_sign_negative(true);
        }

        trace!("Resolved {:?} to {} via {:?}", token.text, value, rule);

        Some(ResolvedAmount {
            value,
            text: token.text,
            start: token.start,
            end: token.end,
            rule,
        })
    }

    /// Resolve the first numeric candidate in `text`.
    pub fn resolve_text(&self, text: &str, decimal_separator: Option<DecimalSeparator>) -> Option<Decimal> {
        let token = NumberScanner::new().scan(text).next()?;
        self.resolve(&token, decimal_separator).map(|r| r.value)
    }
}

/// Run the decision table.
pub fn decide(token: &NumericToken<'_>, decimal_separator: Option<DecimalSeparator>) -> (SeparatorRule, Decision) {
    RULES
        .iter()
        .find_map(|(rule, apply)| apply(token, decimal_separator).map(|d| (*rule, d)))
        .unwrap_or((SeparatorRule::GroupingOnly, Decision::Integer))
}

fn override_rule(token: &NumericToken<'_>, decimal_separator: Option<DecimalSeparator>) -> Option<Decision> {
    let separator = decimal_separator?.as_char();

    Some(
        last_mark(token, |c| c == separator)
            .map(Decision::DecimalAt)
            .unwrap_or(Decision::Integer),
    )
}

fn currency_glyph_rule(token: &NumericToken<'_>, _: Option<DecimalSeparator>) -> Option<Decision> {
    token
        .separators
        .iter()
        .position(|s| s.kind == SeparatorKind::Currency)
        .map(Decision::DecimalAt)
}

fn mixed_marks_rule(token: &NumericToken<'_>, _: Option<DecimalSeparator>) -> Option<Decision> {
    let has = |ch: char| {
        token
            .separators
            .iter()
            .any(|s| s.kind == SeparatorKind::Mark && s.ch == ch)
    };

    if has('.') && has(',') {
        last_mark(token, |_| true).map(Decision::DecimalAt)
    } else {
        None
    }
}

fn single_mark_rule(token: &NumericToken<'_>, _: Option<DecimalSeparator>) -> Option<Decision> {
    let last = last_mark(token, |_| true)?;
    let final_group = digits_after(token.text, token.separators[last].offset);

    if final_group != 3 {
        return Some(Decision::DecimalAt(last));
    }

    // `0.500` cannot be thousands grouping
    let marks = token
        .separators
        .iter()
        .filter(|s| s.kind == SeparatorKind::Mark)
        .count();
    let leading: &str = token.text.split(|c: char| !c.is_ascii_digit()).next().unwrap_or("");
    if marks == 1 && !leading.is_empty() && leading.bytes().all(|b| b == b'0') {
        return Some(Decision::DecimalAt(last));
    }

    Some(Decision::Integer)
}

fn grouping_only_rule(_: &NumericToken<'_>, _: Option<DecimalSeparator>) -> Option<Decision> {
    Some(Decision::Integer)
}

fn last_mark(token: &NumericToken<'_>, accept: impl Fn(char) -> bool) -> Option<usize> {
    token
        .separators
        .iter()
        .rposition(|s| s.kind == SeparatorKind::Mark && accept(s.ch))
}

fn digits_after(text: &str, offset: usize) -> usize {
    let rest = &text[offset..];
    let skip = rest.chars().next().map_or(0, char::len_utf8);
    rest[skip..].bytes().take_while(u8::is_ascii_digit).count()
}

/// Keep digits, turn the decimal separator into `.`, drop everything else.
fn normalize(token: &NumericToken<'_>, decision: Decision) -> String {
    let decimal_offset = match decision {
        Decision::DecimalAt(i) => token.separators.get(i).map(|s| s.offset),
        Decision::Integer => None,
    };

    let mut normalized = String::with_capacity(token.text.len());
    for (offset, c) in token.text.char_indices() {
        if c.is_ascii_digit() {
            normalized.push(c);
        } else if Some(offset) == decimal_offset {
            normalized.push('.');
        }
    }
    normalized
}
