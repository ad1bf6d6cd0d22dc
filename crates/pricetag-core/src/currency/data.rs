//! Embedded currency data and the declarative rule tables built on it.

use tracing::warn;

/// Currency records: ISO code, main symbol, native symbol, other symbols.
pub static CURRENCIES_TSV: &str = include_str!("../../data/currencies.tsv");

/// Symbols and words reliable enough to be taken as a currency wherever
/// they appear. Longer `$` variants are listed so they outrank the bare glyph.
pub static SYMBOL_ALIASES: &[&str] = &[
    // Dollar variants
    "Bds$", "CUC$", "MOP$",
    "AR$", "AU$", "BN$", "BZ$", "CA$", "CL$", "CO$", "CV$", "HK$", "MX$",
    "NT$", "NZ$", "TT$", "RD$", "WS$", "US$",
    "$U", "C$", "J$", "N$", "R$", "S$", "T$", "Z$", "A$",
    "SY£", "LB£", "CN¥", "GH₵",

    // Unique glyphs
    "$", "€", "£", "zł", "Kč", "₽", "¥", "￥",
    "฿", "դր.", "դր", "₦", "₴", "₱", "৳", "₭", "₪", "﷼", "៛", "₩", "₫", "₡",
    "টকা", "ƒ", "₲", "؋", "₮", "नेरू", "₨",
    "₶", "₾", "֏", "ރ", "৲", "૱", "௹", "₠", "₢", "₣", "₤", "₧", "₯",
    "₰", "₳", "₷", "₸", "₹", "₺", "₼", "₿", "ℳ",
    "ر.ق.\u{200f}", "د.ك.\u{200f}", "د.ع.\u{200f}", "ر.ع.\u{200f}", "ر.ي.\u{200f}",
    "ر.س.\u{200f}", "د.ج.\u{200f}", "د.م.\u{200f}", "د.إ.\u{200f}", "د.ت.\u{200f}",
    "د.ل.\u{200f}", "ل.س.\u{200f}", "د.ب.\u{200f}", "د.أ.\u{200f}", "ج.م.\u{200f}",
    "ل.ل.\u{200f}",
    "تومان",

    // Common words and abbreviations
    "euro", "euros", "eur", "Rp", "lei",
    "руб.", "руб", "грн.", "грн", "дин.", "Dinara", "динар", "лв.", "лв",
    "р.", "тңг", "тңг.", "ман.",
];

/// Rouble letters: unreliable in general text, but near a price they mean roubles.
pub static EXTRA_LOOSE_ALIASES: &[(&str, &str)] = &[("р", "RUB"), ("Р", "RUB")];

/// Canonical codes for glyphs shared by several currencies.
pub static PREFERRED_CODES: &[(&str, &str)] = &[
    ("$", "USD"),
    ("£", "GBP"),
    ("¥", "JPY"),
    ("￥", "JPY"),
    ("kr", "SEK"),
    ("euro", "EUR"),
    ("euros", "EUR"),
    ("eur", "EUR"),
    ("руб", "RUB"),
    ("р.", "RUB"),
    ("грн", "UAH"),
    ("грн.", "UAH"),
];

/// Placeholder values in the data file that are never currencies.
pub static PLACEHOLDER_ALIASES: &[&str] = &["-", "XXX"];

/// Glyphs that may stand in for a decimal separator between two digit groups.
pub static AMBIGUOUS_GLYPHS: &[&str] = &["€"];

/// A generic glyph dropped when it trails an alphabetic alias (`NZD $` → `NZD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    /// Glyph to absorb into the match span.
    pub glyph: &'static str,
    /// Whether whitespace may separate the alias from the glyph.
    pub allow_whitespace: bool,
}

/// Redundant-suffix rules, applied in order.
pub static REDUNDANT_SUFFIXES: &[SuffixRule] = &[
    SuffixRule { glyph: "$", allow_whitespace: true },
    SuffixRule { glyph: "€", allow_whitespace: false },
    SuffixRule { glyph: "£", allow_whitespace: false },
    SuffixRule { glyph: "¥", allow_whitespace: false },
];

/// One line of the currency data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRecord<'a> {
    pub code: &'a str,
    pub symbol: &'a str,
    pub native: &'a str,
    pub others: Vec<&'a str>,
}

impl<'a> CurrencyRecord<'a> {
    /// Every alias named by this record except the code itself.
    pub fn symbols(&self) -> impl Iterator<Item = &'a str> + '_ {
        [self.symbol, self.native]
            .into_iter()
            .chain(self.others.iter().copied())
    }
}

/// Parse tab-separated currency records, skipping comments and malformed lines.
pub fn records(data: &str) -> Vec<CurrencyRecord<'_>> {
    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .filter_map(|(number, line)| {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 || fields[0].trim().is_empty() {
                warn!("Skipping malformed currency record on line {}", number + 1);
                return None;
            }

            let others = fields
                .get(3)
                .map(|f| f.split('|').filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();

            Some(CurrencyRecord {
                code: fields[0].trim(),
                symbol: fields[1],
                native: fields[2],
                others,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_records_parse() {
        let records = records(CURRENCIES_TSV);
        assert!(records.len() > 200);

        let brl = records.iter().find(|r| r.code == "BRL").unwrap();
        assert_eq!(brl.symbol, "R$");

        let ron = records.iter().find(|r| r.code == "RON").unwrap();
        assert!(ron.others.contains(&"lei"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let data = "# header\nUSD\t$\t$\t\nbroken\n\nEUR\t€\t€\teuro|Euro\n";
        let records = records(data);

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].symbols().collect::<Vec<_>>(), vec!["€", "€", "euro", "Euro"]);
    }
}
