//! Output formatting shared by the parse and batch commands.

use serde::Serialize;

use pricetag_core::Price;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// One parsed input, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct PriceRecord {
    pub input: String,
    pub amount: Option<String>,
    pub amount_float: Option<f64>,
    pub currency: Option<String>,
    pub amount_text: Option<String>,
}

impl PriceRecord {
    pub fn new(input: &str, price: &Price) -> Self {
        Self {
            input: input.to_string(),
            amount: price.amount.map(|a| a.to_string()),
            amount_float: price.amount_float(),
            currency: price.currency.clone(),
            amount_text: price.amount_text.clone(),
        }
    }
}

/// Render records in the requested format.
pub fn format_records(records: &[PriceRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(records),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_json(records: &[PriceRecord]) -> anyhow::Result<String> {
    match records {
        [single] => Ok(serde_json::to_string_pretty(single)?),
        _ => Ok(serde_json::to_string_pretty(records)?),
    }
}

fn format_csv(records: &[PriceRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["input", "amount", "currency", "amount_text"])?;
    for record in records {
        wtr.write_record([
            record.input.as_str(),
            record.amount.as_deref().unwrap_or(""),
            record.currency.as_deref().unwrap_or(""),
            record.amount_text.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[PriceRecord]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(&format!("Input:    {}\n", record.input));
        output.push_str(&format!("Amount:   {}\n", record.amount.as_deref().unwrap_or("-")));
        output.push_str(&format!("Currency: {}\n", record.currency.as_deref().unwrap_or("-")));
        if let Some(amount_text) = &record.amount_text {
            output.push_str(&format!("Text:     {}\n", amount_text));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str) -> PriceRecord {
        PriceRecord::new(input, &Price::parse(input, None, None))
    }

    #[test]
    fn test_single_json_is_an_object() {
        let json = format_records(&[record("£1,299.00")], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["amount"], "1299.00");
        assert_eq!(value["amount_float"], 1299.0);
        assert_eq!(value["currency"], "£");
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let csv = format_records(&[record("15 130 Р"), record("R$")], OutputFormat::Csv).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "input,amount,currency,amount_text");
        assert_eq!(lines[1], "15 130 Р,15130,Р,15 130");
        assert_eq!(lines[2], "R$,,R$,");
    }

    #[test]
    fn test_text_marks_missing_fields() {
        let text = format_records(&[record("50% OFF")], OutputFormat::Text).unwrap();
        assert!(text.contains("Amount:   -"));
        assert!(!text.contains("Text:"));
    }
}
