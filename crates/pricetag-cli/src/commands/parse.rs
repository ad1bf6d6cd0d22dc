//! Parse command - extract a price from one string.

use clap::Args;
use tracing::info;

use pricetag_core::{DecimalSeparator, PriceExtractor, PriceParser};

use super::load_config;
use super::output::{format_records, OutputFormat, PriceRecord};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Price text, e.g. "1 299,00 zł"
    #[arg(required = true)]
    text: String,

    /// Text to search for a currency when the price names none
    #[arg(long)]
    hint: Option<String>,

    /// Decimal separator to use instead of guessing ("." or ",")
    #[arg(short, long)]
    decimal_separator: Option<DecimalSeparator>,

    /// Report this currency instead of searching for one
    #[arg(long)]
    currency: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut parser = PriceParser::from_config(&config.extraction);
    if args.decimal_separator.is_some() {
        parser = parser.with_decimal_separator(args.decimal_separator);
    }
    if let Some(currency) = args.currency {
        parser = parser.with_currency(currency);
    }

    info!("Parsing {:?}", args.text);
    let price = parser.extract(&args.text, args.hint.as_deref());

    let record = PriceRecord::new(&args.text, &price);
    println!("{}", format_records(&[record], args.format)?);

    Ok(())
}
