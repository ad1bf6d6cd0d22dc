//! Batch command - parse every line of many text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use pricetag_core::{PriceExtractor, PriceParser};

use super::load_config;
use super::output::{format_records, OutputFormat, PriceRecord};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern. One price per line, optionally `text<TAB>hint`
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let parser = PriceParser::from_config(&config.extraction);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut records = Vec::new();
    let mut failed = Vec::new();

    for path in &files {
        match parse_file(path, &parser) {
            Ok(mut parsed) => {
                debug!("Parsed {} lines from {}", parsed.len(), path.display());
                records.append(&mut parsed);
            }
            Err(e) if args.continue_on_error => {
                warn!("Failed to read {}: {}", path.display(), e);
                failed.push((path.clone(), e.to_string()));
            }
            Err(e) => {
                pb.abandon();
                anyhow::bail!("Failed to read {}: {}", path.display(), e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    let content = format_records(&records, args.format)?;
    match &args.output {
        Some(output_path) => {
            fs::write(output_path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), output_path.display());
        }
        None => println!("{}", content),
    }

    let found = records.iter().filter(|r| r.amount.is_some()).count();
    eprintln!(
        "{} Parsed {} lines in {:?}, {} with an amount",
        style("✓").green(),
        records.len(),
        start.elapsed(),
        style(found).green()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            eprintln!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

fn parse_file(path: &Path, parser: &PriceParser) -> anyhow::Result<Vec<PriceRecord>> {
    let content = fs::read_to_string(path)?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (text, hint) = match line.split_once('\t') {
                Some((text, hint)) => (text, Some(hint)),
                None => (line, None),
            };
            PriceRecord::new(text, &parser.extract(text, hint))
        })
        .collect())
}
