//! Bhulekh CLI - extract a RoR record from a saved HTML page.
//!
//! Reads a Bhulekh page from disk, runs the extraction engine, and prints
//! the record as JSON (optionally remapped onto Odia keys) or as a
//! field-by-field summary with found/missing markers. Exit status reflects
//! only I/O problems; a low-confidence extraction still exits 0 so callers
//! can inspect the confidence themselves.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bhulekh_core::{ConfidenceLevel, ExtractedRecord, EXTRACTION_FAILED, NOT_FOUND};
use bhulekh_extract::{ExtractorOptions, RorExtractor};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bhulekh",
    about = "Extract structured Khatiyan data from a saved Bhulekh RoR HTML page",
    version
)]
struct Args {
    /// Path to the saved HTML page.
    file: PathBuf,

    /// Print the record remapped onto Odia keys.
    #[arg(long)]
    remap: bool,

    /// Print a field-by-field summary instead of JSON.
    #[arg(long, conflicts_with = "remap")]
    summary: bool,

    /// Dump the raw input HTML before parsing.
    #[arg(long)]
    debug: bool,

    /// Directory for debug dumps (implies --debug).
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let html = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut options = ExtractorOptions::default().with_debug(args.debug || args.debug_dir.is_some());
    if let Some(dir) = args.debug_dir {
        options = options.with_debug_dir(dir);
    }
    let extractor = RorExtractor::with_options(options);

    if args.remap {
        let (remapped, confidence) = extractor.extract_remapped(&html);
        println!("{}", serde_json::to_string_pretty(&remapped)?);
        eprintln!("confidence: {confidence}");
        return Ok(());
    }

    let (record, confidence) = extractor.extract(&html);
    if args.summary {
        print_summary(&record, confidence);
    } else {
        println!("{}", serde_json::to_string_pretty(&record)?);
        eprintln!("confidence: {confidence}");
    }
    Ok(())
}

fn print_summary(record: &ExtractedRecord, confidence: ConfidenceLevel) {
    let row = |name: &str, value: &str| {
        let marker = if value.is_empty() || value == NOT_FOUND || value == EXTRACTION_FAILED {
            "missing"
        } else {
            "ok"
        };
        println!("  [{marker:>7}] {name:<18} {value}");
    };

    println!("Confidence: {confidence}");
    println!();
    row("district", &record.district);
    row("tehsil", &record.tehsil);
    row("village", &record.village);
    row("record_number", &record.record_number);
    row("owner_name", &record.owner_name);
    row("father_name", &record.father_name);
    row("caste", &record.caste);
    row("other_owners", &record.other_owners);
    row("total_plots", &record.total_plots);
    row("plot_numbers", &record.plot_numbers);
    row("total_area", &record.total_area);
    row("land_type", &record.land_type);
    println!();
    println!("special_comments:");
    for line in record.special_comments.lines() {
        println!("  {line}");
    }
    if !record.plots.is_empty() {
        println!();
        println!("plots:");
        for plot in &record.plots {
            let notes = plot
                .notes
                .as_deref()
                .map(|n| format!("  ({n})"))
                .unwrap_or_default();
            println!(
                "  {:<8} {:>10.4} ha  {}{notes}",
                plot.plot_number, plot.area, plot.land_type
            );
        }
    }
}
