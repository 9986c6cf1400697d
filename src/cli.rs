//! Command-line interface module for imgcollect.
//!
//! This module handles:
//! - Argument parsing
//! - Loading configuration and resolving the destination
//! - Driving the collector and printing progress
//! - Writing the optional JSON report

use crate::collector::{CollectEvent, CollectOptions, CollectReport, Collector};
use crate::config::{CollectConfig, CompiledFilters};
use crate::error::CollectError;
use crate::output::OutputFormatter;
use crate::report;
use clap::Parser;
use std::path::PathBuf;

/// Copy every JPEG and PNG found under a directory into one flat directory.
///
/// Files are recognised by their content signature, not their extension, and
/// get the canonical extension for their type. Existing files in the
/// destination are never overwritten; colliding names get a `_N` suffix.
#[derive(Debug, Parser)]
#[command(name = "imgcollect", version)]
pub struct Cli {
    /// Root of the tree to scan
    pub source: PathBuf,

    /// Directory to copy images into [default: collected_images]
    pub destination: Option<PathBuf>,

    /// Show what would be copied without creating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (defaults to .imgcollectrc.toml or ~/.config/imgcollect/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON report of the run to FILE
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Runs a collection as described by the parsed command line.
///
/// Per-file failures are printed as they happen and returned inside the
/// report; only fatal conditions produce an `Err`.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use imgcollect::cli::{Cli, run};
///
/// let cli = Cli::parse_from(["imgcollect", "/home/user/Pictures", "out"]);
/// match run(&cli) {
///     Ok(report) => println!("{} images collected", report.copied.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run(cli: &Cli) -> Result<CollectReport, CollectError> {
    let config = CollectConfig::load(cli.config.as_deref())?;
    let filters = CompiledFilters::new(&config.filters)?;
    let destination = config.destination(cli.destination.as_deref());

    let collector = Collector::new(&destination)
        .with_filters(filters)
        .with_options(CollectOptions {
            dry_run: cli.dry_run,
            follow_symlinks: config.collect.follow_symlinks,
        });

    if cli.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Scanning {} (no files will be copied)",
            cli.source.display()
        ));
    } else {
        OutputFormatter::info(&format!(
            "Collecting images from {} into {}",
            cli.source.display(),
            destination.display()
        ));
    }

    let spinner = OutputFormatter::create_spinner();
    let outcome = collector.collect_with(&cli.source, |event| match event {
        CollectEvent::Examining(_) => spinner.inc(1),
        CollectEvent::Copied(record) => {
            let verb = if cli.dry_run { "Would copy" } else { "Copied" };
            let line = format!(
                "{} {} to {}",
                verb,
                record.source.display(),
                record.destination.display()
            );
            spinner.suspend(|| OutputFormatter::success(&line));
        }
        CollectEvent::Failed(error) => {
            spinner.suspend(|| OutputFormatter::error(&error.to_string()));
        }
    });
    spinner.finish_and_clear();
    let report = outcome?;

    OutputFormatter::summary_table(&report);
    if !report.is_clean() {
        OutputFormatter::warning("Some files could not be collected. Please review errors above.");
    }

    if let Some(report_path) = &cli.report {
        report::write_report(report_path, &cli.source, &destination, cli.dry_run, &report)?;
        OutputFormatter::info(&format!("Report written to {}", report_path.display()));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_source_only() {
        let cli = Cli::try_parse_from(["imgcollect", "photos"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("photos"));
        assert!(cli.destination.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_all_arguments() {
        let cli = Cli::try_parse_from([
            "imgcollect",
            "photos",
            "out",
            "--dry-run",
            "--config",
            "c.toml",
            "--report",
            "r.json",
        ])
        .unwrap();
        assert_eq!(cli.destination, Some(PathBuf::from("out")));
        assert!(cli.dry_run);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert_eq!(cli.report, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn test_missing_source_is_usage_error() {
        let result = Cli::try_parse_from(["imgcollect"]);
        assert!(result.is_err());
    }
}
