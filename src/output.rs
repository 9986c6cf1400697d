//! Output formatting and styling module.
//!
//! All console output of the command-line front end goes through
//! [`OutputFormatter`], so styling stays consistent in one place.

use crate::collector::CollectReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages CLI output with consistent styling.
///
/// - Success messages (green with ✓)
/// - Error messages (red with ✗, on stderr)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - A spinner while the tree is walked
/// - A summary table at the end of a run
pub struct OutputFormatter;

impl OutputFormatter {
    /// Formats a success line: green checkmark followed by the message.
    pub fn success_line(message: &str) -> String {
        format!("{} {}", "✓".green(), message)
    }

    /// Formats an error line: red X mark followed by the message.
    pub fn error_line(message: &str) -> String {
        format!("{} {}", "✗".red(), message)
    }

    /// Prints a success message.
    ///
    /// ```no_run
    /// use imgcollect::output::OutputFormatter;
    /// OutputFormatter::success("Copied a.dat to collected_images/a.png");
    /// ```
    pub fn success(message: &str) {
        println!("{}", Self::success_line(message));
    }

    /// Prints an error message to stderr.
    pub fn error(message: &str) {
        eprintln!("{}", Self::error_line(message));
    }

    /// Prints a warning message.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a spinner counting scanned files.
    ///
    /// The spinner draws to stderr and stays hidden when that is not a
    /// terminal.
    pub fn create_spinner() -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {pos} files scanned {msg}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    /// Prints the per-kind summary of a run.
    pub fn summary_table(report: &CollectReport) {
        Self::header("SUMMARY");

        let counts = report.count_by_kind();
        let width = 8; // "Skipped" plus padding

        println!("{:<width$} | {}", "Type".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (kind, count) in &counts {
            println!(
                "{:<width$} | {} {}",
                kind.to_string(),
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            report.copied.len().to_string().green().bold(),
            plural(report.copied.len()),
            width = width
        );
        println!(
            "{:<width$} | {} {}",
            "Skipped",
            report.skipped,
            plural(report.skipped),
            width = width
        );
        if !report.errors.is_empty() {
            println!(
                "{:<width$} | {} {}",
                "Failed",
                report.errors.len().to_string().red(),
                plural(report.errors.len()),
                width = width
            );
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
