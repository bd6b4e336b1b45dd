//! Output formatting and styling module.
//!
//! Provides a centralized interface for all user-facing CLI output, so that
//! every printed line goes through the same styling.

use colored::*;
use std::collections::HashMap;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use retype::output::OutputFormatter;
    /// OutputFormatter::success("'report' renamed to 'report.pdf'");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message to stderr in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints a table of detected kinds and how many files had each.
    ///
    /// ```no_run
    /// use retype::output::OutputFormatter;
    /// use std::collections::HashMap;
    ///
    /// let mut counts = HashMap::new();
    /// counts.insert("PDF document".to_string(), 3);
    /// counts.insert("PNG image".to_string(), 1);
    /// OutputFormatter::summary_table(&counts, 4);
    /// ```
    pub fn summary_table(kind_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let mut kinds: Vec<_> = kind_counts.iter().collect();
        kinds.sort_by_key(|&(name, _)| name);

        let width = kinds
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Detected type".len());

        println!(
            "{:<width$} | {}",
            "Detected type".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (kind, count) in &kinds {
            println!(
                "{:<width$} | {} {}",
                kind,
                count.to_string().green(),
                file_word(**count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            file_word(total_files),
            width = width
        );
    }
}

/// Returns "file" or "files" to agree with `count`.
pub fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
