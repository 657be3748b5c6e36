//! Report formatting and printing utilities.
//!
//! Violations are displayed in cargo-style format. Kept apart from the core
//! so keylint can be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::{
    core::{Key, LanguageSummary, RunResult},
    issues::{ErrorType, Violation},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a run result in cargo-style format to stdout.
pub fn report(result: &RunResult) {
    report_to(result, &mut io::stdout().lock());
}

/// Print a run result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(result: &RunResult, writer: &mut W) {
    let max_line_width = calculate_max_line_width(&result.violations);

    for violation in &result.violations {
        print_violation(violation, writer, max_line_width);
    }

    print_summary(result, writer);
}

/// Print any serializable value as pretty JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// JSON shape of a run: the result plus the derived verdict.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub passed: bool,
    pub error_count: usize,
    pub warning_count: usize,
    #[serde(flatten)]
    pub result: &'a RunResult,
}

impl<'a> From<&'a RunResult> for JsonReport<'a> {
    fn from(result: &'a RunResult) -> Self {
        Self {
            passed: !result.has_error(),
            error_count: result.error_count(),
            warning_count: result.warning_count(),
            result,
        }
    }
}

/// Print a run result as JSON to stdout.
pub fn print_result_json(result: &RunResult) -> Result<()> {
    print_json(&JsonReport::from(result))
}

/// Print a warning about views that could not be read.
pub fn print_skipped_warning(count: usize, verbose: bool) {
    print_skipped_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a skipped-files warning to a custom writer.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print_keys(keys: &[Key]) {
    print_keys_to(keys, &mut io::stdout().lock());
}

pub fn print_keys_to<W: Write>(keys: &[Key], writer: &mut W) {
    for key in keys {
        let _ = writeln!(writer, "{}", key.name.bold());
        let _ = writeln!(writer, "  {} {}", "languages:".dimmed(), key.languages.join(", "));
        if key.views.is_empty() {
            let _ = writeln!(writer, "  {} {}", "views:".dimmed(), "(unused)".yellow());
        } else {
            let _ = writeln!(writer, "  {} {}", "views:".dimmed(), key.views.join(", "));
        }
    }
    let _ = writeln!(
        writer,
        "\n{} {} {}",
        SUCCESS_MARK.green(),
        keys.len(),
        if keys.len() == 1 { "key" } else { "keys" }
    );
}

pub fn print_languages(summaries: &[LanguageSummary]) {
    print_languages_to(summaries, &mut io::stdout().lock());
}

pub fn print_languages_to<W: Write>(summaries: &[LanguageSummary], writer: &mut W) {
    for summary in summaries {
        let _ = writeln!(
            writer,
            "{}  {} keys, {} used, {} empty",
            summary.path.bold(),
            summary.keys,
            summary.used_keys,
            summary.empty_keys
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_violation<W: Write>(violation: &Violation, writer: &mut W, max_line_width: usize) {
    let severity_str = match violation.error_type {
        ErrorType::Error => "error".bold().red(),
        _ => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        violation.value,
        violation.error_flow.to_string().dimmed().cyan()
    );

    match &violation.location {
        Some(location) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                violation.current_path,
                location.line,
                location.col
            );
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), violation.current_path);
        }
    }

    if let Some(location) = violation
        .location
        .as_ref()
        .filter(|l| !l.source_line.is_empty())
    {
        let caret_char = match violation.error_type {
            ErrorType::Error => "^".red(),
            _ => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            location.line.to_string().blue(),
            "|".blue(),
            location.source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix: String = location
            .source_line
            .chars()
            .take(location.col.saturating_sub(1))
            .collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    for message in violation.messages() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            message,
            width = max_line_width
        );
    }

    if !violation.suggestions.is_empty() {
        let candidates = violation
            .suggestions
            .iter()
            .map(|s| format!("'{}'", s))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            writer,
            "{:>width$} {} {} did you mean {}?",
            "",
            "=".blue(),
            "help:".bold().cyan(),
            candidates,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between violations
}

fn print_summary<W: Write>(result: &RunResult, writer: &mut W) {
    let summary = result.summary();
    let mut lines = summary.lines();
    let headline = lines.next().unwrap_or_default();

    let headline = if result.has_error() {
        format!("{} {}", FAILURE_MARK.red(), headline.red())
    } else {
        format!("{} {}", SUCCESS_MARK.green(), headline.green())
    };
    let _ = writeln!(writer, "{}", headline);

    for line in lines {
        let _ = writeln!(writer, "{}", line);
    }
}

fn calculate_max_line_width(violations: &[Violation]) -> usize {
    violations
        .iter()
        .filter_map(|v| v.location.as_ref().map(|l| l.line))
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
