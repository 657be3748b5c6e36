//! Result aggregation: ignore filtering, severity counts and the final verdict.

use std::{fmt::Write as _, process::ExitCode};

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::issues::{ErrorFlow, ErrorType, Violation};

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Run completed and passed
/// - `Failure` (1): Run completed but the violations fail it
/// - `Error` (2): Run aborted (config error, unreadable language file, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

/// Compile `ignoredKeys` patterns. Matching is case-insensitive.
pub fn compile_ignored_keys(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| {
                    format!("Invalid regular expression in 'ignoredKeys': \"{}\"", pattern)
                })
        })
        .collect()
}

/// Outcome of one lint run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub violations: Vec<Violation>,
    pub max_warning: usize,
    pub views_scanned: usize,
    pub views_skipped: usize,
    pub language_files: usize,
}

impl RunResult {
    pub fn new(violations: Vec<Violation>, max_warning: usize) -> Self {
        Self {
            violations,
            max_warning,
            views_scanned: 0,
            views_skipped: 0,
            language_files: 0,
        }
    }

    pub fn with_stats(mut self, views_scanned: usize, views_skipped: usize, language_files: usize) -> Self {
        self.views_scanned = views_scanned;
        self.views_skipped = views_skipped;
        self.language_files = language_files;
        self
    }

    /// Drop violations whose key matches any of `ignored`.
    pub fn without_ignored(mut self, ignored: &[Regex]) -> Self {
        if !ignored.is_empty() {
            self.violations
                .retain(|v| !ignored.iter().any(|regex| regex.is_match(&v.value)));
        }
        self
    }

    pub fn count(&self, error_type: ErrorType) -> usize {
        self.violations
            .iter()
            .filter(|v| v.error_type == error_type)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(ErrorType::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(ErrorType::Warning)
    }

    /// Whether the run fails: any error, or more warnings than `max_warning`.
    pub fn has_error(&self) -> bool {
        self.error_count() > 0 || self.warnings_exceeded()
    }

    pub fn warnings_exceeded(&self) -> bool {
        self.warning_count() > self.max_warning
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.has_error() {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }

    /// Plain-text summary: totals, then one line per rule with violations.
    pub fn summary(&self) -> String {
        if self.violations.is_empty() {
            return format!(
                "No issues found ({} views, {} language files)",
                self.views_scanned, self.language_files
            );
        }

        let mut summary = format!(
            "{} ({} views, {} language files)",
            counts(self.error_count(), self.warning_count()),
            self.views_scanned,
            self.language_files
        );

        for flow in ErrorFlow::all() {
            let of_flow = |error_type| {
                self.violations
                    .iter()
                    .filter(|v| v.error_flow == flow && v.error_type == error_type)
                    .count()
            };
            let (errors, warnings) = (of_flow(ErrorType::Error), of_flow(ErrorType::Warning));
            if errors + warnings > 0 {
                let _ = write!(summary, "\n  {}: {}", flow, counts(errors, warnings));
            }
        }

        if self.error_count() == 0 && self.warnings_exceeded() {
            let _ = write!(
                summary,
                "\nWarnings exceed maxWarning ({} > {})",
                self.warning_count(),
                self.max_warning
            );
        }

        summary
    }
}

fn counts(errors: usize, warnings: usize) -> String {
    format!(
        "{} {}, {} {}",
        errors,
        if errors == 1 { "error" } else { "errors" },
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }
    )
}
