//! Violation types for translation key analysis results.
//!
//! This module defines everything the rule engine can report. Each violation is
//! self-contained with all information needed by:
//! - Aggregator: to classify it by severity and decide the verdict
//! - Reporter: to display it to users (text or JSON)

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::SourceLocation;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity configured for a rule.
///
/// `Disable` turns the rule off: it is skipped and produces no violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Error,
    Warning,
    Disable,
}

impl ErrorType {
    pub fn is_enabled(self) -> bool {
        self != ErrorType::Disable
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::Error => write!(f, "error"),
            ErrorType::Warning => write!(f, "warning"),
            ErrorType::Disable => write!(f, "disable"),
        }
    }
}

/// Rule that produced a violation.
///
/// Declaration order is the evaluation order of the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorFlow {
    /// Key defined in a language file but never used in a view.
    ZombieKeys,
    /// Key used in a view but missing from one or more language files.
    KeysOnViews,
    /// Key defined with a blank value.
    EmptyKeys,
}

impl ErrorFlow {
    pub fn all() -> [ErrorFlow; 3] {
        [
            ErrorFlow::ZombieKeys,
            ErrorFlow::KeysOnViews,
            ErrorFlow::EmptyKeys,
        ]
    }
}

impl fmt::Display for ErrorFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorFlow::ZombieKeys => write!(f, "zombieKeys"),
            ErrorFlow::KeysOnViews => write!(f, "keysOnViews"),
            ErrorFlow::EmptyKeys => write!(f, "emptyKeys"),
        }
    }
}

// ============================================================
// Violation
// ============================================================

/// One detected inconsistency between the dictionaries and the views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// The offending key name.
    pub value: String,
    pub error_flow: ErrorFlow,
    pub error_type: ErrorType,
    /// File the violation is anchored to (language file or view).
    pub current_path: String,
    /// Language files where the key was expected but missing.
    /// Only filled by the `keysOnViews` rule.
    pub absented_path: Vec<String>,
    /// Key names the author may have meant. Advisory only.
    pub suggestions: Vec<String>,
    /// First reference inside `current_path`, when it is a view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl Violation {
    pub fn new(
        value: impl Into<String>,
        error_flow: ErrorFlow,
        error_type: ErrorType,
        current_path: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            error_flow,
            error_type,
            current_path: current_path.into(),
            absented_path: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_absented_path(mut self, absented_path: Vec<String>) -> Self {
        self.absented_path = absented_path;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    /// Human readable message lines.
    ///
    /// `keysOnViews` yields one line per missing language file, the other
    /// rules always yield a single line.
    pub fn messages(&self) -> Vec<String> {
        match self.error_flow {
            ErrorFlow::KeysOnViews => self
                .absented_path
                .iter()
                .map(|path| format!("Key: '{}' doesn't exist in '{}'", self.value, path))
                .collect(),
            ErrorFlow::ZombieKeys => {
                vec![format!("Key: '{}' doesn't exist in project", self.value)]
            }
            ErrorFlow::EmptyKeys => vec![format!(
                "Key: '{}' is empty in {}",
                self.value, self.current_path
            )],
        }
    }
}

// ============================================================
// Tests
// ============================================================
