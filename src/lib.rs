//! keylint - translation key consistency linter
//!
//! keylint compares translation dictionaries (JSON language files) with the
//! source files that reference their keys ("views"). It reports keys that are
//! never used, keys used but missing from a language, and keys with an empty
//! value, then turns the configured severities into a pass/fail verdict.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Analysis pipeline (paths, dictionary, matcher, scanner, outcome)
//! - `issues`: Violation type definitions
//! - `rules`: The consistency rules
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
