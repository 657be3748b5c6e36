//! Core analysis engine.
//!
//! The pipeline runs leaves first, once per invocation:
//!
//! 1. `paths`: resolve language and project patterns into files
//! 2. `dictionary`: load and flatten the language files
//! 3. `matcher`: build the key matcher from the known key names
//! 4. `scanner`: find key references in every project file
//! 5. `rules` (crate level): evaluate the consistency rules
//! 6. `outcome`: filter ignored keys, count severities, decide the verdict
//!
//! `context` ties the steps together; `inventory` derives the key and
//! language listings from the same data.

pub mod context;
pub mod dictionary;
pub mod inventory;
pub mod line_index;
pub mod matcher;
pub mod outcome;
pub mod paths;
pub mod scanner;

pub use context::{LintContext, lint};
pub use dictionary::{Dictionary, Key, load_dictionary};
pub use inventory::{LanguageSummary, key_inventory, language_inventory};
pub use matcher::{KeyMatch, KeyMatcher, Matcher, build_matcher};
pub use outcome::{ExitStatus, RunResult, compile_ignored_keys};
pub use scanner::{Reference, SourceLocation, ViewIndex, scan_views};
