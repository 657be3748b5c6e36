//! View scanning: runs the key matcher over every project file and records
//! which views reference which keys.

use std::{
    collections::{HashMap, HashSet},
    fs,
};

use colored::Colorize;
use serde::Serialize;

use super::{
    line_index::LineIndex,
    matcher::{KeyMatcher, Matcher},
};

/// Position of a key inside a view or a language file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub col: usize,
    /// The full line containing the reference.
    pub source_line: String,
}

/// A referenced key and the views it appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    /// Views in scan order, each with its first reference location.
    pub views: Vec<(String, SourceLocation)>,
}

/// Everything learned from scanning the views.
#[derive(Debug, Clone, Default)]
pub struct ViewIndex {
    /// Exact references in first-seen order.
    references: Vec<Reference>,
    by_name: HashMap<String, usize>,
    /// Names referenced as key prefixes (deep search only), first-seen order.
    prefixes: Vec<String>,
    prefix_set: HashSet<String>,
    /// Files scanned successfully.
    pub scanned: usize,
    /// Files skipped because they could not be read as UTF-8 text.
    pub skipped: usize,
}

impl ViewIndex {
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn get(&self, name: &str) -> Option<&Reference> {
        self.by_name.get(name).map(|&i| &self.references[i])
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// True when some prefix reference covers `name` (`home` covers `home.title`).
    pub fn is_covered_by_prefix(&self, name: &str) -> bool {
        name.match_indices('.')
            .any(|(i, _)| self.prefix_set.contains(&name[..i]))
    }

    /// Views referencing `name`, in scan order.
    pub fn views_of(&self, name: &str) -> Vec<&str> {
        self.get(name)
            .map(|r| r.views.iter().map(|(v, _)| v.as_str()).collect())
            .unwrap_or_default()
    }

    fn record(&mut self, name: &str, view: &str, location: SourceLocation) {
        let index = match self.by_name.get(name) {
            Some(&i) => i,
            None => {
                self.references.push(Reference {
                    name: name.to_string(),
                    views: Vec::new(),
                });
                self.by_name
                    .insert(name.to_string(), self.references.len() - 1);
                self.references.len() - 1
            }
        };

        let views = &mut self.references[index].views;
        if !views.iter().any(|(v, _)| v == view) {
            views.push((view.to_string(), location));
        }
    }

    fn record_prefix(&mut self, name: &str) {
        if self.prefix_set.insert(name.to_string()) {
            self.prefixes.push(name.to_string());
        }
    }
}

/// Scan `files` for key references.
///
/// In deep-search mode every match also counts as a prefix reference. Files that
/// cannot be read are skipped, with a warning when `verbose` is set.
pub fn scan_views(matcher: &Matcher, files: &[String], deep: bool, verbose: bool) -> ViewIndex {
    let mut index = ViewIndex::default();

    for file in files {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(err) => {
                if verbose {
                    eprintln!(
                        "{} Skipping {}: {}",
                        "warning:".bold().yellow(),
                        file,
                        err
                    );
                }
                index.skipped += 1;
                continue;
            }
        };

        scan_content(matcher, file, &content, deep, &mut index);
        index.scanned += 1;
    }

    index
}

fn scan_content(matcher: &Matcher, file: &str, content: &str, deep: bool, index: &mut ViewIndex) {
    let matches = matcher.find_keys(content);
    if matches.is_empty() {
        return;
    }

    let line_index = LineIndex::new(content);
    for key_match in matches {
        if deep {
            index.record_prefix(&key_match.name);
        }
        if key_match.is_prefix {
            continue;
        }

        let (line, col) = line_index.line_col(content, key_match.start);
        let location = SourceLocation {
            line,
            col,
            source_line: line_index.line_text(content, line).to_string(),
        };
        index.record(&key_match.name, file, location);
    }
}
