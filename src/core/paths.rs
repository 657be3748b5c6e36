//! Path resolution for language and project files.
//!
//! Patterns are resolved against a base directory, brace-expanded (the `glob`
//! crate has no `{a,b}` support) and matched on disk. A pattern naming an
//! existing directory is walked recursively instead. Every returned path is
//! absolute and uses `/` as separator.

use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Extensions picked up when a project pattern names a directory.
pub const VIEW_EXTENSIONS: &[&str] = &["html", "ts", "tsx", "js", "jsx", "json", "vue", "resx"];

/// Extensions picked up when a languages pattern names a directory.
pub const LANGUAGE_EXTENSIONS: &[&str] = &["json"];

/// Check if a pattern contains glob wildcards.
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// Split a comma separated pattern list, keeping commas inside braces.
///
/// ```
/// use keylint::core::paths::split_pattern_list;
///
/// assert_eq!(
///     split_pattern_list("./src/**/*.{ts,html}, ./i18n/old.json"),
///     vec!["./src/**/*.{ts,html}", "./i18n/old.json"]
/// );
/// ```
pub fn split_pattern_list(joined: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in joined.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    items.push(current);

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Expand `{a,b}` alternatives into plain glob patterns. Nested braces are
/// supported; an unbalanced brace is kept as a literal.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        let i = open + i;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(i),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(splits);
    bounds.push(close);

    bounds
        .windows(2)
        .flat_map(|w| {
            let alternative = &pattern[w[0] + 1..w[1]];
            expand_braces(&format!("{}{}{}", prefix, alternative, suffix))
        })
        .collect()
}

/// Check that every brace expansion of `pattern` is a valid glob.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    for expanded in expand_braces(pattern) {
        Pattern::new(&expanded)?;
    }
    Ok(())
}

/// Convert path separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove `.` components and fold `..` components without touching the disk.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component);
                }
            }
            other => result.push(other),
        }
    }
    result
}

/// Resolve `path` against `base_dir` and normalize it.
///
/// Absolute paths are kept as they are.
pub fn resolve_path(path: &str, base_dir: &Path) -> String {
    let path = Path::new(path.trim());
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    normalize_separators(&lexical_normalize(&joined).to_string_lossy())
}

enum IgnoreRule {
    Glob(Pattern),
    Prefix(PathBuf),
}

impl IgnoreRule {
    fn matches(&self, path: &str) -> bool {
        match self {
            IgnoreRule::Glob(pattern) => pattern.matches(path),
            IgnoreRule::Prefix(prefix) => Path::new(path).starts_with(prefix),
        }
    }
}

/// Expands patterns into concrete files, honoring one shared ignore list.
pub struct PathResolver {
    base_dir: PathBuf,
    ignores: Vec<IgnoreRule>,
    verbose: bool,
}

impl PathResolver {
    pub fn new(base_dir: impl Into<PathBuf>, ignore_patterns: &[String], verbose: bool) -> Result<Self> {
        let base_dir = base_dir.into();
        let mut ignores = Vec::new();

        for raw in ignore_patterns {
            let resolved = resolve_path(raw, &base_dir);
            if is_glob_pattern(&resolved) {
                for expanded in expand_braces(&resolved) {
                    let pattern = Pattern::new(&expanded)
                        .with_context(|| format!("Invalid ignore pattern: \"{}\"", raw))?;
                    ignores.push(IgnoreRule::Glob(pattern));
                }
            } else {
                ignores.push(IgnoreRule::Prefix(PathBuf::from(resolved)));
            }
        }

        Ok(Self {
            base_dir,
            ignores,
            verbose,
        })
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignores.iter().any(|rule| rule.matches(path))
    }

    /// Resolve every pattern into files, in discovery order, without duplicates.
    ///
    /// A pattern naming a directory yields the files below it whose extension
    /// is one of `extensions`.
    pub fn resolve(&self, patterns: &[String], extensions: &[&str]) -> Result<Vec<String>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut files = Vec::new();

        for raw in patterns {
            let resolved = resolve_path(raw, &self.base_dir);

            let candidates = if Path::new(&resolved).is_dir() {
                self.walk_dir(&resolved, extensions)
            } else {
                self.expand_glob(raw, &resolved)?
            };

            for candidate in candidates {
                if self.is_ignored(&candidate) {
                    continue;
                }
                if seen.insert(candidate.clone()) {
                    files.push(candidate);
                }
            }
        }

        Ok(files)
    }

    fn walk_dir(&self, dir: &str, extensions: &[&str]) -> Vec<String> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };

            let path = entry.path();
            let has_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e));

            if entry.file_type().is_file() && has_extension {
                files.push(normalize_separators(&path.to_string_lossy()));
            }
        }

        files
    }

    fn expand_glob(&self, raw: &str, resolved: &str) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for expanded in expand_braces(resolved) {
            let entries = glob(&expanded)
                .with_context(|| format!("Invalid glob pattern: \"{}\"", raw))?;

            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() => {
                        files.push(normalize_separators(&path.to_string_lossy()));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        if self.verbose {
                            eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                        }
                    }
                }
            }
        }

        Ok(files)
    }
}
