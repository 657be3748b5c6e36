//! Language file loading.
//!
//! Every language file is a JSON object. Nested objects are flattened into
//! dotted key names (`{"home": {"title": "Hi"}}` → `home.title`); arrays and
//! other non-object values are kept whole as the key's value.

use std::{collections::HashMap, fs};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;

use super::{line_index::LineIndex, scanner::SourceLocation};

/// One key instance, as found in one language file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Key {
    /// Flattened dotted name (e.g. "home.title").
    pub name: String,
    /// Translated text, or an opaque non-string value.
    pub value: Value,
    /// Language files this key instance was found in.
    pub languages: Vec<String>,
    /// Views referencing this key. Filled by the inventory, empty otherwise.
    pub views: Vec<String>,
    /// 1-based line of the key in its language file.
    #[serde(skip)]
    pub line: usize,
    /// Text of that line.
    #[serde(skip)]
    pub source_line: String,
}

impl Key {
    pub fn new(name: impl Into<String>, value: Value, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            languages: vec![language.into()],
            views: Vec::new(),
            line: 1,
            source_line: String::new(),
        }
    }

    pub fn with_line(mut self, line: usize, source_line: impl Into<String>) -> Self {
        self.line = line;
        self.source_line = source_line.into();
        self
    }

    /// Where the key is written in its language file.
    pub fn location(&self) -> SourceLocation {
        let indent = self
            .source_line
            .chars()
            .take_while(|c| c.is_whitespace())
            .count();
        SourceLocation {
            line: self.line,
            col: indent + 1,
            source_line: self.source_line.clone(),
        }
    }

    /// The language file the key instance was loaded from.
    pub fn language_path(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or_default()
    }

    /// True for string values that are blank after trimming.
    ///
    /// Non-string values are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(&self.value, Value::String(s) if s.trim().is_empty())
    }
}

/// All keys from all language files, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// Language files, in resolution order.
    pub files: Vec<String>,
    /// Key instances: file order, then document order.
    pub keys: Vec<Key>,
    /// Key name -> indices into `files` defining it.
    defined_in: HashMap<String, Vec<usize>>,
}

impl Dictionary {
    pub fn new(files: Vec<String>, keys: Vec<Key>) -> Self {
        let mut defined_in: HashMap<String, Vec<usize>> = HashMap::new();
        for key in &keys {
            if let Some(index) = files.iter().position(|f| f == key.language_path()) {
                let indices = defined_in.entry(key.name.clone()).or_default();
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
        }

        Self {
            files,
            keys,
            defined_in,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defined_in.contains_key(name)
    }

    /// Distinct key names, in first-seen order.
    pub fn key_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.keys
            .iter()
            .map(|k| k.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Language files that do not define `name`, in file order.
    pub fn missing_in(&self, name: &str) -> Vec<String> {
        let defined = self.defined_in.get(name);
        self.files
            .iter()
            .enumerate()
            .filter(|(i, _)| !defined.is_some_and(|d| d.contains(i)))
            .map(|(_, f)| f.clone())
            .collect()
    }

    /// Key instances loaded from `file`.
    pub fn keys_in<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Key> + 'a {
        self.keys.iter().filter(move |k| k.language_path() == file)
    }
}

/// Load and flatten every language file.
///
/// Any unreadable or malformed file fails the whole load: a partial dictionary
/// cannot be compared safely against the views.
pub fn load_dictionary(files: &[String]) -> Result<Dictionary> {
    let mut keys = Vec::new();
    for file in files {
        keys.extend(parse_language_file(file)?);
    }
    Ok(Dictionary::new(files.to_vec(), keys))
}

pub fn parse_language_file(path: &str) -> Result<Vec<Key>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read language file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse language file: {:?}", path))?;

    if !json.is_object() {
        bail!("Language file {:?} must contain a JSON object", path);
    }

    let line_index = LineIndex::new(&content);
    let mut keys = Vec::new();
    flatten_json(&json, String::new(), path, &content, &line_index, &mut keys);
    Ok(keys)
}

fn flatten_json(
    value: &Value,
    prefix: String,
    file_path: &str,
    content: &str,
    line_index: &LineIndex,
    result: &mut Vec<Key>,
) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, file_path, content, line_index, result);
            }
        }
        leaf => {
            let line = find_key_line(content, &prefix, line_index);
            let source_line = line_index.line_text(content, line).trim_end();
            result.push(Key::new(prefix, leaf.clone(), file_path).with_line(line, source_line));
        }
    }
}

/// Find the line where a key appears in the JSON content.
///
/// Searches for each key part in sequence, so `Common.submit` finds the
/// `"submit"` that comes after `"Common"`. A match only counts when followed
/// by `:`, i.e. when it is a property name and not a string value.
fn find_key_line(content: &str, key_path: &str, line_index: &LineIndex) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        line_index.line(search_start)
    } else {
        1
    }
}
