//! Key-pattern matching against arbitrary source text.
//!
//! Two matchers share one capability, [`KeyMatcher`]:
//!
//! - [`LiteralMatcher`]: recognizes a known key when it appears as a whole
//!   quoted literal (`'home.title'`) or as element text (`>home.title<`), and
//!   any key-shaped argument of a translation call or attribute (`t('…')`,
//!   `i18nKey="…"`), even when that key exists in no language file.
//! - [`CustomMatcher`]: user supplied regular expressions, replacing the
//!   literal construction entirely.
//!
//! Literals are found with one fixed pattern and looked up in the key set, so
//! the pattern does not grow with the dictionary.
//!
//! In deep-search mode dotted prefixes of known keys and key literals cut short
//! by a `.` (`t('home.' + id)`) are reported as prefix matches.

use std::collections::HashSet;

use anyhow::{Context, Result};
use enum_dispatch::enum_dispatch;
use regex::{Captures, Match, Regex};

use crate::config::RulesConfig;

/// Translation calls and attributes whose first literal argument is a key.
const INVOCATION: &str =
    r#"(?:\$t|\b(?:t|tc|translate|i18n\.t|i18next\.t))\s*\(\s*|\bi18nKey\s*=\s*\{?\s*"#;

/// Characters of a key written inside a call.
const KEY_CHARS: &str = r"[\w-]+(?:\.[\w-]+)*";

/// One key reference found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatch {
    /// Referenced key name (or key prefix).
    pub name: String,
    /// Byte offset of the name in the text.
    pub start: usize,
    pub end: usize,
    /// True when the match only names a prefix of keys (deep search).
    pub is_prefix: bool,
}

/// Finds key references in a text.
#[enum_dispatch]
pub trait KeyMatcher {
    /// All references in `text`, ordered by position.
    fn find_keys(&self, text: &str) -> Vec<KeyMatch>;
}

#[enum_dispatch(KeyMatcher)]
#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(LiteralMatcher),
    Custom(CustomMatcher),
}

/// Build the matcher selected by `rules`.
///
/// Custom patterns win over the literal construction when present.
pub fn build_matcher(known_keys: &[&str], rules: &RulesConfig) -> Result<Matcher> {
    let keys = KeySet::new(known_keys, rules.deep_search());
    if rules.custom_reg_exp_to_find_keys.is_empty() {
        Ok(Matcher::Literal(LiteralMatcher::with_keys(keys)?))
    } else {
        Ok(Matcher::Custom(CustomMatcher::with_keys(
            &rules.custom_reg_exp_to_find_keys,
            keys,
        )?))
    }
}

/// Known key names and, in deep mode, their dotted prefixes.
#[derive(Debug, Clone, Default)]
struct KeySet {
    known: HashSet<String>,
    prefixes: HashSet<String>,
    deep: bool,
}

impl KeySet {
    fn new(known_keys: &[&str], deep: bool) -> Self {
        let known: HashSet<String> = known_keys
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| k.to_string())
            .collect();
        let prefixes = if deep {
            known.iter().flat_map(|k| key_prefixes(k)).collect()
        } else {
            HashSet::new()
        };
        Self {
            known,
            prefixes,
            deep,
        }
    }

    fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.known.contains(name) || self.prefixes.contains(name)
    }

    /// Names a prefix of known keys without being a key itself.
    fn is_prefix_only(&self, name: &str) -> bool {
        self.deep && !self.known.contains(name) && self.prefixes.contains(name)
    }
}

// ============================================================
// Literal matcher
// ============================================================

#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    regex: Regex,
    keys: KeySet,
}

impl LiteralMatcher {
    pub fn new(known_keys: &[&str], deep: bool) -> Result<Self> {
        Self::with_keys(KeySet::new(known_keys, deep))
    }

    fn with_keys(keys: KeySet) -> Result<Self> {
        let call_close = if keys.deep { r#"['"`]|\."# } else { r#"['"`]"# };

        let pattern = format!(
            r#"(?:{INVOCATION})['"`](?P<call>{KEY_CHARS})(?P<call_end>{call_close})|['"`](?P<lit>[^'"`\r\n]*)['"`]|>\s*(?P<text>[^<>'"`\r\n]*?)\s*<"#
        );
        let regex = Regex::new(&pattern).context("Failed to build key matcher")?;

        Ok(Self { regex, keys })
    }

    /// Key named by a call argument. Unknown names are kept.
    fn call_match(&self, name: Match<'_>, close: Option<Match<'_>>) -> KeyMatch {
        let cut_short = close.is_some_and(|c| c.as_str() == ".");
        KeyMatch {
            name: name.as_str().to_string(),
            start: name.start(),
            end: name.end(),
            is_prefix: self.keys.deep && (cut_short || self.keys.is_prefix_only(name.as_str())),
        }
    }

    /// Known key or prefix spelled by a whole literal.
    ///
    /// In deep mode a literal with a dynamic tail (`home.${id}`) names its
    /// longest known dotted head.
    fn literal_match(&self, content: Match<'_>) -> Option<KeyMatch> {
        let text = content.as_str();
        if self.keys.contains(text) {
            return Some(KeyMatch {
                name: text.to_string(),
                start: content.start(),
                end: content.end(),
                is_prefix: self.keys.is_prefix_only(text),
            });
        }
        if !self.keys.deep {
            return None;
        }

        text.match_indices('.')
            .map(|(i, _)| &text[..i])
            .filter(|head| self.keys.contains(head))
            .last()
            .map(|head| KeyMatch {
                name: head.to_string(),
                start: content.start(),
                end: content.start() + head.len(),
                is_prefix: true,
            })
    }

    fn to_match(&self, caps: &Captures<'_>) -> Option<KeyMatch> {
        if let Some(name) = caps.name("call") {
            return Some(self.call_match(name, caps.name("call_end")));
        }
        caps.name("lit")
            .or_else(|| caps.name("text"))
            .and_then(|content| self.literal_match(content))
    }
}

impl KeyMatcher for LiteralMatcher {
    fn find_keys(&self, text: &str) -> Vec<KeyMatch> {
        if self.keys.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        let mut pos = 0;
        // Resume inside the literal so its closing delimiter can open the next one.
        while pos <= text.len() {
            let Some(caps) = self.regex.captures_at(text, pos) else {
                break;
            };
            let Some(content) = caps
                .name("call")
                .or_else(|| caps.name("lit"))
                .or_else(|| caps.name("text"))
            else {
                break;
            };
            match self.to_match(&caps) {
                Some(key_match) => {
                    pos = key_match.end.max(pos + 1);
                    matches.push(key_match);
                }
                None => pos = content.start().max(pos + 1),
            }
        }
        matches
    }
}

/// Dotted prefixes of a key: `a.b.c` → `a`, `a.b`.
fn key_prefixes(key: &str) -> Vec<String> {
    key.match_indices('.')
        .map(|(i, _)| key[..i].to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

// ============================================================
// Custom matcher
// ============================================================

/// Matcher built from user patterns.
///
/// The key is the capture group named `key`, else group 1, else the whole
/// match. In deep mode a match naming only a prefix of known keys is a prefix
/// match.
#[derive(Debug, Clone)]
pub struct CustomMatcher {
    patterns: Vec<Regex>,
    keys: KeySet,
}

impl CustomMatcher {
    pub fn new(patterns: &[String], known_keys: &[&str], deep: bool) -> Result<Self> {
        Self::with_keys(patterns, KeySet::new(known_keys, deep))
    }

    fn with_keys(patterns: &[String], keys: KeySet) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).with_context(|| {
                    format!("Invalid regular expression in 'customRegExpToFindKeys': \"{}\"", p)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns, keys })
    }
}

impl KeyMatcher for CustomMatcher {
    fn find_keys(&self, text: &str) -> Vec<KeyMatch> {
        let mut matches: Vec<KeyMatch> = self
            .patterns
            .iter()
            .flat_map(|regex| regex.captures_iter(text))
            .filter_map(|caps| {
                let name = caps.name("key").or_else(|| caps.get(1)).or_else(|| caps.get(0))?;
                (!name.as_str().is_empty()).then(|| KeyMatch {
                    name: name.as_str().to_string(),
                    start: name.start(),
                    end: name.end(),
                    is_prefix: self.keys.is_prefix_only(name.as_str()),
                })
            })
            .collect();

        matches.sort_by_key(|m| (m.start, m.end));
        matches.dedup();
        matches
    }
}
