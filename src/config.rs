use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use clap::ValueEnum;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::{
    core::paths::{split_pattern_list, validate_pattern},
    issues::ErrorType,
};

pub const CONFIG_FILE_NAME: &str = ".keylintrc.json";

pub const DEFAULT_PROJECT: &str = "./src/**/*.{html,ts,tsx,js,jsx,resx}";

pub const DEFAULT_LANGUAGES: &str = "./src/assets/i18n/*.json";

/// On/off switch used by `deepSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ToggleRule {
    Enable,
    Disable,
}

impl ToggleRule {
    pub fn is_enabled(self) -> bool {
        self == ToggleRule::Enable
    }
}

/// Fully resolved rule settings consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    pub zombie_keys: ErrorType,
    pub keys_on_views: ErrorType,
    pub empty_keys: ErrorType,
    pub deep_search: ToggleRule,
    pub max_warning: usize,
    pub ignored_keys: Vec<String>,
    pub custom_reg_exp_to_find_keys: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            zombie_keys: ErrorType::Warning,
            keys_on_views: ErrorType::Error,
            empty_keys: ErrorType::Warning,
            deep_search: ToggleRule::Disable,
            max_warning: 0,
            ignored_keys: Vec::new(),
            custom_reg_exp_to_find_keys: Vec::new(),
        }
    }
}

impl RulesConfig {
    pub fn deep_search(&self) -> bool {
        self.deep_search.is_enabled()
    }

    /// True when at least one rule produces violations.
    pub fn any_enabled(&self) -> bool {
        self.zombie_keys.is_enabled()
            || self.keys_on_views.is_enabled()
            || self.empty_keys.is_enabled()
    }
}

/// A glob list written either as `"a, b"` or as `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    Joined(String),
    List(Vec<String>),
}

impl PatternList {
    pub fn into_patterns(self) -> Vec<String> {
        let items = match self {
            PatternList::Joined(joined) => split_pattern_list(&joined),
            PatternList::List(list) => list,
        };
        items
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Rule fields as written in a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zombie_keys: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys_on_views: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_keys: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_search: Option<ToggleRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_warning: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_reg_exp_to_find_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<PatternList>,
}

impl RulesSection {
    fn resolve(self) -> RulesConfig {
        let defaults = RulesConfig::default();
        RulesConfig {
            zombie_keys: self.zombie_keys.unwrap_or(defaults.zombie_keys),
            keys_on_views: self.keys_on_views.unwrap_or(defaults.keys_on_views),
            empty_keys: self.empty_keys.unwrap_or(defaults.empty_keys),
            deep_search: self.deep_search.unwrap_or(defaults.deep_search),
            max_warning: self.max_warning.unwrap_or(defaults.max_warning),
            ignored_keys: self.ignored_keys.unwrap_or(defaults.ignored_keys),
            custom_reg_exp_to_find_keys: self
                .custom_reg_exp_to_find_keys
                .unwrap_or(defaults.custom_reg_exp_to_find_keys),
        }
    }
}

impl From<RulesConfig> for RulesSection {
    fn from(rules: RulesConfig) -> Self {
        Self {
            zombie_keys: Some(rules.zombie_keys),
            keys_on_views: Some(rules.keys_on_views),
            empty_keys: Some(rules.empty_keys),
            deep_search: Some(rules.deep_search),
            max_warning: Some(rules.max_warning),
            ignored_keys: Some(rules.ignored_keys),
            custom_reg_exp_to_find_keys: Some(rules.custom_reg_exp_to_find_keys),
            ignore: None,
        }
    }
}

/// Config file contents.
///
/// Two shapes are accepted: rule fields nested under `rules`, or written flat
/// next to `project` and `languages`. When `rules` is present it wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PatternList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<PatternList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<PatternList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesSection>,
    #[serde(flatten)]
    pub flat: RulesSection,
}

/// Settings handed to the engine: config file merged over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory relative patterns are resolved against.
    pub base_dir: PathBuf,
    pub project: Vec<String>,
    pub languages: Vec<String>,
    pub ignore: Vec<String>,
    pub rules: RulesConfig,
}

impl Settings {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            project: vec![DEFAULT_PROJECT.to_string()],
            languages: vec![DEFAULT_LANGUAGES.to_string()],
            ignore: Vec::new(),
            rules: RulesConfig::default(),
        }
    }

    pub fn from_file(file: ConfigFile, base_dir: impl Into<PathBuf>) -> Self {
        let mut settings = Self::new(base_dir);

        if let Some(project) = file.project {
            settings.project = project.into_patterns();
        }
        if let Some(languages) = file.languages {
            settings.languages = languages.into_patterns();
        }

        let section = file.rules.unwrap_or(file.flat);
        let ignore = section.ignore.clone().or(file.ignore);
        if let Some(ignore) = ignore {
            settings.ignore = ignore.into_patterns();
        }
        settings.rules = section.resolve();

        settings
    }

    /// Validate settings before any file is touched.
    ///
    /// Returns an error if a required path list is empty or any glob or
    /// regular expression is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.project.is_empty() || self.languages.is_empty() {
            bail!("Path to project or languages is incorrect");
        }

        for (field, patterns) in [
            ("project", &self.project),
            ("languages", &self.languages),
            ("ignore", &self.ignore),
        ] {
            for pattern in patterns {
                validate_pattern(pattern).with_context(|| {
                    format!("Invalid glob pattern in '{}': \"{}\"", field, pattern)
                })?;
            }
        }

        for (field, patterns) in [
            ("ignoredKeys", &self.rules.ignored_keys),
            ("customRegExpToFindKeys", &self.rules.custom_reg_exp_to_find_keys),
        ] {
            for pattern in patterns {
                RegexBuilder::new(pattern)
                    .case_insensitive(field == "ignoredKeys")
                    .build()
                    .with_context(|| {
                        format!("Invalid regular expression in '{}': \"{}\"", field, pattern)
                    })?;
            }
        }

        Ok(())
    }
}

pub fn default_config() -> ConfigFile {
    ConfigFile {
        project: Some(PatternList::Joined(DEFAULT_PROJECT.to_string())),
        languages: Some(PatternList::Joined(DEFAULT_LANGUAGES.to_string())),
        ignore: Some(PatternList::List(Vec::new())),
        rules: Some(RulesConfig::default().into()),
        flat: RulesSection::default(),
    }
}

pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: ConfigFile,
    /// Path of the file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn parse_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: ConfigFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    Ok(config)
}

/// Load the explicit config file, or search for one starting at `start_dir`.
pub fn load_config(start_dir: &Path, explicit: Option<&Path>) -> Result<ConfigLoadResult> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file '{}' does not exist.", path.display());
        }
        return Ok(ConfigLoadResult {
            config: parse_config_file(path)?,
            path: Some(path.to_path_buf()),
        });
    }

    match find_config_file(start_dir) {
        Some(path) => Ok(ConfigLoadResult {
            config: parse_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: ConfigFile::default(),
            path: None,
        }),
    }
}
