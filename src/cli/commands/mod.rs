pub mod check;
pub mod init;
pub mod keys;
pub mod languages;

use std::{env, path::Path};

use anyhow::{Context, Result};

use super::args::CommonArgs;
use crate::{
    config::{Settings, load_config},
    core::paths::split_pattern_list,
};

/// Build settings for a command.
///
/// Priority: CLI arguments > config file > defaults. Relative paths are
/// resolved against the working directory.
pub fn load_settings(common: &CommonArgs) -> Result<Settings> {
    let cwd = env::current_dir().context("Failed to read the working directory")?;
    load_settings_in(&cwd, common)
}

pub fn load_settings_in(cwd: &Path, common: &CommonArgs) -> Result<Settings> {
    let loaded = load_config(cwd, common.config.as_deref())?;
    if common.verbose
        && let Some(path) = &loaded.path
    {
        eprintln!("Using config file {}", path.display());
    }

    let mut settings = Settings::from_file(loaded.config, cwd);

    if let Some(project) = &common.project {
        settings.project = split_pattern_list(project);
    }
    if let Some(languages) = &common.languages {
        settings.languages = split_pattern_list(languages);
    }
    if !common.ignore.is_empty() {
        settings.ignore = common
            .ignore
            .iter()
            .flat_map(|joined| split_pattern_list(joined))
            .collect();
    }
    if let Some(deep_search) = common.deep_search {
        settings.rules.deep_search = deep_search;
    }
    if !common.custom_regexp.is_empty() {
        settings.rules.custom_reg_exp_to_find_keys = common.custom_regexp.clone();
    }

    Ok(settings)
}
