use anyhow::Result;

use super::load_settings;
use crate::{
    cli::{
        args::{CheckCommand, OutputFormat},
        report,
    },
    config::Settings,
    core::{ExitStatus, lint},
};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let mut settings = load_settings(&cmd.common)?;
    apply_rule_overrides(&cmd, &mut settings);

    let verbose = cmd.common.verbose;
    let result = lint(settings, verbose)?;

    match cmd.common.format {
        OutputFormat::Text => report::report(&result),
        OutputFormat::Json => report::print_result_json(&result)?,
    }
    report::print_skipped_warning(result.views_skipped, verbose);

    Ok(result.exit_status())
}

fn apply_rule_overrides(cmd: &CheckCommand, settings: &mut Settings) {
    let rules = &mut settings.rules;
    if let Some(zombie_keys) = cmd.zombie_keys {
        rules.zombie_keys = zombie_keys;
    }
    if let Some(keys_on_views) = cmd.keys_on_views {
        rules.keys_on_views = keys_on_views;
    }
    if let Some(empty_keys) = cmd.empty_keys {
        rules.empty_keys = empty_keys;
    }
    if let Some(max_warning) = cmd.max_warning {
        rules.max_warning = max_warning;
    }
    if !cmd.ignored_keys.is_empty() {
        rules.ignored_keys = cmd.ignored_keys.clone();
    }
}
