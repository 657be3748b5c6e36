use anyhow::Result;

use super::load_settings;
use crate::{
    cli::{
        args::{KeysCommand, OutputFormat},
        report,
    },
    core::{ExitStatus, LintContext, key_inventory},
};

pub fn keys(cmd: KeysCommand) -> Result<ExitStatus> {
    let settings = load_settings(&cmd.common)?;
    let ctx = LintContext::new(settings, cmd.common.verbose)?;
    let keys = key_inventory(&ctx.dictionary, ctx.views());

    match cmd.common.format {
        OutputFormat::Text => report::print_keys(&keys),
        OutputFormat::Json => report::print_json(&keys)?,
    }

    Ok(ExitStatus::Success)
}
