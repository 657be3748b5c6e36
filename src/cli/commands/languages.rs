use anyhow::Result;

use super::load_settings;
use crate::{
    cli::{
        args::{LanguagesCommand, OutputFormat},
        report,
    },
    core::{ExitStatus, LintContext, language_inventory},
};

pub fn languages(cmd: LanguagesCommand) -> Result<ExitStatus> {
    let settings = load_settings(&cmd.common)?;
    let ctx = LintContext::new(settings, cmd.common.verbose)?;
    let summaries = language_inventory(&ctx.dictionary, ctx.views(), ctx.deep_search());

    match cmd.common.format {
        OutputFormat::Text => report::print_languages(&summaries),
        OutputFormat::Json => report::print_json(&summaries)?,
    }

    Ok(ExitStatus::Success)
}
