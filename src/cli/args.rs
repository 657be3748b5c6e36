//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Lint translation keys against the views
//! - `keys`: List every key with its languages and views
//! - `languages`: List language files with key counts
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::{config::ToggleRule, issues::ErrorType};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Keys(cmd)) => cmd.common.verbose,
            Some(Command::Languages(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Common arguments shared by all commands that read a project.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project files: globs or directories, comma separated (overrides config file)
    #[arg(short, long, env = "KEYLINT_PROJECT")]
    pub project: Option<String>,

    /// Language files: globs or directories, comma separated (overrides config file)
    #[arg(short, long, env = "KEYLINT_LANGUAGES")]
    pub languages: Option<String>,

    /// Paths to ignore, comma separated (repeatable)
    #[arg(short, long)]
    pub ignore: Vec<String>,

    /// Path to the config file (default: search for .keylintrc.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat dotted key prefixes as references to every key below them
    #[arg(long, value_enum)]
    pub deep_search: Option<ToggleRule>,

    /// Regular expression finding keys in views (repeatable, replaces the default matcher)
    #[arg(long = "custom-regexp")]
    pub custom_regexp: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Severity of keys defined but never used
    #[arg(long, value_enum)]
    pub zombie_keys: Option<ErrorType>,

    /// Severity of keys used but missing from a language file
    #[arg(long, value_enum)]
    pub keys_on_views: Option<ErrorType>,

    /// Severity of keys with an empty value
    #[arg(long, value_enum)]
    pub empty_keys: Option<ErrorType>,

    /// Number of warnings tolerated before the run fails
    #[arg(long)]
    pub max_warning: Option<usize>,

    /// Regular expression of keys to leave out of the report (repeatable)
    #[arg(long)]
    pub ignored_keys: Vec<String>,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LanguagesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check translation keys against the views
    Check(CheckCommand),

    /// List every key with the languages defining it and the views using it
    Keys(KeysCommand),

    /// List language files with their key counts
    Languages(LanguagesCommand),

    /// Initialize a .keylintrc.json configuration file
    Init,
}
