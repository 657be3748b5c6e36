use std::cell::OnceCell;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::{
    config::Settings,
    core::{
        Dictionary, RunResult, ViewIndex, compile_ignored_keys, load_dictionary,
        matcher::{Matcher, build_matcher},
        paths::{LANGUAGE_EXTENSIONS, PathResolver, VIEW_EXTENSIONS},
        scan_views,
    },
    rules,
};

/// One lint run: resolved files, loaded dictionary and the key matcher.
///
/// Everything that can fail on configuration or language files happens in
/// [`LintContext::new`], before any view is read. The view scan itself runs
/// lazily on first access and cannot fail.
pub struct LintContext {
    pub settings: Settings,
    pub verbose: bool,

    /// Language files, in resolution order.
    pub language_files: Vec<String>,
    /// Views to scan. Never contains a language file.
    pub project_files: Vec<String>,
    pub dictionary: Dictionary,

    matcher: Matcher,
    views: OnceCell<ViewIndex>,
}

impl LintContext {
    pub fn new(settings: Settings, verbose: bool) -> Result<Self> {
        settings.validate()?;

        let resolver = PathResolver::new(&settings.base_dir, &settings.ignore, verbose)?;

        let language_files = resolver.resolve(&settings.languages, LANGUAGE_EXTENSIONS)?;
        if language_files.is_empty() {
            bail!(
                "No language files found matching {}",
                settings.languages.join(", ")
            );
        }

        let project_files: Vec<String> = resolver
            .resolve(&settings.project, VIEW_EXTENSIONS)?
            .into_iter()
            .filter(|file| !language_files.contains(file))
            .collect();
        if project_files.is_empty() && verbose {
            eprintln!(
                "{} No project files found matching {}",
                "warning:".bold().yellow(),
                settings.project.join(", ")
            );
        }

        let dictionary = load_dictionary(&language_files)?;
        let matcher = build_matcher(&dictionary.key_names(), &settings.rules)?;

        Ok(Self {
            settings,
            verbose,
            language_files,
            project_files,
            dictionary,
            matcher,
            views: OnceCell::new(),
        })
    }

    pub fn deep_search(&self) -> bool {
        self.settings.rules.deep_search()
    }

    /// Key references found in the project files.
    pub fn views(&self) -> &ViewIndex {
        self.views.get_or_init(|| {
            scan_views(
                &self.matcher,
                &self.project_files,
                self.deep_search(),
                self.verbose,
            )
        })
    }

    /// Evaluate every rule and aggregate the result.
    ///
    /// The views are not scanned when every rule is disabled.
    pub fn run(&self) -> Result<RunResult> {
        let rules = &self.settings.rules;
        let ignored = compile_ignored_keys(&rules.ignored_keys)?;

        if !rules.any_enabled() {
            return Ok(RunResult::new(Vec::new(), rules.max_warning).with_stats(
                0,
                0,
                self.language_files.len(),
            ));
        }

        let views = self.views();
        let violations = rules::evaluate(&self.dictionary, views, rules);

        Ok(RunResult::new(violations, rules.max_warning)
            .with_stats(views.scanned, views.skipped, self.language_files.len())
            .without_ignored(&ignored))
    }
}

/// Run the whole pipeline once for `settings`.
pub fn lint(settings: Settings, verbose: bool) -> Result<RunResult> {
    LintContext::new(settings, verbose)?.run()
}
