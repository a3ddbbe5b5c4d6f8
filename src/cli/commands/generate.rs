//! generate command - Render pages and update navigation

use anyhow::{bail, Context as _, Result};

use super::load_config;
use crate::cli::args::GenerateArgs;
use crate::core::config::{Config, NavConfig};
use crate::engine::{Context, Generator, NavUpdate, RunOptions};
use crate::ingest::process::ProcessSpecSource;
use crate::ui::output::{self, format_list, Verbosity};

/// Generate documentation pages for the configured root command.
pub fn generate(ctx: &Context, args: &GenerateArgs) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let cwd = ctx.working_dir()?;
    let config = apply_overrides(load_config(ctx, &cwd, verbosity)?, args)?;

    let source = ProcessSpecSource::new(cwd.join(config.cli_binary()))?;
    let options = RunOptions {
        clean: args.clean,
        print_nav: args
            .print_nav
            .then(|| args.format.unwrap_or_default().into()),
        update_nav: args.update_nav,
    };

    if options.print_nav.is_none() {
        output::print(
            format!("Loading spec from {}...", source.binary().display()),
            verbosity,
        );
    }

    let report = Generator::new(&config, &source, &cwd).run(&options)?;

    for warning in &report.warnings {
        output::warn(warning, verbosity);
    }

    if let Some(nav) = &report.nav_text {
        output::data(nav);
        return Ok(());
    }

    if let Some(emitted) = &report.emitted {
        for path in &emitted.written {
            output::page_written(path, verbosity);
        }
        output::print(
            format!(
                "Generated {} page(s) for '{}'",
                emitted.written.len(),
                config.root_command()
            ),
            verbosity,
        );
    }

    match &report.nav_update {
        Some(NavUpdate::Spliced { path, outcome }) => {
            output::print(output::splice_summary(path, outcome), verbosity);
        }
        Some(NavUpdate::DocumentMissing(_)) => {}
        None => output::print(
            format!(
                "To add to {}, run with --print-nav or --update-nav",
                config.nav_document().display()
            ),
            verbosity,
        ),
    }

    if let Some(emitted) = report.emitted.as_ref().filter(|e| !e.is_success()) {
        let failed: Vec<String> = emitted
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.location, f.message))
            .collect();
        bail!(
            "{} page(s) failed to render:\n{}",
            failed.len(),
            format_list(&failed, "  - ")
        );
    }

    Ok(())
}

/// Merge command-line flags over the loaded configuration.
fn apply_overrides(config: Config, args: &GenerateArgs) -> Result<Config> {
    let mut file = config.file;

    if let Some(binary) = &args.cli_binary {
        file.cli_binary = Some(binary.clone());
    }
    if let Some(output) = &args.output {
        file.output = Some(output.clone());
    }
    if let Some(templates) = &args.templates {
        file.templates = Some(templates.clone());
    }
    if let Some(root) = &args.root {
        file.root_command = Some(root.clone());
    }
    if let Some(label) = &args.label {
        file.root_label = Some(label.clone());
    }
    if args.nav_file.is_some() || args.strict_depth {
        let nav = file.nav.get_or_insert_with(NavConfig::default);
        if let Some(document) = &args.nav_file {
            nav.document = Some(document.clone());
        }
        if args.strict_depth {
            nav.strict_depth = Some(true);
        }
    }

    Config::from_file_config(file).context("invalid command-line option")
}
