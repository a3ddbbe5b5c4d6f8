//! config command - Show or initialize configuration

use std::path::Path;

use anyhow::{Context as _, Result};

use super::load_config;
use crate::core::config::{Config, PROJECT_FILE};
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Print the effective configuration as TOML.
///
/// Every key is shown with its resolved value, so the output is itself a
/// valid configuration file.
pub fn show(ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let cwd = ctx.working_dir()?;
    let config = load_config(ctx, &cwd, verbosity)?;

    let text = toml::to_string_pretty(&config.effective())
        .context("failed to serialize configuration")?;

    match config.loaded_from() {
        Some(path) => output::data(format!("# loaded from {}\n{}", path.display(), text)),
        None => output::data(format!("# built-in defaults\n{}", text)),
    }
    Ok(())
}

/// Write a configuration file with every default spelled out.
///
/// Writes `--config <path>` if given, otherwise `specdocs.toml` in the
/// working directory.
pub fn init(ctx: &Context, force: bool) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let cwd = ctx.working_dir()?;
    let path = cwd.join(ctx.config.as_deref().unwrap_or(Path::new(PROJECT_FILE)));

    Config::write_default(&path, force)
        .with_context(|| format!("failed to initialize {}", path.display()))?;
    output::print(format!("Wrote {}", path.display()), verbosity);
    Ok(())
}
