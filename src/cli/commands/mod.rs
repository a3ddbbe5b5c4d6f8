//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and applies command-line overrides
//! 2. Calls the engine to do the work
//! 3. Formats and displays output
//!
//! Running `specdocs` without a subcommand is the generate command.

mod completion;
mod config_cmd;
mod generate;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{init as config_init, show as config_show};
pub use generate::generate;

use std::path::Path;

use anyhow::{Context as _, Result};

use super::args::{Command, ConfigAction, GenerateArgs};
use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Dispatch a parsed command line to its handler.
pub fn dispatch(command: Option<Command>, generate_args: GenerateArgs, ctx: &Context) -> Result<()> {
    match command {
        None => generate(ctx, &generate_args),
        Some(Command::Completion { shell }) => completion(shell),
        Some(Command::Config { action }) => match action {
            ConfigAction::Show => config_show(ctx),
            ConfigAction::Init { force } => config_init(ctx, force),
        },
    }
}

/// Load configuration for `cwd`, surfacing load warnings.
fn load_config(ctx: &Context, cwd: &Path, verbosity: Verbosity) -> Result<Config> {
    let explicit = ctx.config.as_ref().map(|path| cwd.join(path));
    let loaded = Config::load(explicit.as_deref(), cwd).context("failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }
    if let Some(path) = loaded.config.loaded_from() {
        output::debug(format!("using config {}", path.display()), verbosity);
    }
    Ok(loaded.config)
}
