//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this configuration file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Without a subcommand, `specdocs` generates documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::NavFormat;

/// specdocs - Generate command reference pages from a CLI's --spec output
#[derive(Parser, Debug)]
#[command(name = "specdocs")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "\
WORKFLOW EXAMPLES:
    # Preview the navigation block for mkdocs.yml
    specdocs --print-nav

    # Regenerate pages from scratch and update mkdocs.yml
    specdocs --clean --update-nav

    # Document another command group of another binary
    specdocs --cli-binary ./bin/tool --root 'login profile' --label Profiles")]
pub struct Cli {
    /// Run as if specdocs was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Configuration file (default: search specdocs.toml, then user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Options of the generation run. Each overrides its configuration key.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Spec-producing binary, run as `<binary> --spec`
    #[arg(long, value_name = "PATH")]
    pub cli_binary: Option<PathBuf>,

    /// Directory pages are written to
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory holding the page templates
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Command to document, as a space-separated path
    #[arg(long, value_name = "CMD")]
    pub root: Option<String>,

    /// Label of the root command in navigation and titles
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,

    /// Site-config document whose navigation is updated
    #[arg(long, value_name = "FILE")]
    pub nav_file: Option<PathBuf>,

    /// Remove the output directory before generating
    #[arg(long)]
    pub clean: bool,

    /// Print the navigation block and exit without generating
    #[arg(long, conflicts_with_all = ["clean", "update_nav"])]
    pub print_nav: bool,

    /// Format of --print-nav output [default: yaml]
    #[arg(long, value_enum, requires = "print_nav")]
    pub format: Option<NavFormatArg>,

    /// Replace or insert the navigation section in the site-config document
    #[arg(long)]
    pub update_nav: bool,

    /// Fail when commands nest deeper than one group level
    #[arg(long)]
    pub strict_depth: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or initialize configuration
    #[command(
        name = "config",
        after_help = "\
WORKFLOW EXAMPLES:
    # Show the effective configuration
    specdocs config show

    # Write a specdocs.toml with every default spelled out
    specdocs config init"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for specdocs.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash
    specdocs completion bash > ~/.local/share/bash-completion/completions/specdocs

    # Zsh
    specdocs completion zsh > ~/.zfunc/_specdocs

    # Fish
    specdocs completion fish > ~/.config/fish/completions/specdocs.fish

    # PowerShell
    specdocs completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write a default specdocs.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Supported shells for completion
#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Output formats for --print-nav
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavFormatArg {
    #[default]
    Yaml,
    Json,
}

impl From<NavFormatArg> for NavFormat {
    fn from(arg: NavFormatArg) -> Self {
        match arg {
            NavFormatArg::Yaml => NavFormat::Yaml,
            NavFormatArg::Json => NavFormat::Json,
        }
    }
}
