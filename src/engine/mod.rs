//! engine
//!
//! Orchestrates one documentation run: Ingest -> Plan -> Emit -> Splice.
//!
//! # Architecture
//!
//! The engine is the only layer that touches the filesystem on behalf of
//! the pipeline. Everything it consumes from [`crate::core`] is pure; the
//! external process sits behind [`crate::ingest::SpecSource`] and the
//! template engine behind [`crate::render::PageRenderer`].
//!
//! # Modules
//!
//! - [`plan`]: which pages exist and where they go
//! - [`exec`]: rendering and atomic writes
//! - [`runner`]: the full pipeline and its report
//!
//! # Invariants
//!
//! - A failed render never leaves a partial page behind
//! - The site-config document is rewritten only when its content changes

pub mod exec;
pub mod plan;
pub mod runner;

pub use exec::{EmitReport, Emitter, ExecError, PageFailure};
pub use plan::{PagePlan, PlannedPage};
pub use runner::{Generator, NavFormat, NavUpdate, RunError, RunOptions, RunReport};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory relative paths are resolved against.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("failed to determine current directory"),
        }
    }
}
