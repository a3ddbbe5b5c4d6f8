//! ingest::traits
//!
//! `SpecSource` trait and its error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::spec::{CliSpec, CommandPath, ExtendedSpec};

/// Errors from obtaining a spec document.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The spec-producing binary does not exist.
    #[error("CLI binary not found at {0}")]
    BinaryNotFound(PathBuf),

    /// The binary could not be started.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The binary exited unsuccessfully.
    #[error("'{command}' exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: String,
        stderr: String,
    },

    /// The output was not a valid spec document.
    #[error("failed to parse output of '{command}': {source}")]
    Malformed {
        command: String,
        source: serde_json::Error,
    },
}

/// A provider of spec documents.
pub trait SpecSource {
    /// The full command tree.
    fn full_spec(&self) -> Result<CliSpec, IngestError>;

    /// Extended metadata scoped to `root`.
    fn extended_spec(&self, root: &CommandPath) -> Result<ExtendedSpec, IngestError>;
}
