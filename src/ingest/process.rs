//! ingest::process
//!
//! Spec source backed by the spec-producing binary.
//!
//! Each request is a single blocking run with stdout captured in full; no
//! timeout is applied.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::traits::{IngestError, SpecSource};
use crate::core::spec::{CliSpec, CommandPath, ExtendedSpec};

/// Runs `<binary> [args...] --spec` and parses stdout as JSON.
#[derive(Debug, Clone)]
pub struct ProcessSpecSource {
    binary: PathBuf,
}

impl ProcessSpecSource {
    /// Create a source for `binary`.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::BinaryNotFound` if the path does not exist.
    pub fn new(binary: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let binary = binary.into();
        if !binary.exists() {
            return Err(IngestError::BinaryNotFound(binary));
        }
        Ok(Self { binary })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn run<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, IngestError> {
        let command = std::iter::once(self.binary.display().to_string())
            .chain(args.iter().map(|a| a.to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(%command, "requesting spec");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| IngestError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(IngestError::NonZeroExit {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(bytes = output.stdout.len(), "spec received");
        serde_json::from_slice(&output.stdout)
            .map_err(|source| IngestError::Malformed { command, source })
    }
}

impl SpecSource for ProcessSpecSource {
    fn full_spec(&self) -> Result<CliSpec, IngestError> {
        self.run(&["--spec"])
    }

    fn extended_spec(&self, root: &CommandPath) -> Result<ExtendedSpec, IngestError> {
        let mut args: Vec<&str> = root.segments().iter().map(String::as_str).collect();
        args.push("--spec");
        self.run(&args)
    }
}
