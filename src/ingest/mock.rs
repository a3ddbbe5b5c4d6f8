//! ingest::mock
//!
//! In-memory spec source for deterministic testing.
//!
//! # Example
//!
//! ```
//! use specdocs::core::spec::CommandPath;
//! use specdocs::ingest::mock::MockSpecSource;
//! use specdocs::ingest::SpecSource;
//!
//! let source = MockSpecSource::new(r#"{"commands": [{"path": ["cloudstatus"]}]}"#);
//! let spec = source.full_spec().unwrap();
//! assert_eq!(spec.commands()[0].name(), "cloudstatus");
//!
//! // No extended document configured: behaves like a failing binary.
//! let root = CommandPath::parse("cloudstatus").unwrap();
//! assert!(source.extended_spec(&root).is_err());
//! ```

use super::traits::{IngestError, SpecSource};
use crate::core::spec::{CliSpec, CommandPath, ExtendedSpec};

/// Serves fixed JSON documents.
#[derive(Debug, Clone)]
pub struct MockSpecSource {
    full: String,
    extended: Option<String>,
}

impl MockSpecSource {
    /// Serve `full` for the command tree and fail the extended request.
    pub fn new(full: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            extended: None,
        }
    }

    /// Serve `extended` for the extended metadata request.
    pub fn with_extended(mut self, extended: impl Into<String>) -> Self {
        self.extended = Some(extended.into());
        self
    }
}

impl SpecSource for MockSpecSource {
    fn full_spec(&self) -> Result<CliSpec, IngestError> {
        CliSpec::from_json(&self.full).map_err(|source| IngestError::Malformed {
            command: "mock --spec".to_string(),
            source,
        })
    }

    fn extended_spec(&self, root: &CommandPath) -> Result<ExtendedSpec, IngestError> {
        let command = format!("mock {} --spec", root);
        match &self.extended {
            Some(text) => serde_json::from_str(text)
                .map_err(|source| IngestError::Malformed { command, source }),
            None => Err(IngestError::NonZeroExit {
                command,
                status: "exit status: 1".to_string(),
                stderr: "unknown flag: --spec".to_string(),
            }),
        }
    }
}
