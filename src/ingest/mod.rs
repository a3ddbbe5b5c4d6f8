//! ingest
//!
//! Obtaining the CLI spec from the spec-producing binary.
//!
//! # Architecture
//!
//! The `SpecSource` trait is the seam between the pipeline and the external
//! process. The pipeline only sees parsed, validated specs.
//!
//! Two documents are requested:
//! - the full command tree (`<binary> --spec`), required
//! - extended metadata for the root command (`<binary> <root> --spec`),
//!   optional; failures degrade to an empty [`ExtendedSpec`]
//!
//! # Modules
//!
//! - `traits`: `SpecSource` trait and `IngestError`
//! - [`process`]: runs the binary as a child process
//! - [`mock`]: in-memory source for deterministic testing
//!
//! [`ExtendedSpec`]: crate::core::spec::ExtendedSpec

pub mod mock;
pub mod process;
mod traits;

pub use traits::*;

use tracing::debug;

use crate::core::spec::{CommandPath, ExtendedSpec};

/// Fetch extended metadata, degrading to empty on any failure.
///
/// Returns the metadata plus the error that caused degradation, if any,
/// so callers can surface it.
pub fn load_extended(
    source: &dyn SpecSource,
    root: &CommandPath,
) -> (ExtendedSpec, Option<IngestError>) {
    match source.extended_spec(root) {
        Ok(extended) => (extended, None),
        Err(err) => {
            debug!(root = %root, error = %err, "extended spec unavailable, using empty defaults");
            (ExtendedSpec::default(), Some(err))
        }
    }
}
