//! specdocs - Command reference pages from a CLI's `--spec` output
//!
//! specdocs runs a CLI binary with `--spec`, takes the command tree below
//! one root command, and renders a Markdown page per command through
//! templates. It also derives the navigation outline for those pages and
//! can splice it into a site-config document such as `mkdocs.yml` without
//! disturbing the rest of the file.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Ingest → Plan → Emit → Splice
//! - [`core`] - Domain types and pure operations: spec tree, classification,
//!   naming, front matter, navigation, splicing, configuration
//! - [`ingest`] - Obtaining spec documents from the external binary
//! - [`render`] - Template environment and page contexts
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Command trees are validated on ingestion; sibling names are unique
//! 2. Navigation and page layout are pure functions of the tree
//! 3. Splicing touches only the owned section and is idempotent
//! 4. Files are replaced atomically

pub mod cli;
pub mod core;
pub mod engine;
pub mod ingest;
pub mod render;
pub mod ui;
