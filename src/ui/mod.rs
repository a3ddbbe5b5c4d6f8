//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so that quiet mode and
//! the stdout/stderr split are applied consistently. Diagnostics for
//! developers go through `tracing` instead.

pub mod output;
