//! core
//!
//! Core domain types and pure operations for specdocs.
//!
//! # Modules
//!
//! - [`spec`] - Typed command tree: CommandNode, CommandPath, FlagSpec
//! - [`classify`] - Leaf/group classification and partitioning
//! - [`naming`] - Display names and acronym normalization
//! - [`front_matter`] - Page metadata per role
//! - [`nav`] - Navigation outline and its YAML block
//! - [`splice`] - Owned-section replacement in the site-config document
//! - [`paths`] - Centralized page-location routing
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Invalid trees cannot be constructed
//! - Everything here except `config` loading is free of I/O
//! - All derived output is deterministic

pub mod classify;
pub mod config;
pub mod front_matter;
pub mod nav;
pub mod naming;
pub mod paths;
pub mod splice;
pub mod spec;
