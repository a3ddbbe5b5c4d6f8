//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! cli_binary = "./xcsh"
//! binary_name = "xcsh"
//! root_command = "cloudstatus"
//! root_label = "Cloud Status"
//! output = "docs/commands/cloudstatus"
//! templates = "templates"
//! page_root = "commands/cloudstatus"
//! keywords = ["xcsh", "F5", "F5 XC", "F5 Distributed Cloud"]
//! acronyms = ["BGP"]
//!
//! [nav]
//! document = "mkdocs.yml"
//! indent = 4
//! fallback_header = "Commands"
//! strict_depth = false
//!
//! [pages]
//! overview = "overview.md.j2"
//! group = "group.md.j2"
//! command = "command.md.j2"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: the root command must be a
//! non-empty path, labels and template names must be non-empty, and the
//! nav indent must leave room for the fallback header two spaces above it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::spec::CommandPath;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Spec-producing binary to run with `--spec`
    pub cli_binary: Option<PathBuf>,

    /// Binary name used in titles and invocations
    pub binary_name: Option<String>,

    /// Space-separated path of the documented root command
    pub root_command: Option<String>,

    /// Human label of the root command (nav section and overview title)
    pub root_label: Option<String>,

    /// Directory generated pages are written to
    pub output: Option<PathBuf>,

    /// Directory holding page templates
    pub templates: Option<PathBuf>,

    /// Site path prefix of generated pages in navigation
    pub page_root: Option<String>,

    /// Brand keywords added to every page
    pub keywords: Option<Vec<String>>,

    /// Extra acronyms on top of the built-in table
    pub acronyms: Option<Vec<String>>,

    /// Navigation splice settings
    pub nav: Option<NavConfig>,

    /// Template names per page role
    pub pages: Option<PagesConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root_command {
            CommandPath::parse(root).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid root_command '{}': {}", root, e))
            })?;
        }

        non_empty("binary_name", self.binary_name.as_deref())?;
        non_empty("root_label", self.root_label.as_deref())?;

        if let Some(nav) = &self.nav {
            nav.validate()?;
        }
        if let Some(pages) = &self.pages {
            pages.validate()?;
        }

        Ok(())
    }
}

/// Navigation splice settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Site-config document that owns the navigation
    pub document: Option<PathBuf>,

    /// Label of the owned section (defaults to `root_label`)
    pub label: Option<String>,

    /// Indentation of the owned section's entry line
    pub indent: Option<usize>,

    /// Section after which a missing owned section is inserted
    pub fallback_header: Option<String>,

    /// Fail instead of warn when commands nest deeper than one group level
    pub strict_depth: Option<bool>,
}

impl NavConfig {
    /// Smallest indent that leaves room for the fallback header.
    pub const MIN_INDENT: usize = 2;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(indent) = self.indent {
            if indent < Self::MIN_INDENT {
                return Err(ConfigError::InvalidValue(format!(
                    "nav.indent must be at least {}, got {}",
                    Self::MIN_INDENT,
                    indent
                )));
            }
        }
        non_empty("nav.label", self.label.as_deref())?;
        non_empty("nav.fallback_header", self.fallback_header.as_deref())?;
        Ok(())
    }
}

/// Template names per page role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub overview: Option<String>,
    pub group: Option<String>,
    pub command: Option<String>,
}

impl PagesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("pages.overview", self.overview.as_deref())?;
        non_empty("pages.group", self.group.as_deref())?;
        non_empty("pages.command", self.command.as_deref())?;
        Ok(())
    }
}

fn non_empty(key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::InvalidValue(format!(
            "{} cannot be empty",
            key
        ))),
        _ => Ok(()),
    }
}
