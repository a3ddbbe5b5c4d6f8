//! render
//!
//! Turning page contexts into page text.
//!
//! # Architecture
//!
//! The `PageRenderer` trait is the seam between emission and the template
//! engine. [`TemplateEnvironment`] is the production implementation backed
//! by a directory of Jinja-style templates; tests can substitute anything
//! that maps a role and a context to text.
//!
//! # Modules
//!
//! - [`context`]: the variables each page role exposes to its template
//! - [`templates`]: minijinja environment, filters and template lookup

pub mod context;
pub mod templates;

pub use context::PageContext;
pub use templates::{TemplateEnvironment, TemplateNames};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::front_matter::Role;

/// Errors from page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The templates directory does not exist.
    #[error("templates directory not found at {0}")]
    TemplatesMissing(PathBuf),

    /// A template failed to load or render.
    #[error("failed to render template '{template}': {source}")]
    Template {
        template: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders one page per call.
pub trait PageRenderer {
    fn render(&self, role: Role, context: &PageContext<'_>) -> Result<String, RenderError>;
}
