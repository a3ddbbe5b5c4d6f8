//! render::templates
//!
//! Template environment backed by a directory of `.md.j2` files.
//!
//! # Filters
//!
//! | Filter                | Effect                                        |
//! |-----------------------|-----------------------------------------------|
//! | `to_human_readable`   | `api-keys` -> `API Keys`                      |
//! | `normalize_acronyms`  | `the api url` -> `the API URL`                |
//! | `to_title_case`       | `exit codes` -> `Exit Codes`                  |
//! | `underscore_to_space` | `exit_codes` -> `exit codes`                  |
//!
//! Every filter maps `none` and undefined to the empty string.
//!
//! Blocks are trimmed (`trim_blocks`, `lstrip_blocks`) and output is never
//! escaped; pages are Markdown, not HTML.

use std::path::Path;

use minijinja::{path_loader, AutoEscape, Environment};
use tracing::debug;

use super::{PageContext, PageRenderer, RenderError};
use crate::core::front_matter::Role;
use crate::core::nav::yaml_quoted;
use crate::core::naming::{to_title_case, underscore_to_space, Naming};

/// Template file names per page role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNames {
    pub overview: String,
    pub group: String,
    pub command: String,
}

impl TemplateNames {
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Overview => &self.overview,
            Role::Group => &self.group,
            Role::Leaf => &self.command,
        }
    }
}

/// A minijinja environment loading templates from one directory.
#[derive(Debug)]
pub struct TemplateEnvironment {
    env: Environment<'static>,
    names: TemplateNames,
}

impl TemplateEnvironment {
    /// Create an environment over `dir`.
    ///
    /// Templates are loaded lazily; a missing template surfaces when the
    /// page that needs it is rendered.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::TemplatesMissing` if `dir` is not a directory.
    pub fn new(dir: &Path, names: TemplateNames, naming: &Naming) -> Result<Self, RenderError> {
        if !dir.is_dir() {
            return Err(RenderError::TemplatesMissing(dir.to_path_buf()));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_filters(&mut env, naming);

        debug!(dir = %dir.display(), "template environment ready");
        Ok(Self { env, names })
    }

    pub fn names(&self) -> &TemplateNames {
        &self.names
    }
}

fn register_filters(env: &mut Environment<'static>, naming: &Naming) {
    let humanize = naming.clone();
    env.add_filter("to_human_readable", move |value: Option<String>| {
        value.map(|v| humanize.humanize(&v)).unwrap_or_default()
    });

    let acronyms = naming.clone();
    env.add_filter("normalize_acronyms", move |value: Option<String>| {
        value
            .map(|v| acronyms.normalize_acronyms(&v))
            .unwrap_or_default()
    });

    env.add_filter("to_title_case", |value: Option<String>| {
        value.map(|v| to_title_case(&v)).unwrap_or_default()
    });

    env.add_filter("underscore_to_space", |value: Option<String>| {
        value.map(|v| underscore_to_space(&v)).unwrap_or_default()
    });

    env.add_filter("yaml_quote", |value: Option<String>| {
        yaml_quoted(value.as_deref().unwrap_or_default())
    });
}

impl PageRenderer for TemplateEnvironment {
    fn render(&self, role: Role, context: &PageContext<'_>) -> Result<String, RenderError> {
        let name = self.names.for_role(role);
        let wrap = |source| RenderError::Template {
            template: name.to_string(),
            source,
        };
        let template = self.env.get_template(name).map_err(wrap)?;
        template.render(context).map_err(wrap)
    }
}
