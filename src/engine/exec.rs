//! engine::exec
//!
//! Page emission: render each planned page, then write it.
//!
//! # Failure model
//!
//! A page whose template fails to render is recorded in the
//! [`EmitReport`] and skipped; later pages are still emitted. I/O failures
//! (creating directories, writing files) abort emission.
//!
//! Each file is written to a temporary sibling and renamed into place, so
//! an interrupted run never leaves a half-written page.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::plan::{PagePlan, PlannedPage};
use crate::core::front_matter::{FrontMatterBuilder, Role};
use crate::core::nav::NavEntry;
use crate::core::paths::PageLocation;
use crate::core::spec::{CommandPath, ExtendedSpec};
use crate::render::{PageContext, PageRenderer};

/// Errors that abort emission.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Removing the output directory failed.
    #[error("failed to clean {path}: {source}")]
    Clean {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Creating a directory failed.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a page failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A page that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub location: PageLocation,
    pub message: String,
}

/// What one emission run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Files written, in plan order.
    pub written: Vec<PathBuf>,
    /// Pages skipped because rendering failed.
    pub failures: Vec<PageFailure>,
}

impl EmitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders and writes the pages of a plan.
pub struct Emitter<'a> {
    renderer: &'a dyn PageRenderer,
    front_matter: &'a FrontMatterBuilder,
    root: &'a CommandPath,
    nav: &'a [NavEntry],
    extended: &'a ExtendedSpec,
}

impl<'a> Emitter<'a> {
    pub fn new(
        renderer: &'a dyn PageRenderer,
        front_matter: &'a FrontMatterBuilder,
        root: &'a CommandPath,
        nav: &'a [NavEntry],
        extended: &'a ExtendedSpec,
    ) -> Self {
        Self {
            renderer,
            front_matter,
            root,
            nav,
            extended,
        }
    }

    /// Emit every page of `plan` below `output_dir`.
    ///
    /// With `clean`, `output_dir` is removed first.
    pub fn emit(
        &self,
        plan: &PagePlan<'_>,
        output_dir: &Path,
        clean: bool,
    ) -> Result<EmitReport, ExecError> {
        if clean && output_dir.exists() {
            debug!(dir = %output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(output_dir).map_err(|source| ExecError::Clean {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }
        create_dir(output_dir)?;

        let mut report = EmitReport::default();
        for page in plan.pages() {
            let content = match self.render(page) {
                Ok(content) => content,
                Err(message) => {
                    debug!(page = %page.location, %message, "page skipped");
                    report.failures.push(PageFailure {
                        location: page.location.clone(),
                        message,
                    });
                    continue;
                }
            };

            let path = page.location.file_path(output_dir);
            write_atomic(&path, &content)?;
            debug!(path = %path.display(), "page written");
            report.written.push(path);
        }

        Ok(report)
    }

    fn render(&self, page: &PlannedPage<'_>) -> Result<String, String> {
        let front_matter = self.front_matter.build(page.node, page.role);
        let context = match page.role {
            Role::Overview => PageContext::overview(front_matter, page.node, self.nav, self.extended),
            Role::Group => PageContext::group(front_matter, page.node),
            Role::Leaf => PageContext::leaf(front_matter, page.node, self.root),
        };
        self.renderer
            .render(page.role, &context)
            .map_err(|e| e.to_string())
    }
}

fn create_dir(path: &Path) -> Result<(), ExecError> {
    fs::create_dir_all(path).map_err(|source| ExecError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `content` to `path` via a temporary sibling and a rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<(), ExecError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }

    let write_err = |source| ExecError::Write {
        path: path.to_path_buf(),
        source,
    };
    let temp = temp_sibling(path);
    fs::write(&temp, content).map_err(write_err)?;
    fs::rename(&temp, path).map_err(|source| {
        let _ = fs::remove_file(&temp);
        write_err(source)
    })
}

/// Hidden sibling used as the rename source, e.g. `.mkdocs.yml.specdocs-tmp`.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.specdocs-tmp", name))
}
