//! engine::runner
//!
//! The generation pipeline for one root command.
//!
//! # Stages
//!
//! ```text
//! Ingest -> Locate root -> Depth check -> Navigation -> [Print nav]
//!        -> Plan pages -> Emit -> [Splice nav into site config]
//! ```
//!
//! With `print_nav` the pipeline stops after computing navigation: no page
//! is written and the site-config document is not touched.
//!
//! Warnings (degraded extended metadata, undocumented deep commands, a
//! missing site-config document) are collected in the [`RunReport`] for the
//! caller to display. Page render failures are collected too; the caller
//! decides the exit status.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::exec::{write_atomic, EmitReport, Emitter, ExecError};
use super::plan::PagePlan;
use crate::core::classify::beyond_group_depth;
use crate::core::config::Config;
use crate::core::front_matter::FrontMatterBuilder;
use crate::core::nav::{render_block, NavBuilder, NavEntry};
use crate::core::spec::{CommandNode, SpecError};
use crate::core::splice::{
    FallbackAnchor, SectionAnchor, SectionPatch, SpliceError, SpliceOutcome, CHILD_STEP,
};
use crate::ingest::{load_extended, IngestError, SpecSource};
use crate::render::{PageRenderer, RenderError, TemplateEnvironment, TemplateNames};

/// Output form of `--print-nav`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavFormat {
    /// The site-config block, ready to paste.
    #[default]
    Yaml,
    /// `{"<label>": [...]}`, pretty-printed.
    Json,
}

/// What to do in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Remove the output directory before emitting.
    pub clean: bool,
    /// Print navigation only; emit nothing.
    pub print_nav: Option<NavFormat>,
    /// Splice navigation into the site-config document after emitting.
    pub update_nav: bool,
}

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("failed to serialize navigation: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to update {path}: {source}\nhint: run with --print-nav and add the block by hand")]
    Splice {
        path: PathBuf,
        #[source]
        source: SpliceError,
    },
}

/// Result of splicing navigation into the site-config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavUpdate {
    Spliced { path: PathBuf, outcome: SpliceOutcome },
    /// The document does not exist; nothing was written.
    DocumentMissing(PathBuf),
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Rendered navigation, when only printing it.
    pub nav_text: Option<String>,
    /// Pages emitted, when generating.
    pub emitted: Option<EmitReport>,
    pub nav_update: Option<NavUpdate>,
    pub warnings: Vec<String>,
}

impl RunReport {
    /// True unless a page failed to render.
    pub fn is_success(&self) -> bool {
        self.emitted.as_ref().map_or(true, EmitReport::is_success)
    }
}

/// Runs the pipeline for one configuration.
///
/// Relative paths from the configuration are resolved against `base`.
pub struct Generator<'a> {
    config: &'a Config,
    source: &'a dyn SpecSource,
    base: &'a Path,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config, source: &'a dyn SpecSource, base: &'a Path) -> Self {
        Self {
            config,
            source,
            base,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }

    /// Run with templates loaded from the configured directory.
    pub fn run(&self, options: &RunOptions) -> Result<RunReport, RunError> {
        if options.print_nav.is_some() {
            return self.run_with(None, options);
        }

        let names = TemplateNames {
            overview: self.config.overview_template().to_string(),
            group: self.config.group_template().to_string(),
            command: self.config.command_template().to_string(),
        };
        let templates = TemplateEnvironment::new(
            &self.resolve(&self.config.templates()),
            names,
            &self.config.naming(),
        )?;
        let renderer: &dyn PageRenderer = &templates;
        self.run_with(Some(renderer), options)
    }

    /// Run with an explicit renderer. `None` is only valid with `print_nav`.
    pub fn run_with(
        &self,
        renderer: Option<&dyn PageRenderer>,
        options: &RunOptions,
    ) -> Result<RunReport, RunError> {
        let mut report = RunReport::default();
        let root_path = self.config.root_command();

        info!(root = %root_path, "loading spec");
        let spec = self.source.full_spec()?;
        let root = spec.find_command(&root_path)?;
        self.check_depth(root, &mut report)?;
        let plan = PagePlan::for_root(root)?;

        let naming = self.config.naming();
        let page_root = self.config.page_root();
        let nav = NavBuilder::new(&page_root, &naming).build(root);
        let label = self.config.nav_label();

        if let Some(format) = options.print_nav {
            report.nav_text = Some(match format {
                NavFormat::Yaml => render_block(&label, &nav, self.config.nav_indent()),
                NavFormat::Json => serde_json::to_string_pretty(&NavEntry::Section {
                    title: label,
                    children: nav,
                })?,
            });
            return Ok(report);
        }

        let (extended, degraded) = load_extended(self.source, &root_path);
        if let Some(err) = degraded {
            report
                .warnings
                .push(format!("extended spec unavailable, continuing without it: {}", err));
        }

        let Some(renderer) = renderer else {
            return Ok(report);
        };

        let front_matter = FrontMatterBuilder::new(
            self.config.binary_name(),
            root_path.clone(),
            self.config.root_label(),
            self.config.keywords(),
            naming,
        );
        let output = self.resolve(&self.config.output());
        info!(pages = plan.len(), output = %output.display(), "emitting pages");

        let emitted = Emitter::new(renderer, &front_matter, &root_path, &nav, &extended)
            .emit(&plan, &output, options.clean)?;
        report.emitted = Some(emitted);

        if options.update_nav {
            let block = render_block(&label, &nav, self.config.nav_indent());
            let update = self.update_nav(&label, &block)?;
            if let NavUpdate::DocumentMissing(path) = &update {
                report.warnings.push(format!(
                    "{} not found, navigation not updated",
                    path.display()
                ));
            }
            report.nav_update = Some(update);
        }

        Ok(report)
    }

    fn check_depth(&self, root: &CommandNode, report: &mut RunReport) -> Result<(), SpecError> {
        let deep = beyond_group_depth(root);
        if deep.is_empty() {
            return Ok(());
        }

        let paths: Vec<String> = deep.iter().map(|n| n.path().joined()).collect();
        if self.config.strict_depth() {
            return Err(SpecError::TooDeep {
                root: root.path().joined(),
                paths,
            });
        }
        for path in paths {
            report
                .warnings
                .push(format!("'{}' is nested too deep and will not be documented", path));
        }
        Ok(())
    }

    fn update_nav(&self, label: &str, block: &str) -> Result<NavUpdate, RunError> {
        let path = self.resolve(&self.config.nav_document());
        if !path.exists() {
            return Ok(NavUpdate::DocumentMissing(path));
        }

        let document = fs::read_to_string(&path).map_err(|source| RunError::ReadDocument {
            path: path.clone(),
            source,
        })?;

        let indent = self.config.nav_indent();
        let patch = SectionPatch::new(
            SectionAnchor::new(label, indent),
            FallbackAnchor::new(self.config.fallback_header(), indent - CHILD_STEP),
            block,
        );
        let spliced = patch.apply(&document).map_err(|source| RunError::Splice {
            path: path.clone(),
            source,
        })?;

        if spliced.outcome != SpliceOutcome::Unchanged {
            write_atomic(&path, &spliced.text)?;
        }
        debug!(path = %path.display(), outcome = ?spliced.outcome, "navigation spliced");

        Ok(NavUpdate::Spliced {
            path,
            outcome: spliced.outcome,
        })
    }
}
