//! Integration tests for the generation pipeline.
//!
//! These tests run the full pipeline (ingest, plan, emit, splice) against
//! an in-memory spec source and the templates shipped with the crate,
//! writing into temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use specdocs::core::config::{Config, FileConfig, NavConfig};
use specdocs::core::splice::{SpliceError, SpliceOutcome};
use specdocs::engine::{Generator, NavFormat, NavUpdate, RunError, RunOptions, RunReport};
use specdocs::ingest::mock::MockSpecSource;

// =============================================================================
// Test Fixtures
// =============================================================================

const SPEC: &str = include_str!("fixtures/xcsh-spec.json");
const EXTENDED: &str = include_str!("fixtures/cloudstatus-extended.json");

const MKDOCS: &str = "\
site_name: xcsh
nav:
  - Home: index.md
  - Commands:
    - Login: commands/login.md
    # generated below
    - Cloud Status:
      - Overview: commands/cloudstatus/index.md
      - Old: commands/cloudstatus/old.md
      - Gone:
        - Overview: commands/cloudstatus/gone/index.md
    - Configure: commands/configure.md
theme:
  name: material  # keep this comment
";

fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// A site directory with shipped templates and a given config.
struct Site {
    dir: TempDir,
    config: Config,
}

impl Site {
    fn new() -> Self {
        Self::with_config(FileConfig::default())
    }

    fn with_config(mut file: FileConfig) -> Self {
        file.templates.get_or_insert_with(shipped_templates);
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
            config: Config::from_file_config(file).expect("invalid test config"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn page(&self, relative: &str) -> String {
        let path = self.path().join("docs/commands/cloudstatus").join(relative);
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing page {}", path.display()))
    }

    fn write_mkdocs(&self, text: &str) {
        fs::write(self.path().join("mkdocs.yml"), text).unwrap();
    }

    fn mkdocs(&self) -> String {
        fs::read_to_string(self.path().join("mkdocs.yml")).unwrap()
    }

    fn run(&self, source: &MockSpecSource, options: RunOptions) -> Result<RunReport, RunError> {
        Generator::new(&self.config, source, self.path()).run(&options)
    }
}

fn source() -> MockSpecSource {
    MockSpecSource::new(SPEC).with_extended(EXTENDED)
}

fn update_nav() -> RunOptions {
    RunOptions {
        update_nav: true,
        ..Default::default()
    }
}

// =============================================================================
// Page Emission
// =============================================================================

#[test]
fn emits_one_page_per_documented_command() {
    let site = Site::new();
    let report = site.run(&source(), RunOptions::default()).unwrap();

    assert!(report.is_success());
    let written: Vec<String> = report
        .emitted
        .unwrap()
        .written
        .iter()
        .map(|p| {
            p.strip_prefix(site.path().join("docs/commands/cloudstatus"))
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        written,
        [
            "index.md",
            "status.md",
            "components/index.md",
            "components/describe.md",
            "components/list.md",
            "incidents/index.md",
            "incidents/get.md",
        ]
    );
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn overview_page_has_front_matter_and_extended_sections() {
    let site = Site::new();
    site.run(&source(), RunOptions::default()).unwrap();
    let page = site.page("index.md");

    assert!(page.starts_with("---\ntitle: \"Cloud Status - xcsh cloudstatus\"\n"));
    assert!(page.contains("description: \"Monitor F5 XC cloud status\"\n"));
    assert!(page.contains("  - \"cloud status\"\n"));
    assert!(page.contains("  - \"status-page\"\n"));
    assert!(page.contains("command: \"xcsh cloudstatus\"\n"));
    assert!(page.contains("| [`status`](status.md) | Show overall status |"));
    assert!(page.contains("| [Components](components/index.md) | Inspect platform components |"));
    assert!(page.contains("### Incident Triage"));
    assert!(page.contains("inspect the API components"));
    assert!(page.contains("| 3 | DEGRADED | one or more components degraded |"));
    assert!(page.contains("| `major` | Major outage |"));
}

#[test]
fn leaf_without_short_has_empty_description() {
    let site = Site::new();
    site.run(&source(), RunOptions::default()).unwrap();
    let page = site.page("incidents/get.md");

    assert!(page.starts_with("---\ntitle: \"xcsh cloudstatus incidents get\"\ndescription: \"\"\n"));
    assert!(page.contains("command_group: \"cloudstatus\""));
}

#[test]
fn group_without_short_gets_fallback_description() {
    let site = Site::new();
    site.run(&source(), RunOptions::default()).unwrap();
    let page = site.page("incidents/index.md");

    assert!(page.contains("title: \"Incidents - xcsh cloudstatus\""));
    assert!(page.contains("description: \"Manage Incidents\""));
    assert!(page.contains("| [`get`](get.md) |"));
}

#[test]
fn leaf_page_lists_visible_flags() {
    let site = Site::new();
    site.run(&source(), RunOptions::default()).unwrap();
    let page = site.page("status.md");

    assert!(page.contains("xcsh cloudstatus status --output json"));
    assert!(page.contains("| `--output`, `-o` | string | table | output format (table, JSON, YAML) |"));
    assert!(!page.contains("debug-dump"));
}

#[test]
fn missing_extended_spec_degrades_with_warning() {
    let site = Site::new();
    let report = site.run(&MockSpecSource::new(SPEC), RunOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("extended spec unavailable"));
    assert!(!site.page("index.md").contains("## Workflows"));
}

#[test]
fn render_failure_skips_page_and_continues() {
    let templates = TempDir::new().unwrap();
    for name in ["overview.md.j2", "group.md.j2"] {
        fs::copy(shipped_templates().join(name), templates.path().join(name)).unwrap();
    }
    fs::write(templates.path().join("command.md.j2"), "{{ name | no_such_filter }}").unwrap();

    let site = Site::with_config(FileConfig {
        templates: Some(templates.path().to_path_buf()),
        ..Default::default()
    });
    let report = site.run(&source(), RunOptions::default()).unwrap();

    assert!(!report.is_success());
    let emitted = report.emitted.unwrap();
    assert_eq!(emitted.failures.len(), 4);
    assert_eq!(emitted.written.len(), 3);
    assert!(site.path().join("docs/commands/cloudstatus/components/index.md").is_file());
}

#[test]
fn clean_removes_stale_pages() {
    let site = Site::new();
    let stale = site.path().join("docs/commands/cloudstatus/retired.md");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "old").unwrap();

    site.run(
        &source(),
        RunOptions {
            clean: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(!stale.exists());
    assert!(site.path().join("docs/commands/cloudstatus/index.md").is_file());
}

#[test]
fn other_root_command() {
    let site = Site::with_config(FileConfig {
        root_command: Some("login".into()),
        ..Default::default()
    });
    let report = site
        .run(
            &source(),
            RunOptions {
                print_nav: Some(NavFormat::Yaml),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(
        report.nav_text.unwrap(),
        "    - Login:\n      - Overview: commands/login/index.md"
    );
}

// =============================================================================
// Navigation Splice
// =============================================================================

#[test]
fn print_nav_matches_site_layout() {
    let site = Site::new();
    let report = site
        .run(
            &source(),
            RunOptions {
                print_nav: Some(NavFormat::Yaml),
                ..Default::default()
            },
        )
        .unwrap();

    let expected = "\
    - Cloud Status:
      - Overview: commands/cloudstatus/index.md
      - Status: commands/cloudstatus/status.md
      - Components:
        - Overview: commands/cloudstatus/components/index.md
        - Describe: commands/cloudstatus/components/describe.md
        - List: commands/cloudstatus/components/list.md
      - Incidents:
        - Overview: commands/cloudstatus/incidents/index.md
        - Get: commands/cloudstatus/incidents/get.md";
    assert_eq!(report.nav_text.unwrap(), expected);
    assert!(!site.path().join("docs").exists());
}

#[test]
fn update_nav_replaces_existing_section_only() {
    let site = Site::new();
    site.write_mkdocs(MKDOCS);

    let report = site.run(&source(), update_nav()).unwrap();
    assert_eq!(
        report.nav_update,
        Some(NavUpdate::Spliced {
            path: site.path().join("mkdocs.yml"),
            outcome: SpliceOutcome::Replaced { line: 7, removed: 5 },
        })
    );

    let updated = site.mkdocs();
    assert!(updated.starts_with(
        "site_name: xcsh\nnav:\n  - Home: index.md\n  - Commands:\n    - Login: commands/login.md\n    # generated below\n    - Cloud Status:\n"
    ));
    assert!(updated.contains("        - Get: commands/cloudstatus/incidents/get.md\n    - Configure: commands/configure.md\ntheme:\n  name: material  # keep this comment\n"));
    assert!(!updated.contains("Old:"));
    assert!(!updated.contains("Gone"));
}

#[test]
fn explicit_default_root_updates_the_same_section() {
    let site = Site::with_config(FileConfig {
        root_command: Some("cloudstatus".into()),
        ..Default::default()
    });
    site.write_mkdocs(MKDOCS);

    let report = site.run(&source(), update_nav()).unwrap();
    assert!(matches!(
        report.nav_update,
        Some(NavUpdate::Spliced {
            outcome: SpliceOutcome::Replaced { line: 7, .. },
            ..
        })
    ));

    let updated = site.mkdocs();
    assert_eq!(updated.matches("- Cloud Status:").count(), 1);
    assert!(!updated.contains("Cloudstatus"));
}

#[test]
fn update_nav_is_idempotent() {
    let site = Site::new();
    site.write_mkdocs(MKDOCS);

    site.run(&source(), update_nav()).unwrap();
    let first = site.mkdocs();

    let report = site.run(&source(), update_nav()).unwrap();
    assert!(matches!(
        report.nav_update,
        Some(NavUpdate::Spliced {
            outcome: SpliceOutcome::Unchanged,
            ..
        })
    ));
    assert_eq!(site.mkdocs(), first);
}

#[test]
fn update_nav_inserts_after_commands_section() {
    let site = Site::new();
    site.write_mkdocs("nav:\n  - Commands:\n    - Login: commands/login.md\n  - About: about.md\n");

    let report = site.run(&source(), update_nav()).unwrap();
    assert!(matches!(
        report.nav_update,
        Some(NavUpdate::Spliced {
            outcome: SpliceOutcome::Inserted { line: 4 },
            ..
        })
    ));

    let updated = site.mkdocs();
    assert!(updated.starts_with(
        "nav:\n  - Commands:\n    - Login: commands/login.md\n    - Cloud Status:\n      - Overview: commands/cloudstatus/index.md\n"
    ));
    assert!(updated.ends_with("        - Get: commands/cloudstatus/incidents/get.md\n  - About: about.md\n"));
}

#[test]
fn update_nav_without_anchor_fails_and_leaves_document() {
    let site = Site::new();
    let original = "nav:\n  - Home: index.md\n";
    site.write_mkdocs(original);

    let err = site.run(&source(), update_nav()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Splice {
            source: SpliceError::AnchorNotFound { .. },
            ..
        }
    ));
    assert!(err.to_string().contains("--print-nav"));
    assert_eq!(site.mkdocs(), original);
}

#[test]
fn update_nav_without_document_warns() {
    let site = Site::new();
    let report = site.run(&source(), update_nav()).unwrap();

    assert_eq!(
        report.nav_update,
        Some(NavUpdate::DocumentMissing(site.path().join("mkdocs.yml")))
    );
    assert!(report.warnings.iter().any(|w| w.contains("navigation not updated")));
    assert!(!site.path().join("mkdocs.yml").exists());
}

#[test]
fn custom_label_and_indent() {
    let site = Site::with_config(FileConfig {
        nav: Some(NavConfig {
            label: Some("Status Page".into()),
            indent: Some(2),
            fallback_header: Some("Reference".into()),
            ..Default::default()
        }),
        ..Default::default()
    });
    site.write_mkdocs("nav:\n- Reference:\n  - API: api.md\n");

    site.run(&source(), update_nav()).unwrap();
    assert!(site
        .mkdocs()
        .starts_with("nav:\n- Reference:\n  - API: api.md\n  - Status Page:\n    - Overview: commands/cloudstatus/index.md\n"));
}
