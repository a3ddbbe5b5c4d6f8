//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults (reproduce the `xcsh cloudstatus` docs layout)
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! The first existing file wins:
//! 1. `--config <path>` (must exist)
//! 2. `$SPECDOCS_CONFIG` if set
//! 3. `./specdocs.toml`
//! 4. `$XDG_CONFIG_HOME/specdocs/config.toml`
//! 5. `~/.specdocs/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use specdocs::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(None, Path::new(".")).unwrap();
//! let config = result.config;
//!
//! println!("Root command: {}", config.root_command());
//! println!("Output: {}", config.output().display());
//! ```

pub mod schema;

pub use schema::{FileConfig, NavConfig, PagesConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::naming::Naming;
use crate::core::spec::CommandPath;

/// Project config file name searched in the working directory.
pub const PROJECT_FILE: &str = "specdocs.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SPECDOCS_CONFIG";

pub const DEFAULT_CLI_BINARY: &str = "./xcsh";
pub const DEFAULT_BINARY_NAME: &str = "xcsh";
pub const DEFAULT_ROOT_COMMAND: &str = "cloudstatus";
pub const DEFAULT_ROOT_LABEL: &str = "Cloud Status";
pub const DEFAULT_TEMPLATES: &str = "templates";
pub const DEFAULT_NAV_DOCUMENT: &str = "mkdocs.yml";
pub const DEFAULT_NAV_INDENT: usize = 4;
pub const DEFAULT_FALLBACK_HEADER: &str = "Commands";
pub const DEFAULT_KEYWORDS: &[&str] = &["xcsh", "F5", "F5 XC", "F5 Distributed Cloud"];
pub const DEFAULT_OVERVIEW_TEMPLATE: &str = "overview.md.j2";
pub const DEFAULT_GROUP_TEMPLATE: &str = "group.md.j2";
pub const DEFAULT_COMMAND_TEMPLATE: &str = "command.md.j2";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config file '{0}' already exists")]
    AlreadyExists(PathBuf),

    #[error("config file '{0}' not found")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file (all optional)
    pub file: FileConfig,
    /// Path the file was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Build a config from already-parsed values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if validation fails.
    pub fn from_file_config(file: FileConfig) -> Result<Self, ConfigError> {
        file.validate()?;
        Ok(Self { file, path: None })
    }

    /// Load configuration from the first existing location.
    ///
    /// Missing config files are not an error (defaults are used), except
    /// for an `explicit` path, which must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_path(path, warnings);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_path(&path, warnings);
            }
            warnings.push(ConfigWarning {
                message: format!("${} points to a missing file, ignoring it", CONFIG_ENV),
                path,
            });
        }

        for path in Self::search_paths(cwd) {
            if path.exists() {
                return Self::load_path(&path, warnings);
            }
        }

        Ok(ConfigLoadResult {
            config: Config::default(),
            warnings,
        })
    }

    /// Implicit search locations after the environment override.
    fn search_paths(cwd: &Path) -> Vec<PathBuf> {
        let mut paths = vec![cwd.join(PROJECT_FILE)];
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("specdocs/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".specdocs/config.toml"));
        }
        paths
    }

    fn load_path(
        path: &Path,
        warnings: Vec<ConfigWarning>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let file = Self::read_config(path)?;
        file.validate()?;
        Ok(ConfigLoadResult {
            config: Config {
                file,
                path: Some(path.to_path_buf()),
            },
            warnings,
        })
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write a config file with every value spelled out.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        Self::write_config_atomic(path, &Config::default().effective())
    }

    /// Write a config file atomically.
    fn write_config_atomic(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Hidden temp file in the same directory (for atomic rename)
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{}.specdocs-tmp", file_name));
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Every setting with defaults filled in.
    pub fn effective(&self) -> FileConfig {
        FileConfig {
            cli_binary: Some(self.cli_binary()),
            binary_name: Some(self.binary_name().to_string()),
            root_command: Some(self.root_command().joined()),
            root_label: Some(self.root_label()),
            output: Some(self.output()),
            templates: Some(self.templates()),
            page_root: Some(self.page_root()),
            keywords: Some(self.keywords()),
            acronyms: Some(self.file.acronyms.clone().unwrap_or_default()),
            nav: Some(NavConfig {
                document: Some(self.nav_document()),
                label: Some(self.nav_label()),
                indent: Some(self.nav_indent()),
                fallback_header: Some(self.fallback_header().to_string()),
                strict_depth: Some(self.strict_depth()),
            }),
            pages: Some(PagesConfig {
                overview: Some(self.overview_template().to_string()),
                group: Some(self.group_template().to_string()),
                command: Some(self.command_template().to_string()),
            }),
        }
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    pub fn cli_binary(&self) -> PathBuf {
        self.file
            .cli_binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CLI_BINARY))
    }

    pub fn binary_name(&self) -> &str {
        self.file
            .binary_name
            .as_deref()
            .unwrap_or(DEFAULT_BINARY_NAME)
    }

    /// The documented root command.
    ///
    /// Falls back to the default when the configured value does not parse;
    /// `validate` rejects such files before they get here.
    pub fn root_command(&self) -> CommandPath {
        self.file
            .root_command
            .as_deref()
            .and_then(|r| CommandPath::parse(r).ok())
            .unwrap_or_else(|| CommandPath::literal(DEFAULT_ROOT_COMMAND))
    }

    /// Root label. Defaults to `Cloud Status` for the default root,
    /// whether or not it was named explicitly, otherwise to the humanized
    /// root name.
    pub fn root_label(&self) -> String {
        if let Some(label) = &self.file.root_label {
            return label.clone();
        }
        let root = self.root_command();
        if root == CommandPath::literal(DEFAULT_ROOT_COMMAND) {
            DEFAULT_ROOT_LABEL.to_string()
        } else {
            self.naming().humanize(root.name())
        }
    }

    /// Output directory. Defaults to `docs/commands/<root path>`.
    pub fn output(&self) -> PathBuf {
        self.file.output.clone().unwrap_or_else(|| {
            let mut path = PathBuf::from("docs/commands");
            path.extend(self.root_command().segments());
            path
        })
    }

    pub fn templates(&self) -> PathBuf {
        self.file
            .templates
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES))
    }

    /// Site path prefix. Defaults to `commands/<root path>`.
    pub fn page_root(&self) -> String {
        self.file
            .page_root
            .clone()
            .unwrap_or_else(|| format!("commands/{}", self.root_command().segments().join("/")))
    }

    pub fn keywords(&self) -> Vec<String> {
        self.file
            .keywords
            .clone()
            .unwrap_or_else(|| DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }

    /// Acronym table: built-ins plus configured extras.
    pub fn naming(&self) -> Naming {
        let mut naming = Naming::default();
        if let Some(extra) = &self.file.acronyms {
            naming.extend(extra);
        }
        naming
    }

    fn nav(&self) -> Option<&NavConfig> {
        self.file.nav.as_ref()
    }

    pub fn nav_document(&self) -> PathBuf {
        self.nav()
            .and_then(|n| n.document.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NAV_DOCUMENT))
    }

    /// Owned section label. Defaults to the root label.
    pub fn nav_label(&self) -> String {
        self.nav()
            .and_then(|n| n.label.clone())
            .unwrap_or_else(|| self.root_label())
    }

    pub fn nav_indent(&self) -> usize {
        self.nav()
            .and_then(|n| n.indent)
            .unwrap_or(DEFAULT_NAV_INDENT)
    }

    pub fn fallback_header(&self) -> &str {
        self.nav()
            .and_then(|n| n.fallback_header.as_deref())
            .unwrap_or(DEFAULT_FALLBACK_HEADER)
    }

    pub fn strict_depth(&self) -> bool {
        self.nav().and_then(|n| n.strict_depth).unwrap_or(false)
    }

    fn pages(&self) -> Option<&PagesConfig> {
        self.file.pages.as_ref()
    }

    pub fn overview_template(&self) -> &str {
        self.pages()
            .and_then(|p| p.overview.as_deref())
            .unwrap_or(DEFAULT_OVERVIEW_TEMPLATE)
    }

    pub fn group_template(&self) -> &str {
        self.pages()
            .and_then(|p| p.group.as_deref())
            .unwrap_or(DEFAULT_GROUP_TEMPLATE)
    }

    pub fn command_template(&self) -> &str {
        self.pages()
            .and_then(|p| p.command.as_deref())
            .unwrap_or(DEFAULT_COMMAND_TEMPLATE)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
