//! core::paths
//!
//! Centralized page-location routing for generated documentation.
//!
//! # Layout
//!
//! Relative to the output directory:
//! - root command -> `index.md`
//! - group -> `<group>/index.md`
//! - leaf under a group -> `<group>/<leaf>.md`
//! - leaf under the root -> `<leaf>.md`
//!
//! The same locations, prefixed by the site page root, are used as
//! navigation targets. No other module builds page file names.
//!
//! # Example
//!
//! ```
//! use specdocs::core::paths::PageLocation;
//! use std::path::PathBuf;
//!
//! let page = PageLocation::leaf_in_group("components", "list");
//! assert_eq!(page.relative_path(), PathBuf::from("components/list.md"));
//! assert_eq!(
//!     page.site_path("commands/cloudstatus"),
//!     "commands/cloudstatus/components/list.md"
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

const INDEX: &str = "index.md";

/// A page's location below the output root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageLocation {
    segments: Vec<String>,
}

impl PageLocation {
    pub fn root_index() -> Self {
        Self {
            segments: vec![INDEX.to_string()],
        }
    }

    pub fn group_index(group: &str) -> Self {
        Self {
            segments: vec![group.to_string(), INDEX.to_string()],
        }
    }

    pub fn leaf_at_root(name: &str) -> Self {
        Self {
            segments: vec![format!("{}.md", name)],
        }
    }

    pub fn leaf_in_group(group: &str, name: &str) -> Self {
        Self {
            segments: vec![group.to_string(), format!("{}.md", name)],
        }
    }

    /// Path relative to the output directory.
    pub fn relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Absolute (or cwd-relative) file path under `output_dir`.
    pub fn file_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.relative_path())
    }

    /// Forward-slash site path under `page_root`.
    pub fn site_path(&self, page_root: &str) -> String {
        let page_root = page_root.trim_matches('/');
        let relative = self.segments.join("/");
        if page_root.is_empty() {
            relative
        } else {
            format!("{}/{}", page_root, relative)
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
