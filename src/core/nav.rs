//! core::nav
//!
//! Navigation outline derived from the command tree.
//!
//! # Ordering
//!
//! For the root command:
//! 1. An `Overview` entry for the root index page
//! 2. Leaf children, sorted by name (byte-wise, case-sensitive)
//! 3. Group children, sorted by name, each as a section whose first entry is
//!    its own `Overview`, followed by its children sorted by name
//!
//! Groups go one level deep. Children of a group's children are not
//! emitted; see [`crate::core::classify::beyond_group_depth`].
//!
//! The outline is a pure function of the tree: the same input always
//! yields byte-identical output.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::classify::partition;
use super::naming::Naming;
use super::paths::PageLocation;
use super::spec::CommandNode;

/// Display name of the index entry at each level.
pub const OVERVIEW: &str = "Overview";

/// Spaces added per nesting level in the rendered block.
const STEP: usize = 2;

/// One entry in the navigation outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEntry {
    /// A single page.
    Page { title: String, path: String },
    /// A nested section.
    Section {
        title: String,
        children: Vec<NavEntry>,
    },
}

impl NavEntry {
    pub fn title(&self) -> &str {
        match self {
            NavEntry::Page { title, .. } | NavEntry::Section { title, .. } => title,
        }
    }

    fn page(title: impl Into<String>, path: String) -> Self {
        NavEntry::Page {
            title: title.into(),
            path,
        }
    }
}

// Serialized the way site generators expect nav entries: a single-key map
// of title to either a path or a list of entries.
impl Serialize for NavEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            NavEntry::Page { title, path } => map.serialize_entry(title, path)?,
            NavEntry::Section { title, children } => map.serialize_entry(title, children)?,
        }
        map.end()
    }
}

/// Builds the navigation outline for one root command.
#[derive(Debug, Clone)]
pub struct NavBuilder<'a> {
    page_root: &'a str,
    naming: &'a Naming,
}

impl<'a> NavBuilder<'a> {
    pub fn new(page_root: &'a str, naming: &'a Naming) -> Self {
        Self { page_root, naming }
    }

    pub fn build(&self, root: &CommandNode) -> Vec<NavEntry> {
        let mut nav = vec![NavEntry::page(
            OVERVIEW,
            PageLocation::root_index().site_path(self.page_root),
        )];

        let (mut leaves, mut groups) = partition(root.children());
        leaves.sort_by(|a, b| a.name().cmp(b.name()));
        groups.sort_by(|a, b| a.name().cmp(b.name()));

        for leaf in leaves {
            nav.push(NavEntry::page(
                self.naming.humanize(leaf.name()),
                PageLocation::leaf_at_root(leaf.name()).site_path(self.page_root),
            ));
        }

        for group in groups {
            nav.push(self.group_section(group));
        }

        nav
    }

    fn group_section(&self, group: &CommandNode) -> NavEntry {
        let name = group.name();
        let mut children = vec![NavEntry::page(
            OVERVIEW,
            PageLocation::group_index(name).site_path(self.page_root),
        )];

        let mut members: Vec<&CommandNode> = group.children().iter().collect();
        members.sort_by(|a, b| a.name().cmp(b.name()));
        for member in members {
            children.push(NavEntry::page(
                self.naming.humanize(member.name()),
                PageLocation::leaf_in_group(name, member.name()).site_path(self.page_root),
            ));
        }

        NavEntry::Section {
            title: self.naming.humanize(name),
            children,
        }
    }
}

/// Render the owned site-config section as a YAML block.
///
/// The first line is `<indent>- <label>:`; entries follow with two extra
/// spaces per level. The block has no trailing newline.
///
/// # Example
///
/// ```
/// use specdocs::core::nav::{render_block, NavEntry};
///
/// let nav = vec![NavEntry::Page {
///     title: "Overview".into(),
///     path: "commands/cloudstatus/index.md".into(),
/// }];
/// assert_eq!(
///     render_block("Cloud Status", &nav, 4),
///     "    - Cloud Status:\n      - Overview: commands/cloudstatus/index.md"
/// );
/// ```
pub fn render_block(label: &str, nav: &[NavEntry], indent: usize) -> String {
    let mut lines = vec![format!("{}- {}:", " ".repeat(indent), yaml_scalar(label))];
    render_entries(nav, indent + STEP, &mut lines);
    lines.join("\n")
}

fn render_entries(entries: &[NavEntry], indent: usize, lines: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    for entry in entries {
        match entry {
            NavEntry::Page { title, path } => {
                lines.push(format!("{}- {}: {}", pad, yaml_scalar(title), yaml_scalar(path)));
            }
            NavEntry::Section { title, children } => {
                lines.push(format!("{}- {}:", pad, yaml_scalar(title)));
                render_entries(children, indent + STEP, lines);
            }
        }
    }
}

/// Quote a scalar only when plain style would change its meaning.
pub fn yaml_scalar(value: &str) -> String {
    if is_plain_safe(value) {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Always double-quote a scalar, escaping what YAML requires.
pub fn yaml_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_plain_safe(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

    let Some(first) = value.chars().next() else {
        return false;
    };
    if INDICATORS.contains(&first) || first.is_whitespace() {
        return false;
    }
    if value.ends_with(char::is_whitespace) || value.ends_with(':') {
        return false;
    }
    if value.contains(": ") || value.contains(" #") || value.contains(['\n', '\r', '\t']) {
        return false;
    }
    if RESERVED.contains(&value.to_ascii_lowercase().as_str()) {
        return false;
    }
    value.parse::<f64>().is_err()
}
