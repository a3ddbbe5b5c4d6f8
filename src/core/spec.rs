//! core::spec
//!
//! Typed view over the machine-readable CLI specification.
//!
//! # Shape
//!
//! The spec-producing binary emits JSON of the form:
//!
//! ```json
//! {
//!   "name": "xcsh",
//!   "commands": [
//!     {
//!       "path": ["cloudstatus"],
//!       "short": "Monitor cloud status",
//!       "aliases": ["cs"],
//!       "flags": [{ "name": "output", "default": "table" }],
//!       "subcommands": [ ... ]
//!     }
//!   ]
//! }
//! ```
//!
//! # Invariants
//!
//! - Every node has a non-empty `path`; its last element is the node name
//! - No two siblings share a name
//! - Nodes are immutable once constructed
//!
//! Both invariants are checked at construction time, so a tree that exists
//! is a valid tree.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from spec construction and lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("command path cannot be empty")]
    EmptyPath,

    #[error("duplicate subcommand '{name}' under '{parent}'")]
    DuplicateSibling { parent: String, name: String },

    #[error("command '{0}' not found in spec")]
    CommandNotFound(String),

    #[error("commands nested deeper than one group level under '{root}': {}", .paths.join(", "))]
    TooDeep { root: String, paths: Vec<String> },

    #[error("commands '{first}' and '{second}' both map to page '{location}'")]
    PageCollision {
        location: String,
        first: String,
        second: String,
    },
}

/// A command path from the tree root, e.g. `cloudstatus components list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Create a validated, non-empty path.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::EmptyPath` if there are no segments.
    pub fn new<I, S>(segments: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(SpecError::EmptyPath);
        }
        Ok(Self(segments))
    }

    /// Single-segment path from a non-empty literal.
    pub(crate) fn literal(segment: &'static str) -> Self {
        debug_assert!(!segment.is_empty());
        Self(vec![segment.to_string()])
    }

    /// Parse a space-separated path such as `"login profile"`.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        Self::new(text.split_whitespace())
    }

    /// The final segment.
    pub fn name(&self) -> &str {
        // Non-empty by construction.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments after `prefix`, or `None` if this path is not under it.
    pub fn relative_to(&self, prefix: &CommandPath) -> Option<&[String]> {
        self.0.strip_prefix(prefix.0.as_slice())
    }

    /// Segments joined with single spaces.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl TryFrom<Vec<String>> for CommandPath {
    type Error = SpecError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommandPath> for Vec<String> {
    fn from(path: CommandPath) -> Self {
        path.0
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// A flag descriptor. Opaque to classification; passed through to templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub flag_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub hidden: bool,

    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Wire form of a command node, before invariants are checked.
#[derive(Debug, Deserialize)]
struct RawCommandNode {
    path: Vec<String>,
    #[serde(default)]
    short: Option<String>,
    #[serde(default)]
    long: Option<String>,
    #[serde(default, rename = "use")]
    usage: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    flags: Vec<FlagSpec>,
    #[serde(default, alias = "children")]
    subcommands: Vec<CommandNode>,
}

/// A node in the command tree.
///
/// # Example
///
/// ```
/// use specdocs::core::spec::{CommandNode, CommandPath};
///
/// let list = CommandNode::leaf(CommandPath::new(["cloudstatus", "components", "list"]).unwrap());
/// assert_eq!(list.name(), "list");
/// assert!(list.children().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCommandNode")]
pub struct CommandNode {
    path: CommandPath,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    aliases: Vec<String>,
    flags: Vec<FlagSpec>,
    #[serde(rename = "subcommands")]
    children: Vec<CommandNode>,
}

impl TryFrom<RawCommandNode> for CommandNode {
    type Error = SpecError;

    fn try_from(raw: RawCommandNode) -> Result<Self, Self::Error> {
        let node = CommandNode::new(CommandPath::new(raw.path)?, raw.short, raw.aliases, raw.flags)
            .with_children(raw.subcommands)?;
        Ok(CommandNode {
            long: non_blank(raw.long),
            usage: non_blank(raw.usage),
            example: non_blank(raw.example),
            ..node
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl CommandNode {
    /// Create a node without children.
    ///
    /// A blank `short` is treated as absent; duplicate aliases are dropped,
    /// keeping the first occurrence.
    pub fn new(
        path: CommandPath,
        short: Option<String>,
        aliases: Vec<String>,
        flags: Vec<FlagSpec>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let aliases = aliases
            .into_iter()
            .filter(|a| seen.insert(a.clone()))
            .collect();

        Self {
            name: path.name().to_string(),
            path,
            short: non_blank(short),
            long: None,
            usage: None,
            example: None,
            aliases,
            flags,
            children: Vec::new(),
        }
    }

    /// Create a bare leaf node.
    pub fn leaf(path: CommandPath) -> Self {
        Self::new(path, None, Vec::new(), Vec::new())
    }

    /// Attach children, enforcing unique sibling names.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::DuplicateSibling` if two children share a name.
    pub fn with_children(mut self, children: Vec<CommandNode>) -> Result<Self, SpecError> {
        ensure_unique_names(&self.path.joined(), &children)?;
        self.children = children;
        Ok(self)
    }

    pub fn path(&self) -> &CommandPath {
        &self.path
    }

    /// The node's own name (last path segment).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// Direct subcommands in spec order.
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name() == name)
    }
}

fn ensure_unique_names(parent: &str, nodes: &[CommandNode]) -> Result<(), SpecError> {
    let mut seen = BTreeSet::new();
    for node in nodes {
        if !seen.insert(node.name()) {
            return Err(SpecError::DuplicateSibling {
                parent: parent.to_string(),
                name: node.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Wire form of the full spec.
#[derive(Debug, Deserialize)]
struct RawCliSpec {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    commands: Vec<CommandNode>,
}

impl TryFrom<RawCliSpec> for CliSpec {
    type Error = SpecError;

    fn try_from(raw: RawCliSpec) -> Result<Self, Self::Error> {
        let mut spec = CliSpec::new(raw.commands)?;
        spec.name = raw.name;
        spec.version = raw.version;
        Ok(spec)
    }
}

/// The full CLI specification as emitted by `<binary> --spec`.
///
/// Keys other than `name`, `version` and `commands` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCliSpec")]
pub struct CliSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    commands: Vec<CommandNode>,
}

impl CliSpec {
    /// Build a spec from top-level commands.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::DuplicateSibling` if two top-level commands share a name.
    pub fn new(commands: Vec<CommandNode>) -> Result<Self, SpecError> {
        ensure_unique_names("<root>", &commands)?;
        Ok(Self {
            name: None,
            version: None,
            commands,
        })
    }

    /// Parse spec JSON, checking every tree invariant.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn commands(&self) -> &[CommandNode] {
        &self.commands
    }

    /// Walk the tree along `path`.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::CommandNotFound` if any segment is missing.
    pub fn find_command(&self, path: &CommandPath) -> Result<&CommandNode, SpecError> {
        let not_found = || SpecError::CommandNotFound(path.joined());
        let mut segments = path.segments().iter();
        let first = segments.next().ok_or_else(not_found)?;
        let mut node = self
            .commands
            .iter()
            .find(|c| c.name() == first)
            .ok_or_else(not_found)?;
        for segment in segments {
            node = node.child(segment).ok_or_else(not_found)?;
        }
        Ok(node)
    }
}

/// Extended metadata from `<binary> <root> --spec`.
///
/// Every key is optional and opaque; an absent document is the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedSpec {
    pub workflows: Vec<serde_json::Value>,
    pub exit_codes: Vec<serde_json::Value>,
    pub status_indicators: serde_json::Map<String, serde_json::Value>,
    pub ai_hints: serde_json::Map<String, serde_json::Value>,
}

impl ExtendedSpec {
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
            && self.exit_codes.is_empty()
            && self.status_indicators.is_empty()
            && self.ai_hints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r#"{
        "name": "xcsh",
        "version": "1.2.0",
        "global_flags": [],
        "commands": [
            {
                "path": ["cloudstatus"],
                "short": "Monitor F5 XC status",
                "aliases": ["cs", "status-page", "cs"],
                "subcommands": [
                    {
                        "path": ["cloudstatus", "components"],
                        "short": "",
                        "children": [
                            {"path": ["cloudstatus", "components", "list"]}
                        ]
                    },
                    {
                        "path": ["cloudstatus", "status"],
                        "flags": [{"name": "quiet", "type": "bool", "default": "false", "x-extra": 1}]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_nested_tree() {
        let spec = CliSpec::from_json(SPEC).unwrap();
        assert_eq!(spec.name.as_deref(), Some("xcsh"));
        let root = &spec.commands()[0];
        assert_eq!(root.name(), "cloudstatus");
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].children()[0].name(), "list");
    }

    #[test]
    fn blank_short_is_absent() {
        let spec = CliSpec::from_json(SPEC).unwrap();
        let components = spec
            .find_command(&CommandPath::parse("cloudstatus components").unwrap())
            .unwrap();
        assert_eq!(components.short(), None);
    }

    #[test]
    fn aliases_are_deduplicated_in_order() {
        let spec = CliSpec::from_json(SPEC).unwrap();
        assert_eq!(spec.commands()[0].aliases(), ["cs", "status-page"]);
    }

    #[test]
    fn flags_keep_unknown_keys() {
        let spec = CliSpec::from_json(SPEC).unwrap();
        let status = spec.commands()[0].child("status").unwrap();
        let flag = &status.flags()[0];
        assert_eq!(flag.flag_type.as_deref(), Some("bool"));
        assert_eq!(flag.extra.get("x-extra"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = CliSpec::from_json(r#"{"commands": [{"path": []}]}"#).unwrap_err();
        assert!(err.to_string().contains("command path cannot be empty"));
    }

    #[test]
    fn duplicate_siblings_are_rejected() {
        let json = r#"{"commands": [{"path": ["a"], "subcommands": [
            {"path": ["a", "x"]}, {"path": ["a", "x"]}
        ]}]}"#;
        let err = CliSpec::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate subcommand 'x' under 'a'"));
    }

    #[test]
    fn duplicate_top_level_commands_are_rejected() {
        let json = r#"{"commands": [{"path": ["login"]}, {"path": ["login"]}]}"#;
        let err = CliSpec::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate subcommand 'login' under '<root>'"));
    }

    #[test]
    fn find_command_walks_path() {
        let spec = CliSpec::from_json(SPEC).unwrap();
        let path = CommandPath::parse("cloudstatus components list").unwrap();
        assert_eq!(spec.find_command(&path).unwrap().name(), "list");

        let missing = CommandPath::parse("cloudstatus incidents").unwrap();
        assert_eq!(
            spec.find_command(&missing),
            Err(SpecError::CommandNotFound("cloudstatus incidents".into()))
        );
    }

    #[test]
    fn relative_path() {
        let root = CommandPath::parse("cloudstatus").unwrap();
        let path = CommandPath::parse("cloudstatus incidents get").unwrap();
        assert_eq!(
            path.relative_to(&root).unwrap(),
            ["incidents".to_string(), "get".to_string()]
        );
        assert!(root.relative_to(&path).is_none());
    }

    #[test]
    fn extended_spec_tolerates_missing_keys() {
        let ext: ExtendedSpec = serde_json::from_str(r#"{"workflows": [{"id": "w1"}]}"#).unwrap();
        assert_eq!(ext.workflows.len(), 1);
        assert!(ext.exit_codes.is_empty());
        assert!(ExtendedSpec::default().is_empty());
    }
}
