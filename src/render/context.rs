//! render::context
//!
//! Template variables per page role.
//!
//! | Role       | Variables                                                    |
//! |------------|--------------------------------------------------------------|
//! | `Overview` | `front_matter`, `command`, `subcommands`, `leaf_commands`,   |
//! |            | `group_commands`, `nav`, `workflows`, `exit_codes`,          |
//! |            | `status_indicators`, `ai_hints`                              |
//! | `Group`    | `front_matter`, `command`, `name`, `subcommands`             |
//! | `Leaf`     | `front_matter`, `command`, `name`, `path`, `flags`           |
//!
//! `command` is the node itself, serialized with its wire keys (`path`,
//! `short`, `long`, `use`, `example`, `aliases`, `flags`, `subcommands`).
//! Variables a role does not expose are absent, not empty.

use serde::Serialize;

use crate::core::classify::partition;
use crate::core::front_matter::FrontMatter;
use crate::core::nav::NavEntry;
use crate::core::spec::{CommandNode, CommandPath, ExtendedSpec, FlagSpec};

/// Variables handed to a page template.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    pub front_matter: FrontMatter,
    pub command: &'a CommandNode,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    /// Leaf path relative to the root command.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<&'a [FlagSpec]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    subcommands: Option<&'a [CommandNode]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    leaf_commands: Option<Vec<&'a CommandNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    group_commands: Option<Vec<&'a CommandNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    nav: Option<&'a [NavEntry]>,

    #[serde(flatten)]
    extended: Option<&'a ExtendedSpec>,
}

impl<'a> PageContext<'a> {
    fn base(front_matter: FrontMatter, command: &'a CommandNode) -> Self {
        Self {
            front_matter,
            command,
            name: None,
            path: None,
            flags: None,
            subcommands: None,
            leaf_commands: None,
            group_commands: None,
            nav: None,
            extended: None,
        }
    }

    /// Context for the root command's index page.
    pub fn overview(
        front_matter: FrontMatter,
        root: &'a CommandNode,
        nav: &'a [NavEntry],
        extended: &'a ExtendedSpec,
    ) -> Self {
        let (leaves, groups) = partition(root.children());
        Self {
            subcommands: Some(root.children()),
            leaf_commands: Some(leaves),
            group_commands: Some(groups),
            nav: Some(nav),
            extended: Some(extended),
            ..Self::base(front_matter, root)
        }
    }

    /// Context for a group's index page.
    pub fn group(front_matter: FrontMatter, group: &'a CommandNode) -> Self {
        Self {
            name: Some(group.name()),
            subcommands: Some(group.children()),
            ..Self::base(front_matter, group)
        }
    }

    /// Context for a single command page.
    ///
    /// `path` is the node's path below `root`, or just its name when the
    /// node is not below `root`.
    pub fn leaf(front_matter: FrontMatter, leaf: &'a CommandNode, root: &CommandPath) -> Self {
        let path = match leaf.path().relative_to(root) {
            Some(rest) if !rest.is_empty() => rest.to_vec(),
            _ => vec![leaf.name().to_string()],
        };
        Self {
            name: Some(leaf.name()),
            path: Some(path),
            flags: Some(leaf.flags()),
            ..Self::base(front_matter, leaf)
        }
    }
}
