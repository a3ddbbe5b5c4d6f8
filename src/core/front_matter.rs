//! core::front_matter
//!
//! Page metadata derived from a command node and its role.
//!
//! # Roles
//!
//! | Role       | Title                                   | Fallback description            |
//! |------------|-----------------------------------------|---------------------------------|
//! | `Overview` | `<Label> - <binary> <name>`             | `Manage <Name> resources`       |
//! | `Group`    | `<Name> - <binary> <root>`              | `Manage <Name>`                 |
//! | `Leaf`     | `<binary> <root> <relative path>`       | empty                           |
//!
//! Descriptions are always acronym-normalized. Missing fields degrade to
//! empty defaults; building front matter never fails.

use std::collections::BTreeSet;

use serde::Serialize;

use super::naming::Naming;
use super::spec::{CommandNode, CommandPath};

/// Where a page sits in the generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The root command's index page.
    Overview,
    /// A group's index page.
    Group,
    /// A single command page.
    Leaf,
}

/// Metadata rendered at the top of every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    /// Sorted and de-duplicated.
    pub keywords: BTreeSet<String>,
    /// Full invocation, e.g. `xcsh cloudstatus components list`.
    pub command: String,
    /// The root command path the page belongs to.
    pub command_group: String,
    pub aliases: Vec<String>,
}

/// Builds front matter for one generation run.
#[derive(Debug, Clone)]
pub struct FrontMatterBuilder {
    binary: String,
    root: CommandPath,
    root_label: String,
    brand_keywords: Vec<String>,
    naming: Naming,
}

impl FrontMatterBuilder {
    pub fn new(
        binary: impl Into<String>,
        root: CommandPath,
        root_label: impl Into<String>,
        brand_keywords: Vec<String>,
        naming: Naming,
    ) -> Self {
        Self {
            binary: binary.into(),
            root,
            root_label: root_label.into(),
            brand_keywords,
            naming,
        }
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn build(&self, node: &CommandNode, role: Role) -> FrontMatter {
        let name = node.name();
        let human = self.naming.humanize(name);
        let root = self.root.joined();

        let (title, fallback) = match role {
            Role::Overview => (
                format!("{} - {} {}", self.root_label, self.binary, name),
                format!("Manage {} resources", human),
            ),
            Role::Group => (
                format!("{} - {} {}", human, self.binary, root),
                format!("Manage {}", human),
            ),
            Role::Leaf => {
                let relative = match node.path().relative_to(&self.root) {
                    Some(rest) if !rest.is_empty() => rest.join(" "),
                    _ => name.to_string(),
                };
                (
                    format!("{} {} {}", self.binary, root, relative),
                    String::new(),
                )
            }
        };

        let description = node.short().map(str::to_string).unwrap_or(fallback);

        FrontMatter {
            title,
            description: self.naming.normalize_acronyms(&description),
            keywords: self.keywords(node),
            command: format!("{} {}", self.binary, node.path().joined()),
            command_group: root,
            aliases: node.aliases().to_vec(),
        }
    }

    fn keywords(&self, node: &CommandNode) -> BTreeSet<String> {
        let mut keywords: BTreeSet<String> = self.brand_keywords.iter().cloned().collect();
        if !self.root_label.is_empty() {
            keywords.insert(self.root_label.to_lowercase());
        }
        keywords.insert(node.name().to_string());
        keywords.extend(node.aliases().iter().cloned());
        keywords
    }
}
