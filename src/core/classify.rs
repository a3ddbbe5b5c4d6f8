//! core::classify
//!
//! Leaf/group classification of command nodes.
//!
//! A node is a leaf iff it has no children, otherwise a group. The predicate
//! is evaluated on demand and never stored.

use super::spec::CommandNode;

/// Classification of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// No subcommands; one documentation page.
    Leaf,
    /// Has subcommands; an index page plus one page per child.
    Group,
}

impl CommandKind {
    pub fn of(node: &CommandNode) -> Self {
        if is_leaf(node) {
            CommandKind::Leaf
        } else {
            CommandKind::Group
        }
    }
}

pub fn is_leaf(node: &CommandNode) -> bool {
    node.children().is_empty()
}

pub fn is_group(node: &CommandNode) -> bool {
    !is_leaf(node)
}

/// Split nodes into `(leaves, groups)`, keeping input order within each list.
pub fn partition(nodes: &[CommandNode]) -> (Vec<&CommandNode>, Vec<&CommandNode>) {
    nodes.iter().partition(|n| is_leaf(n))
}

/// Nodes that sit below a group's children, relative to `root`.
///
/// Navigation and page layout go at most one group level deep; anything
/// returned here is not emitted.
pub fn beyond_group_depth(root: &CommandNode) -> Vec<&CommandNode> {
    let mut found = Vec::new();
    for group in root.children().iter().filter(|n| is_group(n)) {
        for child in group.children() {
            collect_descendants(child, &mut found);
        }
    }
    found
}

fn collect_descendants<'a>(node: &'a CommandNode, found: &mut Vec<&'a CommandNode>) {
    for child in node.children() {
        found.push(child);
        collect_descendants(child, found);
    }
}
