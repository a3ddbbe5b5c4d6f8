//! engine::plan
//!
//! Deterministic page planning.
//!
//! A plan lists every page one run emits, each with its role and location,
//! computed in a single traversal of the root command:
//!
//! - the root itself -> `index.md` (`Overview`)
//! - each leaf child -> `<name>.md` (`Leaf`)
//! - each group child -> `<group>/index.md` (`Group`), then
//!   `<group>/<name>.md` (`Leaf`) for each of its children
//!
//! Leaves come before groups and siblings are sorted by name, matching the
//! navigation outline. Children of a group's children get no page.
//!
//! # Invariants
//!
//! - Planning does no I/O
//! - No two planned pages share a location. A child named `index` would
//!   land on its parent's index page, so such trees are rejected with
//!   `SpecError::PageCollision`.
//!
//! # Example
//!
//! ```
//! use specdocs::core::spec::{CommandNode, CommandPath};
//! use specdocs::engine::plan::PagePlan;
//!
//! let root = CommandNode::leaf(CommandPath::parse("cloudstatus").unwrap())
//!     .with_children(vec![CommandNode::leaf(CommandPath::parse("cloudstatus status").unwrap())])
//!     .unwrap();
//!
//! let plan = PagePlan::for_root(&root).unwrap();
//! assert_eq!(plan.len(), 2);
//! assert_eq!(plan.pages()[1].location.to_string(), "status.md");
//! ```

use crate::core::classify::partition;
use crate::core::front_matter::Role;
use crate::core::paths::PageLocation;
use crate::core::spec::{CommandNode, SpecError};

/// One page to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage<'a> {
    pub location: PageLocation,
    pub role: Role,
    pub node: &'a CommandNode,
}

/// Every page of one run, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan<'a> {
    pages: Vec<PlannedPage<'a>>,
}

impl<'a> PagePlan<'a> {
    /// Plan the pages for `root` and its documented descendants.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::PageCollision` if two commands route to the same
    /// file.
    pub fn for_root(root: &'a CommandNode) -> Result<Self, SpecError> {
        let mut plan = Self::default();
        plan.push(PageLocation::root_index(), Role::Overview, root)?;

        let (leaves, groups) = partition(root.children());

        for leaf in sorted(leaves) {
            plan.push(PageLocation::leaf_at_root(leaf.name()), Role::Leaf, leaf)?;
        }

        for group in sorted(groups) {
            plan.push(PageLocation::group_index(group.name()), Role::Group, group)?;
            for member in sorted(group.children().iter().collect()) {
                plan.push(
                    PageLocation::leaf_in_group(group.name(), member.name()),
                    Role::Leaf,
                    member,
                )?;
            }
        }

        Ok(plan)
    }

    fn push(
        &mut self,
        location: PageLocation,
        role: Role,
        node: &'a CommandNode,
    ) -> Result<(), SpecError> {
        if let Some(existing) = self.pages.iter().find(|p| p.location == location) {
            return Err(SpecError::PageCollision {
                location: location.to_string(),
                first: existing.node.path().joined(),
                second: node.path().joined(),
            });
        }
        self.pages.push(PlannedPage {
            location,
            role,
            node,
        });
        Ok(())
    }

    pub fn pages(&self) -> &[PlannedPage<'a>] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn sorted(mut nodes: Vec<&CommandNode>) -> Vec<&CommandNode> {
    nodes.sort_by(|a, b| a.name().cmp(b.name()));
    nodes
}
