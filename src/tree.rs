//! Folder-only tree for side navigation panels
//!
//! Building recurses once per nesting level; depth is capped by
//! `Limits::max_depth` and a deeper archive is reported as corrupt rather
//! than cut short.

use crate::aggregate::{Limits, check_parent};
use crate::archive::{ArchiveTree, NodeId};
use crate::error::{Error, Result};

/// Label of the panel's top node
pub const PANEL_ROOT_LABEL: &str = "Directory";

#[derive(Clone, Debug)]
pub struct DirectoryTreeNode {
    pub name: String,
    pub node: NodeId,
    children: Vec<DirectoryTreeNode>,
    expanded: bool,
}

impl DirectoryTreeNode {
    pub fn children(&self) -> &[DirectoryTreeNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [DirectoryTreeNode] {
        &mut self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Folders without sub-folders never expand; returns the resulting state
    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        if !self.children.is_empty() {
            self.expanded = expanded;
        }
        self.expanded
    }

    pub fn toggle(&mut self) -> bool {
        self.set_expanded(!self.expanded)
    }

    pub fn find(&self, node: NodeId) -> Option<&DirectoryTreeNode> {
        if self.node == node {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(node))
    }

    pub fn find_mut(&mut self, node: NodeId) -> Option<&mut DirectoryTreeNode> {
        if self.node == node {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(node))
    }

    /// Expand every ancestor of `node` so it becomes visible.
    /// Returns false if `node` is not in this tree.
    pub fn expand_to(&mut self, node: NodeId) -> bool {
        if self.node == node {
            return true;
        }
        let found = self.children.iter_mut().any(|c| c.expand_to(node));
        if found {
            self.set_expanded(true);
        }
        found
    }

    /// Same names, nodes and nesting, ignoring expansion state
    pub fn same_structure(&self, other: &DirectoryTreeNode) -> bool {
        self.name == other.name
            && self.node == other.node
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_structure(b))
    }

    /// Number of nodes including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

/// Build the folder tree below `id`, collapsed
pub fn build_tree(tree: &ArchiveTree, id: NodeId, limits: Limits) -> Result<DirectoryTreeNode> {
    let node = tree.node(id)?;
    if !node.is_container() {
        return Err(Error::NotAContainer {
            name: node.name().to_string(),
        });
    }
    build_level(tree, id, 0, limits)
}

/// Panel tree for an archive: the synthetic root relabelled and expanded
pub fn build_panel(tree: &ArchiveTree, contents_root: NodeId, limits: Limits) -> Result<DirectoryTreeNode> {
    let mut panel = build_tree(tree, contents_root, limits)?;
    panel.name = PANEL_ROOT_LABEL.to_string();
    panel.set_expanded(true);
    Ok(panel)
}

fn build_level(tree: &ArchiveTree, id: NodeId, depth: usize, limits: Limits) -> Result<DirectoryTreeNode> {
    let node = tree.node(id)?;
    if depth > limits.max_depth {
        let message = format!("folder nesting deeper than {} at '{}'", limits.max_depth, node.name());
        log::warn!("{message}");
        return Err(Error::CorruptTree(message));
    }

    let mut children = Vec::new();
    for &child_id in node.children() {
        let child = tree.node(child_id)?;
        if !child.is_container() {
            continue;
        }
        check_parent(child.parent(), id, child.name())?;
        children.push(build_level(tree, child_id, depth + 1, limits)?);
    }

    Ok(DirectoryTreeNode {
        name: node.name().to_string(),
        node: id,
        children,
        expanded: false,
    })
}
