//! Recursive size aggregation

use crate::archive::{ArchiveTree, FileMeta, NodeId};
use crate::error::{Error, Result};

/// Summed sizes of every file below a node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeTotals {
    pub decompressed: u64,
    pub compressed: u64,
}

impl SizeTotals {
    fn add(&mut self, meta: &FileMeta) {
        self.decompressed = self.decompressed.saturating_add(meta.decompressed_size);
        self.compressed = self.compressed.saturating_add(meta.compressed_size);
    }
}

impl From<&FileMeta> for SizeTotals {
    fn from(meta: &FileMeta) -> Self {
        Self {
            decompressed: meta.decompressed_size,
            compressed: meta.compressed_size,
        }
    }
}

/// Ceilings for full subtree walks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Deepest folder nesting accepted below the walked node
    pub max_depth: usize,
    /// Most nodes a single walk may visit
    pub max_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            max_nodes: 10_000_000,
        }
    }
}

/// Total sizes for `id`: its own sizes for a file, the sum over all
/// descendant files for a folder.
pub fn aggregate(tree: &ArchiveTree, id: NodeId, limits: Limits) -> Result<SizeTotals> {
    let node = tree.node(id)?;
    if let Some(meta) = node.file() {
        return Ok(SizeTotals::from(meta));
    }

    let mut totals = SizeTotals::default();
    let mut visited = 1usize;
    let mut stack = vec![(id, 0usize)];

    while let Some((current, depth)) = stack.pop() {
        let node = tree.node(current)?;
        visited += node.children().len();
        if visited > limits.max_nodes {
            return Err(corrupt(format!(
                "more than {} nodes below '{}'",
                limits.max_nodes,
                tree.node(id)?.name()
            )));
        }

        for &child_id in node.children() {
            let child = tree.node(child_id)?;
            check_parent(child.parent(), current, child.name())?;
            match child.file() {
                Some(meta) => totals.add(meta),
                None if depth + 1 > limits.max_depth => {
                    return Err(corrupt(format!(
                        "folder nesting deeper than {} at '{}'",
                        limits.max_depth,
                        child.name()
                    )));
                }
                None => stack.push((child_id, depth + 1)),
            }
        }
    }

    Ok(totals)
}

/// A child whose parent link disagrees with where it was found means the
/// tree has a cycle or a shared node.
pub(crate) fn check_parent(parent: Option<NodeId>, expected: NodeId, name: &str) -> Result<()> {
    if parent != Some(expected) {
        return Err(corrupt(format!("'{name}' is linked under a folder that does not own it")));
    }
    Ok(())
}

fn corrupt(message: String) -> Error {
    log::warn!("{message}");
    Error::CorruptTree(message)
}
