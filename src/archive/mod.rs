//! Archive entry tree
//!
//! Nodes live in an arena owned by [`ArchiveTree`]. Children are ordered
//! index lists and the parent link is a plain index, so dropping the tree
//! tears everything down at once.

mod entry;
mod loader;

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

pub use entry::ArchiveEntry;
pub use loader::load_directory;

/// Name of the container that holds an archive's top-level entries
pub const SYNTHETIC_ROOT: &str = ".";

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

/// Handle to a node, only valid for the tree that issued it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u32,
    index: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Metadata carried by file nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub decompressed_size: u64,
    pub compressed_size: u64,
    pub modified: DateTime<Utc>,
}

impl FileMeta {
    pub fn new(decompressed_size: u64, compressed_size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            decompressed_size,
            compressed_size,
            modified,
        }
    }
}

#[derive(Clone, Debug)]
pub enum EntryKind {
    Folder,
    File(FileMeta),
}

/// A single file or folder inside an archive
#[derive(Clone, Debug)]
pub struct EntryNode {
    name: String,
    kind: EntryKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl EntryNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// File metadata, `None` for folders
    pub fn file(&self) -> Option<&FileMeta> {
        match &self.kind {
            EntryKind::File(meta) => Some(meta),
            EntryKind::Folder => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Extension without the leading dot, as written in the archive
    pub fn extension(&self) -> Option<&str> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
    }

    pub fn is_synthetic_root(&self) -> bool {
        self.name == SYNTHETIC_ROOT
    }
}

/// Materialized archive contents
#[derive(Debug)]
pub struct ArchiveTree {
    id: u32,
    nodes: Vec<EntryNode>,
}

impl ArchiveTree {
    /// Create a tree holding only the archive node and its synthetic root
    pub fn new(archive_name: &str) -> Self {
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        let mut tree = Self {
            id,
            nodes: Vec::new(),
        };
        let root = tree.push(archive_name.to_string(), EntryKind::Folder, None);
        let contents = tree.push(SYNTHETIC_ROOT.to_string(), EntryKind::Folder, Some(root));
        tree.nodes[root.index()].children.push(contents);
        tree
    }

    /// The node standing for the archive file itself
    pub fn root(&self) -> NodeId {
        self.id_at(0)
    }

    /// The synthetic `"."` container holding the top-level entries
    pub fn contents_root(&self) -> NodeId {
        self.id_at(1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.tree == self.id && id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Result<&EntryNode> {
        if !self.contains(id) {
            return Err(Error::StaleNode);
        }
        Ok(&self.nodes[id.index()])
    }

    pub fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let node = self.node(parent).ok()?;
        node.children
            .iter()
            .copied()
            .find(|&c| self.nodes[c.index()].name == name)
    }

    /// Add a folder, reusing an existing sibling folder of the same name
    pub fn add_folder(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.check_insert(parent, name)?;
        if let Some(existing) = self.child_named(parent, name) {
            if self.nodes[existing.index()].is_container() {
                return Ok(existing);
            }
            return Err(duplicate(name));
        }
        Ok(self.link(parent, name, EntryKind::Folder))
    }

    pub fn add_file(&mut self, parent: NodeId, name: &str, meta: FileMeta) -> Result<NodeId> {
        self.check_insert(parent, name)?;
        if self.child_named(parent, name).is_some() {
            return Err(duplicate(name));
        }
        Ok(self.link(parent, name, EntryKind::File(meta)))
    }

    /// Full path from the archive node, joined with `/`
    pub fn path(&self, id: NodeId) -> Result<String> {
        let names = self.ancestry(id)?;
        Ok(names.join("/"))
    }

    /// Path below the synthetic root; empty for the synthetic root itself
    pub fn relative_path(&self, id: NodeId) -> Result<String> {
        let names = self.ancestry(id)?;
        let below = match names.iter().position(|n| *n == SYNTHETIC_ROOT) {
            Some(pos) => &names[pos + 1..],
            None => &names[..0],
        };
        Ok(below.join("/"))
    }

    fn ancestry(&self, id: NodeId) -> Result<Vec<&str>> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if names.len() >= self.nodes.len() {
                return Err(Error::CorruptTree(
                    "parent chain does not reach the archive root".to_string(),
                ));
            }
            let node = self.node(current)?;
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        names.reverse();
        Ok(names)
    }

    fn check_insert(&self, parent: NodeId, name: &str) -> Result<()> {
        let node = self.node(parent)?;
        if !node.is_container() {
            return Err(Error::NotAContainer {
                name: node.name.clone(),
            });
        }
        if name.is_empty() || name.contains('/') || name == SYNTHETIC_ROOT || name == ".." {
            return Err(Error::CorruptTree(format!("invalid entry name '{name}'")));
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, name: &str, kind: EntryKind) -> NodeId {
        let id = self.push(name.to_string(), kind, Some(parent));
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn push(&mut self, name: String, kind: EntryKind, parent: Option<NodeId>) -> NodeId {
        let id = self.id_at(self.nodes.len());
        self.nodes.push(EntryNode {
            name,
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            tree: self.id,
            index: index as u32,
        }
    }

    /// Append `child` to `parent` without updating the child's parent link
    #[cfg(test)]
    pub(crate) fn corrupt_link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
    }
}

fn duplicate(name: &str) -> Error {
    Error::CorruptTree(format!("duplicate entry '{name}'"))
}
