//! Flat archive listings turned into trees

use chrono::{DateTime, Utc};

use super::{ArchiveTree, FileMeta, NodeId, SYNTHETIC_ROOT};
use crate::error::Result;

/// One record of a flat archive listing
#[derive(Clone, Debug)]
pub struct ArchiveEntry {
    pub name: String,
    pub full_path: String,
    pub is_dir: bool,
    pub size: u64,
    pub compressed_size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl ArchiveEntry {
    pub fn new(full_path: String, is_dir: bool, size: u64) -> Self {
        let full_path = full_path.trim_end_matches('/').to_string();
        let name = full_path
            .split('/')
            .next_back()
            .unwrap_or(&full_path)
            .to_string();
        Self {
            name,
            full_path,
            is_dir,
            size,
            compressed_size: size,
            modified: None,
        }
    }

    pub fn with_compressed_size(mut self, compressed_size: u64) -> Self {
        self.compressed_size = compressed_size;
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    fn meta(&self) -> FileMeta {
        FileMeta::new(
            self.size,
            self.compressed_size,
            self.modified.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }
}

impl ArchiveTree {
    /// Build a tree from slash-separated listing records.
    ///
    /// Folders missing from the listing are created on the way down, and a
    /// folder listed more than once keeps the position of its first sighting.
    pub fn from_entries<I>(archive_name: &str, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ArchiveEntry>,
    {
        let mut tree = Self::new(archive_name);
        for entry in entries {
            tree.insert_entry(&entry)?;
        }
        Ok(tree)
    }

    fn insert_entry(&mut self, entry: &ArchiveEntry) -> Result<()> {
        let parts: Vec<&str> = entry
            .full_path
            .split('/')
            .filter(|p| !p.is_empty() && *p != SYNTHETIC_ROOT)
            .collect();
        let Some((last, dirs)) = parts.split_last() else {
            return Ok(());
        };

        let parent = self.ensure_folders(dirs)?;
        if entry.is_dir {
            self.add_folder(parent, last)?;
        } else {
            self.add_file(parent, last, entry.meta())?;
        }
        Ok(())
    }

    fn ensure_folders(&mut self, dirs: &[&str]) -> Result<NodeId> {
        let mut parent = self.contents_root();
        for dir in dirs {
            parent = self.add_folder(parent, dir)?;
        }
        Ok(parent)
    }
}
