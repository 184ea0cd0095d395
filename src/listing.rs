//! Flat listing of a folder's immediate children

use chrono::{DateTime, Utc};

use crate::aggregate::{Limits, SizeTotals, aggregate};
use crate::archive::{ArchiveTree, NodeId};
use crate::error::{Error, Result};
use crate::icons::{ClassificationToken, IconCache};
use crate::utils::format_size;

pub const FOLDER_TYPE_LABEL: &str = "Folder";
/// Type label for files without an extension
pub const PLAIN_FILE_TYPE_LABEL: &str = "File";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryIcon {
    Folder,
    /// File without an extension
    File,
    Resolved(ClassificationToken),
}

/// One row of a folder listing
#[derive(Clone, Debug)]
pub struct DirectoryEntryView {
    pub name: String,
    pub is_container: bool,
    pub type_label: String,
    pub icon: EntryIcon,
    pub decompressed_size: u64,
    pub compressed_size: u64,
    /// `None` when there is nothing decompressed to compare against
    pub compression_ratio_percent: Option<u32>,
    /// Unix epoch for folders
    pub modified: DateTime<Utc>,
    /// Path of the listed folder, `/`-terminated, empty at the archive top
    pub relative_directory: String,
    pub node: NodeId,
}

impl DirectoryEntryView {
    pub fn size_text(&self) -> String {
        format_size(self.decompressed_size)
    }

    pub fn compressed_size_text(&self) -> String {
        format_size(self.compressed_size)
    }

    pub fn ratio_text(&self) -> String {
        match self.compression_ratio_percent {
            Some(ratio) => format!("{ratio}%"),
            None => "---%".to_string(),
        }
    }
}

/// `floor(100 * compressed / decompressed)`, `None` for empty input.
/// Not clamped: stored data that grew on compression reports more than 100.
pub fn compression_ratio(decompressed: u64, compressed: u64) -> Option<u32> {
    if decompressed == 0 {
        return None;
    }
    let ratio = u128::from(compressed) * 100 / u128::from(decompressed);
    Some(u32::try_from(ratio).unwrap_or(u32::MAX))
}

/// List the immediate children of folder `id`, in archive order
pub fn list(
    tree: &ArchiveTree,
    id: NodeId,
    icons: &IconCache,
    limits: Limits,
) -> Result<Vec<DirectoryEntryView>> {
    let node = tree.node(id)?;
    if !node.is_container() {
        return Err(Error::NotAContainer {
            name: node.name().to_string(),
        });
    }

    let mut relative_directory = tree.relative_path(id)?;
    if !relative_directory.is_empty() {
        relative_directory.push('/');
    }

    let mut views = Vec::with_capacity(node.children().len());
    for &child_id in node.children() {
        let child = tree.node(child_id)?;

        let (totals, type_label, icon, modified) = match child.file() {
            None => (
                aggregate(tree, child_id, limits)?,
                FOLDER_TYPE_LABEL.to_string(),
                EntryIcon::Folder,
                DateTime::<Utc>::UNIX_EPOCH,
            ),
            Some(meta) => {
                let (type_label, icon) = match child.extension() {
                    Some(ext) if !ext.is_empty() => {
                        let token = icons.resolve(ext);
                        (token.description.clone(), EntryIcon::Resolved(token))
                    }
                    _ => (PLAIN_FILE_TYPE_LABEL.to_string(), EntryIcon::File),
                };
                (SizeTotals::from(meta), type_label, icon, meta.modified)
            }
        };

        views.push(DirectoryEntryView {
            name: child.name().to_string(),
            is_container: child.is_container(),
            type_label,
            icon,
            decompressed_size: totals.decompressed,
            compressed_size: totals.compressed,
            compression_ratio_percent: compression_ratio(totals.decompressed, totals.compressed),
            modified,
            relative_directory: relative_directory.clone(),
            node: child_id,
        });
    }

    Ok(views)
}
