//! Loading an extracted directory as an archive tree

use std::path::Path;

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use super::{ArchiveEntry, ArchiveTree};
use crate::error::Result;

/// Walk `path` and present its contents as an archive.
///
/// Files on disk are stored, not compressed, so both sizes are the file
/// length. Siblings appear in file-name order.
pub fn load_directory(path: &Path) -> Result<ArchiveTree> {
    if !path.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", path.display()),
        )
        .into());
    }

    let archive_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let mut entries = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(path) else {
            continue;
        };
        let full_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let is_dir = entry.file_type().is_dir();
        let metadata = entry.metadata()?;
        let size = if is_dir { 0 } else { metadata.len() };

        let mut record = ArchiveEntry::new(full_path, is_dir, size);
        if let Ok(modified) = metadata.modified() {
            record = record.with_modified(DateTime::<Utc>::from(modified));
        }
        entries.push(record);
    }

    log::debug!("loaded {} entries from {}", entries.len(), path.display());
    ArchiveTree::from_entries(&archive_name, entries)
}
