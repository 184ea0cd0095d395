//! In-memory navigation over extracted archive trees.
//!
//! An [`ArchiveTree`] is handed to a [`Navigator`], which keeps the current
//! folder, its listing with aggregated sizes, a folder-only tree for side
//! panels and bounded back/forward history.

pub mod aggregate;
pub mod archive;
pub mod config;
pub mod error;
pub mod icons;
pub mod listing;
pub mod navigator;
pub mod tree;
pub mod utils;

pub use aggregate::{Limits, SizeTotals, aggregate};
pub use archive::{ArchiveEntry, ArchiveTree, EntryKind, EntryNode, FileMeta, NodeId, load_directory};
pub use config::Config;
pub use error::{Direction, Error, Result};
pub use icons::{Classification, ClassificationToken, IconCache, MimeTypeProvider, TypeProvider};
pub use listing::{DirectoryEntryView, EntryIcon, list};
pub use navigator::{Activation, Affordances, History, Navigator};
pub use tree::{DirectoryTreeNode, build_tree};
