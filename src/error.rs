//! Error types

use thiserror::Error;

/// History direction, used to report which stack was empty
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Back => write!(f, "back"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("'{name}' is not a folder")]
    NotAContainer { name: String },

    #[error("nothing to go {0} to")]
    EmptyHistory(Direction),

    #[error("corrupt archive tree: {0}")]
    CorruptTree(String),

    #[error("no archive is open")]
    NoArchiveOpen,

    #[error("already at the archive root")]
    AtArchiveRoot,

    #[error("node does not belong to the open archive")]
    StaleNode,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
