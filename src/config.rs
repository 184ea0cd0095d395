//! Configuration loaded from `config.toml`

use std::path::PathBuf;

use toml::map::Map;

use crate::aggregate::Limits;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Entries kept per history stack
    pub history_limit: usize,
    pub max_depth: usize,
    pub max_nodes: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            history_limit: 100,
            max_depth: limits.max_depth,
            max_nodes: limits.max_nodes,
            log_file: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arcnav").join("config.toml"))
    }

    /// Load from the default location; a missing file means defaults
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let table = content
            .parse::<toml::Table>()
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::from_table(&table)
    }

    fn from_table(table: &Map<String, toml::Value>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            history_limit: get_count(table, "history_limit")?.unwrap_or(defaults.history_limit),
            max_depth: get_count(table, "max_depth")?.unwrap_or(defaults.max_depth),
            max_nodes: get_count(table, "max_nodes")?.unwrap_or(defaults.max_nodes),
            log_file: get_str(table, "log_file")?.map(PathBuf::from),
        })
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}

fn get_count(table: &Map<String, toml::Value>, key: &str) -> Result<Option<usize>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::Integer(n)) if *n > 0 => usize::try_from(*n)
            .map(Some)
            .map_err(|_| Error::Config(format!("'{key}' is too large"))),
        Some(_) => Err(Error::Config(format!("'{key}' must be a positive integer"))),
    }
}

fn get_str(table: &Map<String, toml::Value>, key: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::Config(format!("'{key}' must be a string"))),
    }
}
