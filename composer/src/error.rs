use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::anchor::Anchor;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The HTML buffer lacks a body anchor. Nothing was written.
    #[error("malformed document: missing {missing} anchor")]
    MalformedDocument { missing: Anchor },
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
