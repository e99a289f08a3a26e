//! Errors raised by state containers and their inputs.

use std::path::PathBuf;

use thiserror::Error;

use crm_model::{CollectionKind, DefinitionId, ModelError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    /// `add` was called with an id already present in the collection.
    #[error("{kind} already contains an entry with id '{id}'")]
    DuplicateId {
        kind: CollectionKind,
        id: DefinitionId,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid CSV input {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV input {path} has no header row")]
    MissingHeader { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, StateError>;
