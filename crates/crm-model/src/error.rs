use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid definition id: {0:?}")]
    InvalidDefinitionId(String),
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
    #[error("unknown record table: {0}")]
    UnknownRecordKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
