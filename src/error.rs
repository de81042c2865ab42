use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Text must not be empty")]
    EmptyText,

    #[error("No entry matches id '{0}'")]
    UnknownId(String),

    #[error("Id '{0}' matches more than one entry")]
    AmbiguousId(String),
}

pub type Result<T> = std::result::Result<T, Error>;
