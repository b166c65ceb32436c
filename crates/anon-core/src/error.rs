use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No text to anonymise: provide text or upload a file")]
    EmptyInput,

    #[error("Nothing to save: finalise an anonymisation first")]
    NothingToSave,

    #[error("No review in progress")]
    NoReview,

    #[error("Unknown sensitivity level: {0}")]
    InvalidLevel(String),

    #[error("Unknown processing mode: {0}")]
    InvalidMode(String),

    #[error("Unknown download format: {0}")]
    InvalidFormat(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
