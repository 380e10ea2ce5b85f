use cr_core::PersonId;
use cr_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("unsupported direction {token:?} in route of {person}")]
    UnsupportedDirection { person: PersonId, token: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

pub type TransportResult<T> = Result<T, TransportError>;
