//! Codec errors (wraps domain errors and the CSV/I/O layer)

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for decode/encode operations.
pub type CodecResult<T> = Result<T, CodecError>;
