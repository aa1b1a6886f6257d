//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::item::ItemId;

/// Domain errors represent selections or handles that do not fit the tree shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("index out of bounds: index {index}, but only {len} items available")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("unknown item: {0:?}")]
    UnknownItem(ItemId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
