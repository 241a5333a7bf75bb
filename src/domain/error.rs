//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the induction input contract.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("dataset must be non-empty")]
    EmptyDataset,

    #[error("unknown feature '{feature}' in row {row}")]
    UnknownFeature { feature: String, row: usize },

    #[error("invalid feature: {0}")]
    InvalidFeature(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
