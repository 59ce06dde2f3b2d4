//! Shared error types for the services crate.

use thiserror::Error;

use exercise_core::model::MalformedContent;
use storage::repository::StorageError;

/// Errors emitted by exercise sessions and the loop service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("could not load exercise: {0}")]
    Malformed(#[from] MalformedContent),
    #[error("exercise already checked")]
    AlreadyChecked,
    #[error("exercise has not been checked yet")]
    NotChecked,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
