//! Error types for the storage layer.

use relay_core::UserId;
use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No user exists with the requested id.
    #[error("User with ID {0} not found.")]
    NotFound(UserId),
}
