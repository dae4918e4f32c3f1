//! Native error types of the task RPC transport.
//!
//! These never leave this crate: [`crate::TaskClient`] classifies them into
//! [`relay_core::Fault`]s before returning.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A result type using `RpcError`.
pub type RpcResult<T> = std::result::Result<T, RpcError>;

/// Status codes the task backend reports on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcCode {
    /// The operation was cancelled.
    Cancelled,
    /// The request is malformed.
    InvalidArgument,
    /// The deadline expired before the operation finished.
    DeadlineExceeded,
    /// The requested entity does not exist.
    NotFound,
    /// The entity already exists.
    AlreadyExists,
    /// The caller may not perform the operation.
    PermissionDenied,
    /// A quota or resource is exhausted.
    ResourceExhausted,
    /// The system is not in a state the operation requires.
    FailedPrecondition,
    /// The operation was aborted.
    Aborted,
    /// The operation is not implemented.
    Unimplemented,
    /// An invariant in the backend was broken.
    Internal,
    /// The service is currently unavailable.
    Unavailable,
    /// Unrecoverable data loss.
    DataLoss,
    /// The request lacks valid credentials.
    Unauthenticated,
    /// Any code this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl RpcCode {
    /// The wire spelling of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a task RPC transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// The backend could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The backend did not answer within the call bound.
    #[error("call timed out")]
    Timeout,

    /// The backend answered with an error status.
    #[error("{code}: {message}")]
    Status {
        /// Status code.
        code: RpcCode,
        /// Backend-provided detail.
        message: String,
    },

    /// The backend answered with a payload that does not decode.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl RpcError {
    /// Build a status error.
    #[must_use]
    pub fn status(code: RpcCode, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }
}
