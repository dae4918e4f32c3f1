//! The normalized failure type shared by every backend adapter.
//!
//! Each adapter converts its backend-native errors (RPC status codes, SOAP
//! faults, transport errors, malformed payloads) into a [`Fault`] at its own
//! boundary. Nothing above the adapters ever sees a native error.

use std::fmt;

use thiserror::Error;

/// A result type using `Fault`.
pub type Result<T> = std::result::Result<T, Fault>;

/// The category a failure falls into, independent of which backend raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultCategory {
    /// The request itself is malformed.
    Validation,
    /// The referenced resource does not exist.
    NotFound,
    /// The backend could not be reached or did not answer in time.
    BackendUnavailable,
    /// The backend answered with an error or an undecodable payload.
    BackendProtocolFault,
    /// Anything not otherwise classified.
    Internal,
}

impl FaultCategory {
    /// Returns the HTTP status code for this category.
    #[must_use]
    pub const fn http_status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::BackendUnavailable => 503,
            Self::BackendProtocolFault => 502,
            Self::Internal => 500,
        }
    }

    /// Returns the stable machine-readable code for this category.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::BackendUnavailable => "backend_unavailable",
            Self::BackendProtocolFault => "backend_protocol_fault",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A normalized backend failure: a category plus a human-readable detail.
///
/// The detail never carries raw protocol content such as XML or stack traces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category}: {detail}")]
pub struct Fault {
    /// What kind of failure this is.
    pub category: FaultCategory,
    /// Message suitable for returning to a REST client.
    pub detail: String,
}

impl Fault {
    /// Create a fault with the given category and detail.
    #[must_use]
    pub fn new(category: FaultCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: detail.into(),
        }
    }

    /// A malformed or incomplete request.
    #[must_use]
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(FaultCategory::Validation, detail)
    }

    /// The referenced resource does not exist.
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(FaultCategory::NotFound, detail)
    }

    /// The named backend could not be reached.
    #[must_use]
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::new(FaultCategory::BackendUnavailable, detail)
    }

    /// The backend answered, but with an error or garbage.
    #[must_use]
    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::new(FaultCategory::BackendProtocolFault, detail)
    }

    /// Unclassified failure.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(FaultCategory::Internal, detail)
    }

    /// Returns the HTTP status code for this fault.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        self.category.http_status_code()
    }
}
