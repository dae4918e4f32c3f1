//! Error types for SOAP marshaling.

use thiserror::Error;

use crate::envelope::SoapFault;

/// A result type using `SoapError`.
pub type Result<T> = std::result::Result<T, SoapError>;

/// Errors that can occur while encoding or decoding SOAP envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoapError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The document is XML but not a SOAP envelope with a body.
    #[error("not a SOAP envelope: {0}")]
    NotAnEnvelope(String),

    /// A required element is absent.
    #[error("missing element <{0}>")]
    MissingElement(&'static str),

    /// An element holds a value of the wrong shape.
    #[error("invalid value {value:?} in <{element}>")]
    InvalidValue {
        /// The element name.
        element: &'static str,
        /// The offending text.
        value: String,
    },

    /// The request body names an operation the service does not offer.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The peer answered with a SOAP fault.
    #[error("SOAP fault {}: {}", .0.code, .0.message)]
    Fault(SoapFault),
}
