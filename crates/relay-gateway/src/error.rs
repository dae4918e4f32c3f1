//! API error types and responses.
//!
//! Every failure leaves the gateway as
//! `{"error": {"code": "<category code>", "detail": "<message>"}}` with the
//! category's HTTP status.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use relay_core::{Fault, FaultCategory};

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request body or parameters.
    #[error("{0}")]
    BadRequest(String),

    /// A backend adapter reported a failure.
    #[error("{}", .0.detail)]
    Backend(Fault),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    detail: String,
}

impl ApiError {
    /// The fault category this error falls into.
    #[must_use]
    pub const fn category(&self) -> FaultCategory {
        match self {
            Self::BadRequest(_) => FaultCategory::Validation,
            Self::Backend(fault) => fault.category,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.category().http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.category().code()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), code, detail = %detail, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), code, detail = %detail, "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody { code, detail },
        };

        (status, Json(body)).into_response()
    }
}

impl From<Fault> for ApiError {
    fn from(fault: Fault) -> Self {
        match fault.category {
            FaultCategory::Validation => Self::BadRequest(fault.detail),
            _ => Self::Backend(fault),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
