//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod health;
pub mod index;
pub mod tasks;
pub mod users;

use axum::http::uri::Authority;
use axum::http::{header, HeaderMap};

use crate::config::GatewayConfig;
use crate::error::ApiError;

/// The base URL hypermedia links are built against.
///
/// The configured public URL wins; otherwise the request's `Host` header is
/// used, with `X-Forwarded-Proto` picking the scheme when a proxy sets it.
/// A `Host` that is not a plain `host[:port]` falls back to `localhost`, and
/// any scheme other than `http`/`https` falls back to `http`.
pub(crate) fn base_url(config: &GatewayConfig, headers: &HeaderMap) -> String {
    if let Some(url) = &config.public_base_url {
        return url.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Authority>().ok())
        .filter(|authority| !authority.as_str().contains('@'))
        .map_or_else(|| "localhost".to_string(), |authority| authority.to_string());
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .and_then(|v| {
            ["http", "https"]
                .into_iter()
                .find(|scheme| v.eq_ignore_ascii_case(scheme))
        })
        .unwrap_or("http");

    format!("{scheme}://{host}")
}

/// Reject a required string field that is absent or blank.
pub(crate) fn require(field: &'static str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("'{field}' is required"))),
    }
}
