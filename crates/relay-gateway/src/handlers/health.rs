//! Liveness at `/health`.
//!
//! Shares its `status`/`service` shape with the user service's `/health` and
//! adds where this gateway sends its traffic. Backends are not probed, so a
//! healthy gateway can still answer 503 on resource routes.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use relay_clients::TaskRpc;

use crate::state::GatewayState;

/// Health document.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Configured backends.
    pub backends: BackendTargets,
}

/// Where each backend adapter points.
#[derive(Debug, Serialize)]
pub struct BackendTargets {
    /// Task RPC base URL.
    pub task_service: String,
    /// User SOAP endpoint.
    pub user_service: String,
    /// Per-call bound applied to both, in milliseconds.
    pub timeout_ms: u128,
}

/// Health handler.
pub async fn health<R>(State(state): State<Arc<GatewayState<R>>>) -> Json<HealthResponse>
where
    R: TaskRpc + 'static,
{
    Json(HealthResponse {
        status: "healthy",
        service: "relay-gateway",
        version: env!("CARGO_PKG_VERSION"),
        backends: BackendTargets {
            task_service: state.config.task_service_url.clone(),
            user_service: state.users.endpoint().to_string(),
            timeout_ms: state.tasks.timeout().as_millis(),
        },
    })
}
