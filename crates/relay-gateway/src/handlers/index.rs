//! Service index at `/`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use relay_clients::TaskRpc;
use relay_core::{collection_links, Links, ResourceKind};

use crate::handlers::base_url;
use crate::state::GatewayState;

/// Welcome document pointing at both collections.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    /// Greeting.
    pub message: &'static str,
    /// Collection links, keyed by collection.
    pub resources: IndexResources,
}

/// Links for each collection.
#[derive(Debug, Serialize)]
pub struct IndexResources {
    /// `/tasks` links.
    pub tasks: Links,
    /// `/users` links.
    pub users: Links,
}

/// Index handler.
pub async fn index<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: TaskRpc + 'static,
{
    let base = base_url(&state.config, &headers);

    Json(IndexResponse {
        message: "Welcome to the Relay API Gateway. Tasks are served over RPC, users over SOAP.",
        resources: IndexResources {
            tasks: collection_links(ResourceKind::Tasks, &base),
            users: collection_links(ResourceKind::Users, &base),
        },
    })
}
