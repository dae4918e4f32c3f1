//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use relay_clients::TaskRpc;

use crate::handlers::{health, index, tasks, users};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /` - Service index
/// - `GET /health` - Health check
///
/// ## Tasks (task RPC backend)
/// - `POST /tasks` - Create task
/// - `GET /tasks` - List tasks
/// - `GET /tasks/{id}` - Get task
/// - `PUT /tasks/{id}` - Update task
/// - `DELETE /tasks/{id}` - Delete task
///
/// ## Users (user SOAP backend)
/// - `POST /users` - Create user
/// - `GET /users` - List users
/// - `GET /users/{id}` - Get user
pub fn create_router<R>(state: GatewayState<R>) -> Router
where
    R: TaskRpc + 'static,
{
    // Extract config values before moving state
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let state = Arc::new(state);

    Router::new()
        .route("/", get(index::index::<R>))
        .route("/health", get(health::health::<R>))
        // Tasks
        .route(
            "/tasks",
            get(tasks::list_tasks::<R>).post(tasks::create_task::<R>),
        )
        .route(
            "/tasks/{task_id}",
            get(tasks::get_task::<R>)
                .put(tasks::update_task::<R>)
                .delete(tasks::delete_task::<R>),
        )
        // Users
        .route(
            "/users",
            get(users::list_users::<R>).post(users::create_user::<R>),
        )
        .route("/users/{user_id}", get(users::get_user::<R>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_any_origin() {
        let origins = vec!["*".to_string()];
        let _layer = build_cors_layer(&origins);
    }

    #[test]
    fn cors_specific_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "not a header value\n".to_string(),
        ];
        let _layer = build_cors_layer(&origins);
    }
}
