//! REST gateway for the relay platform.
//!
//! One JSON API in front of two backends that speak different protocols:
//!
//! - `/tasks` is translated into task RPC calls
//! - `/users` is translated into SOAP envelopes for the user service
//!
//! Successful responses are wrapped in an [`relay_core::Envelope`] with
//! hypermedia links. Every failure, whichever backend raised it, is reported
//! through one error taxonomy (see [`ApiError`]).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        REST clients                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       relay-gateway                          │
//! │   validate ─► dispatch ─► wrap with links / map fault        │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                               │
//!                 ▼                               ▼
//!          ┌─────────────┐                 ┌─────────────┐
//!          │ TaskClient  │                 │ UserClient  │
//!          │ (RPC)       │                 │ (SOAP/XML)  │
//!          └─────────────┘                 └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use relay_clients::{build_http_client, HttpTaskRpc, TaskClient, UserClient};
//! use relay_gateway::{create_router, GatewayConfig, GatewayState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::default();
//! let http = build_http_client(config.backend_timeout())?;
//!
//! let rpc = Arc::new(HttpTaskRpc::with_client(http.clone(), &config.task_service_url));
//! let tasks = TaskClient::new(rpc, config.backend_timeout());
//! let users = UserClient::new(http, &config.user_service_url, config.backend_timeout());
//!
//! let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
//! let app = create_router(GatewayState::new(tasks, users, config));
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;
