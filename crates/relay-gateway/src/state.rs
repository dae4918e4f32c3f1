//! Gateway application state.
//!
//! This module defines the shared state that is available to all request handlers.

use std::sync::Arc;

use relay_clients::{TaskClient, TaskRpc, UserClient};

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// Holds the two backend adapters and the immutable configuration. Nothing
/// here changes between requests.
pub struct GatewayState<R>
where
    R: TaskRpc,
{
    /// Adapter for the task RPC backend.
    pub tasks: TaskClient<R>,
    /// Adapter for the user SOAP backend.
    pub users: UserClient,
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
}

impl<R> GatewayState<R>
where
    R: TaskRpc,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(tasks: TaskClient<R>, users: UserClient, config: GatewayConfig) -> Self {
        Self {
            tasks,
            users,
            config: Arc::new(config),
        }
    }
}

impl<R> Clone for GatewayState<R>
where
    R: TaskRpc,
{
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            users: self.users.clone(),
            config: Arc::clone(&self.config),
        }
    }
}
