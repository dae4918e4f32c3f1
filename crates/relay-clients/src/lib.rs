//! Backend adapters for the relay gateway.
//!
//! Each adapter owns one backend protocol and returns only normalized
//! [`relay_core::Fault`]s:
//!
//! - [`TaskClient`] over any [`TaskRpc`] transport, with [`HttpTaskRpc`] as
//!   the shipped JSON-over-HTTP transport
//! - [`UserClient`] speaking SOAP to the user service
//!
//! Calls are attempted once and bounded by a timeout. There are no retries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod http_rpc;
pub mod task_client;
pub mod task_rpc;
pub mod user_client;

use std::time::Duration;

pub use error::{RpcCode, RpcError, RpcResult};
pub use http_rpc::HttpTaskRpc;
pub use task_client::{NewTask, TaskChanges, TaskClient, TaskListReply, TaskReply};
pub use task_rpc::{
    CreateTaskRequest, CreateTaskResponse, DeleteTaskRequest, DeleteTaskResponse,
    GetTaskRequest, GetTaskResponse, ListTasksRequest, ListTasksResponse, TaskRpc,
    UpdateTaskRequest, UpdateTaskResponse,
};
pub use user_client::{UserClient, UserListReply, UserReply};

/// Build the pooled HTTP client shared by both adapters.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(connect_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .user_agent(concat!("relay-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
}
