//! The task backend's RPC contract.
//!
//! Field-named request/response records for `CreateTask`, `ListTasks`,
//! `GetTask`, `UpdateTask` and `DeleteTask`, and the [`TaskRpc`] trait a
//! transport implements. The contract is not tied to a wire format;
//! [`crate::HttpTaskRpc`] is the shipped transport.

use async_trait::async_trait;
use relay_core::{Task, TaskId};
use serde::{Deserialize, Serialize};

use crate::error::RpcResult;

/// `CreateTask` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Creator.
    pub created_by: String,
}

/// `CreateTask` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    /// The stored task.
    #[serde(default)]
    pub task: Option<Task>,
    /// Backend message.
    #[serde(default)]
    pub message: String,
}

/// `ListTasks` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksRequest {}

/// `ListTasks` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksResponse {
    /// Every task the backend holds.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Backend message.
    #[serde(default)]
    pub message: String,
}

/// `GetTask` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTaskRequest {
    /// Task to fetch.
    pub id: TaskId,
}

/// `GetTask` response.
///
/// An absent task, or one with a zero id, means the task does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTaskResponse {
    /// The task, if any.
    #[serde(default)]
    pub task: Option<Task>,
    /// Backend message.
    #[serde(default)]
    pub message: String,
}

/// `UpdateTask` request. Empty strings mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// Task to update.
    pub id: TaskId,
    /// New title, or empty.
    pub title: String,
    /// New description, or empty.
    pub description: String,
    /// New status, or empty.
    pub status: String,
}

/// `UpdateTask` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskResponse {
    /// The task after the update.
    #[serde(default)]
    pub task: Option<Task>,
    /// Backend message.
    #[serde(default)]
    pub message: String,
}

/// `DeleteTask` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskRequest {
    /// Task to delete.
    pub id: TaskId,
}

/// `DeleteTask` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Whether the task was deleted.
    #[serde(default)]
    pub success: bool,
    /// Backend message.
    #[serde(default)]
    pub message: String,
}

/// Trait for task backend communication.
///
/// This trait abstracts the RPC transport, allowing for in-process
/// implementations in tests.
#[async_trait]
pub trait TaskRpc: Send + Sync {
    /// Invoke `CreateTask`.
    async fn create_task(&self, request: CreateTaskRequest) -> RpcResult<CreateTaskResponse>;

    /// Invoke `ListTasks`.
    async fn list_tasks(&self, request: ListTasksRequest) -> RpcResult<ListTasksResponse>;

    /// Invoke `GetTask`.
    async fn get_task(&self, request: GetTaskRequest) -> RpcResult<GetTaskResponse>;

    /// Invoke `UpdateTask`.
    async fn update_task(&self, request: UpdateTaskRequest) -> RpcResult<UpdateTaskResponse>;

    /// Invoke `DeleteTask`.
    async fn delete_task(&self, request: DeleteTaskRequest) -> RpcResult<DeleteTaskResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_response_tolerates_missing_task() {
        let resp: GetTaskResponse = serde_json::from_str(r#"{"message": "nothing"}"#).unwrap();
        assert!(resp.task.is_none());

        let resp: GetTaskResponse = serde_json::from_str(r#"{"task": null}"#).unwrap();
        assert!(resp.task.is_none());
    }

    #[test]
    fn update_request_wire_shape() {
        let req = UpdateTaskRequest {
            id: TaskId::new(4),
            status: "done".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"id": 4, "title": "", "description": "", "status": "done"})
        );
    }
}
