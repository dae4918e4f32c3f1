//! Task adapter: gateway calls in, RPC records out, faults back.
//!
//! Every call is bounded by the configured timeout and attempted once.
//! Classification of failures:
//!
//! | RPC outcome | Fault |
//! |---|---|
//! | connection failure, timeout, `UNAVAILABLE`, `DEADLINE_EXCEEDED` | `BackendUnavailable` |
//! | `NOT_FOUND`, or a get/update answered with a zero id | `NotFound` |
//! | any other status, undecodable payload | `BackendProtocolFault` |

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use relay_core::{Fault, Result, Task, TaskId};

use crate::error::{RpcCode, RpcError, RpcResult};
use crate::task_rpc::{
    CreateTaskRequest, DeleteTaskRequest, GetTaskRequest, ListTasksRequest, TaskRpc,
    UpdateTaskRequest,
};

/// Name used for the task backend in fault details.
pub const TASK_SERVICE: &str = "task service";

/// Fields for a new task. Omitted optional fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Required title.
    pub title: String,
    /// Optional description.
    pub description: String,
    /// Optional creator.
    pub created_by: String,
}

/// Partial update. An empty string leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// New status.
    pub status: String,
}

/// A task plus the backend's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReply {
    /// The task.
    pub task: Task,
    /// Backend message.
    pub message: String,
}

/// Every task plus the backend's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListReply {
    /// The tasks.
    pub tasks: Vec<Task>,
    /// Backend message.
    pub message: String,
}

/// Adapter over a [`TaskRpc`] transport.
pub struct TaskClient<R: TaskRpc> {
    rpc: Arc<R>,
    timeout: Duration,
}

impl<R: TaskRpc> Clone for TaskClient<R> {
    fn clone(&self) -> Self {
        Self {
            rpc: Arc::clone(&self.rpc),
            timeout: self.timeout,
        }
    }
}

impl<R: TaskRpc> TaskClient<R> {
    /// Create a client with the given per-call bound.
    #[must_use]
    pub fn new(rpc: Arc<R>, timeout: Duration) -> Self {
        Self { rpc, timeout }
    }

    /// The per-call bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns a `Fault` classified per the module table. A success that
    /// carries no task is a protocol fault.
    pub async fn create(&self, new_task: NewTask) -> Result<TaskReply> {
        let request = CreateTaskRequest {
            title: new_task.title,
            description: new_task.description,
            created_by: new_task.created_by,
        };
        let response = self
            .bounded("CreateTask", None, self.rpc.create_task(request))
            .await?;

        match response.task {
            Some(task) if !task.id.is_unset() => {
                tracing::info!(task_id = %task.id, "Task created");
                Ok(TaskReply {
                    task,
                    message: response.message,
                })
            }
            _ => Err(Fault::protocol(format!(
                "{TASK_SERVICE} accepted CreateTask but returned no task"
            ))),
        }
    }

    /// List every task.
    ///
    /// # Errors
    ///
    /// Returns a `Fault` classified per the module table.
    pub async fn list(&self) -> Result<TaskListReply> {
        let response = self
            .bounded("ListTasks", None, self.rpc.list_tasks(ListTasksRequest {}))
            .await?;

        tracing::debug!(count = response.tasks.len(), "Listed tasks");
        Ok(TaskListReply {
            tasks: response.tasks,
            message: response.message,
        })
    }

    /// Get one task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the backend reports absence, either by status or
    /// by answering with an empty record.
    pub async fn get(&self, id: TaskId) -> Result<TaskReply> {
        let response = self
            .bounded("GetTask", Some(id), self.rpc.get_task(GetTaskRequest { id }))
            .await?;

        match response.task {
            Some(task) if !task.id.is_unset() => Ok(TaskReply {
                task,
                message: response.message,
            }),
            _ => {
                tracing::debug!(task_id = %id, "GetTask answered with an empty record");
                Err(not_found(id))
            }
        }
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task does not exist.
    pub async fn update(&self, id: TaskId, changes: TaskChanges) -> Result<TaskReply> {
        let request = UpdateTaskRequest {
            id,
            title: changes.title,
            description: changes.description,
            status: changes.status,
        };
        let response = self
            .bounded("UpdateTask", Some(id), self.rpc.update_task(request))
            .await?;

        match response.task {
            Some(task) if !task.id.is_unset() => {
                tracing::info!(task_id = %id, status = %task.status, "Task updated");
                Ok(TaskReply {
                    task,
                    message: response.message,
                })
            }
            _ => Err(not_found(id)),
        }
    }

    /// Delete a task, returning the backend's message.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, with the backend message embedded, when the
    /// backend reports the delete did not happen.
    pub async fn delete(&self, id: TaskId) -> Result<String> {
        let response = self
            .bounded("DeleteTask", Some(id), self.rpc.delete_task(DeleteTaskRequest { id }))
            .await?;

        if response.success {
            tracing::info!(task_id = %id, "Task deleted");
            Ok(response.message)
        } else {
            tracing::warn!(task_id = %id, message = %response.message, "DeleteTask reported failure");
            Err(Fault::not_found(format!(
                "Task with ID {id} not found: {}",
                response.message
            )))
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        id: Option<TaskId>,
        call: impl Future<Output = RpcResult<T>>,
    ) -> Result<T> {
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RpcError::Timeout),
        };

        outcome.map_err(|err| {
            let fault = classify(&err, id, self.timeout);
            tracing::error!(
                operation,
                task_id = ?id.map(TaskId::get),
                error = %err,
                category = %fault.category,
                "Task service call failed"
            );
            fault
        })
    }
}

fn not_found(id: TaskId) -> Fault {
    Fault::not_found(format!("Task with ID {id} not found."))
}

/// Map a native RPC error to a fault.
#[must_use]
pub fn classify(err: &RpcError, id: Option<TaskId>, timeout: Duration) -> Fault {
    match err {
        RpcError::Connect(detail) => {
            Fault::unavailable(format!("{TASK_SERVICE} is unreachable: {detail}"))
        }
        RpcError::Timeout => Fault::unavailable(format!(
            "{TASK_SERVICE} did not respond within {timeout:?}"
        )),
        RpcError::Status {
            code: RpcCode::NotFound,
            message,
        } => match id {
            Some(id) if message.is_empty() => not_found(id),
            _ => Fault::not_found(message.clone()),
        },
        RpcError::Status {
            code: code @ (RpcCode::Unavailable | RpcCode::DeadlineExceeded),
            message,
        } => Fault::unavailable(format!("{TASK_SERVICE} is unavailable ({code}): {message}")),
        RpcError::Status { code, message } => {
            Fault::protocol(format!("{TASK_SERVICE} returned {code}: {message}"))
        }
        RpcError::Decode(detail) => Fault::protocol(format!(
            "{TASK_SERVICE} sent a malformed response: {detail}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use relay_core::FaultCategory;

    use super::*;
    use crate::task_rpc::{
        CreateTaskResponse, DeleteTaskResponse, GetTaskResponse, ListTasksResponse,
        UpdateTaskResponse,
    };

    /// What every call on the scripted transport yields.
    #[derive(Clone)]
    enum Script {
        Fail(RpcError),
        EmptyRecord,
        Hang,
        Deleted(bool),
    }

    struct ScriptedRpc(Script);

    fn sample(id: i64) -> Task {
        Task {
            id: TaskId::new(id),
            title: "t".into(),
            description: "d".into(),
            status: "pendente".into(),
            created_by: "c".into(),
        }
    }

    impl ScriptedRpc {
        async fn outcome<T>(&self, ok: T) -> RpcResult<T> {
            match &self.0 {
                Script::Fail(err) => Err(err.clone()),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(ok)
                }
                Script::EmptyRecord | Script::Deleted(_) => Ok(ok),
            }
        }

        fn task(&self) -> Option<Task> {
            match self.0 {
                Script::EmptyRecord => Some(Task::default()),
                _ => Some(sample(1)),
            }
        }
    }

    #[async_trait]
    impl TaskRpc for ScriptedRpc {
        async fn create_task(&self, _: CreateTaskRequest) -> RpcResult<CreateTaskResponse> {
            let task = self.task();
            self.outcome(CreateTaskResponse {
                task,
                message: "created".into(),
            })
            .await
        }

        async fn list_tasks(&self, _: ListTasksRequest) -> RpcResult<ListTasksResponse> {
            self.outcome(ListTasksResponse::default()).await
        }

        async fn get_task(&self, _: GetTaskRequest) -> RpcResult<GetTaskResponse> {
            let task = self.task();
            self.outcome(GetTaskResponse {
                task,
                message: String::new(),
            })
            .await
        }

        async fn update_task(&self, _: UpdateTaskRequest) -> RpcResult<UpdateTaskResponse> {
            let task = self.task();
            self.outcome(UpdateTaskResponse {
                task,
                message: String::new(),
            })
            .await
        }

        async fn delete_task(&self, _: DeleteTaskRequest) -> RpcResult<DeleteTaskResponse> {
            let success = matches!(self.0, Script::Deleted(true));
            self.outcome(DeleteTaskResponse {
                success,
                message: "no such task".into(),
            })
            .await
        }
    }

    fn client(script: Script) -> TaskClient<ScriptedRpc> {
        TaskClient::new(Arc::new(ScriptedRpc(script)), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn connection_failure_is_unavailable_for_every_operation() {
        let c = client(Script::Fail(RpcError::Connect("refused".into())));
        let id = TaskId::new(1);
        let faults = [
            c.create(NewTask::default()).await.unwrap_err(),
            c.list().await.unwrap_err(),
            c.get(id).await.unwrap_err(),
            c.update(id, TaskChanges::default()).await.unwrap_err(),
            c.delete(id).await.unwrap_err(),
        ];
        for fault in faults {
            assert_eq!(fault.category, FaultCategory::BackendUnavailable);
            assert!(fault.detail.contains(TASK_SERVICE));
        }
    }

    #[tokio::test]
    async fn not_found_status_maps_to_not_found() {
        let c = client(Script::Fail(RpcError::status(RpcCode::NotFound, "")));
        let fault = c.get(TaskId::new(9999)).await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::NotFound);
        assert_eq!(fault.detail, "Task with ID 9999 not found.");
    }

    #[tokio::test]
    async fn empty_record_maps_to_not_found() {
        let c = client(Script::EmptyRecord);
        let fault = c.get(TaskId::new(9999)).await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::NotFound);
        assert_eq!(fault.detail, "Task with ID 9999 not found.");
    }

    #[tokio::test]
    async fn empty_create_is_protocol_fault() {
        let c = client(Script::EmptyRecord);
        let fault = c.create(NewTask::default()).await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::BackendProtocolFault);
    }

    #[tokio::test]
    async fn other_status_is_protocol_fault() {
        let c = client(Script::Fail(RpcError::status(RpcCode::Internal, "boom")));
        let fault = c.list().await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::BackendProtocolFault);
        assert!(fault.detail.contains("INTERNAL"));
    }

    #[tokio::test]
    async fn unavailable_status_is_unavailable() {
        let c = client(Script::Fail(RpcError::status(RpcCode::Unavailable, "draining")));
        let fault = c.list().await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::BackendUnavailable);
    }

    #[tokio::test]
    async fn failed_delete_embeds_backend_message() {
        let c = client(Script::Deleted(false));
        let fault = c.delete(TaskId::new(3)).await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::NotFound);
        assert!(fault.detail.contains("no such task"));

        let c = client(Script::Deleted(true));
        assert!(c.delete(TaskId::new(3)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out_as_unavailable() {
        let c = client(Script::Hang);
        let fault = c.get(TaskId::new(1)).await.unwrap_err();
        assert_eq!(fault.category, FaultCategory::BackendUnavailable);
        assert!(fault.detail.contains("within 5s"));
    }

    #[test]
    fn decode_error_is_protocol_fault() {
        let fault = classify(
            &RpcError::Decode("eof".into()),
            None,
            Duration::from_secs(5),
        );
        assert_eq!(fault.http_status_code(), 502);
    }
}
