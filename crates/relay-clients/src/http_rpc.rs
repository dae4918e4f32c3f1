//! HTTP/JSON transport for the task RPC contract.
//!
//! Each call is `POST {base_url}/rpc/TaskService/{Operation}` with the JSON
//! request record. A 200 carries the response record; any other status
//! carries `{"code": "NOT_FOUND", "message": "..."}`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{RpcCode, RpcError, RpcResult};
use crate::task_rpc::{
    CreateTaskRequest, CreateTaskResponse, DeleteTaskRequest, DeleteTaskResponse,
    GetTaskRequest, GetTaskResponse, ListTasksRequest, ListTasksResponse, TaskRpc,
    UpdateTaskRequest, UpdateTaskResponse,
};

const SERVICE_PATH: &str = "rpc/TaskService";

/// Error body returned by the task backend.
#[derive(Debug, Deserialize)]
struct StatusBody {
    code: RpcCode,
    #[serde(default)]
    message: String,
}

/// HTTP client for the task backend.
#[derive(Debug, Clone)]
pub struct HttpTaskRpc {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskRpc {
    /// Create a transport that reuses a pooled reqwest client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the task service (e.g., "http://tasks:50051")
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL of the task service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/{SERVICE_PATH}/{method}",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn call<Req, Resp>(&self, method: &'static str, request: &Req) -> RpcResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.method_url(method);
        tracing::debug!(method, url = %url, "Calling task service");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Resp>()
                .await
                .map_err(|e| RpcError::Decode(format!("{method}: {e}")));
        }

        let body = response.json::<StatusBody>().await.map_err(|_| {
            RpcError::status(
                RpcCode::Unknown,
                format!("task service returned HTTP {status}"),
            )
        })?;

        tracing::debug!(method, code = %body.code, message = %body.message, "Task service returned error status");
        Err(RpcError::status(body.code, body.message))
    }
}

fn transport_error(err: reqwest::Error) -> RpcError {
    if err.is_timeout() {
        RpcError::Timeout
    } else {
        RpcError::Connect(err.to_string())
    }
}

#[async_trait]
impl TaskRpc for HttpTaskRpc {
    async fn create_task(&self, request: CreateTaskRequest) -> RpcResult<CreateTaskResponse> {
        self.call("CreateTask", &request).await
    }

    async fn list_tasks(&self, request: ListTasksRequest) -> RpcResult<ListTasksResponse> {
        self.call("ListTasks", &request).await
    }

    async fn get_task(&self, request: GetTaskRequest) -> RpcResult<GetTaskResponse> {
        self.call("GetTask", &request).await
    }

    async fn update_task(&self, request: UpdateTaskRequest) -> RpcResult<UpdateTaskResponse> {
        self.call("UpdateTask", &request).await
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> RpcResult<DeleteTaskResponse> {
        self.call("DeleteTask", &request).await
    }
}
