//! Shared harness for gateway integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

use relay_clients::{
    CreateTaskRequest, CreateTaskResponse, DeleteTaskRequest, DeleteTaskResponse, GetTaskRequest,
    GetTaskResponse, ListTasksRequest, ListTasksResponse, RpcCode, RpcError, RpcResult,
    TaskClient, TaskRpc, UpdateTaskRequest, UpdateTaskResponse, UserClient,
};
use relay_core::{Task, TaskId};
use relay_gateway::{create_router, GatewayConfig, GatewayState};
use relay_store::UserRecordStore;

pub const BASE: &str = "http://gw.test";

/// How the fake task backend reports a missing task.
#[derive(Debug, Clone, Copy)]
pub enum Absence {
    /// A `NOT_FOUND` status.
    Status,
    /// A success carrying a zero-id record.
    EmptyRecord,
}

/// In-process task backend with the same semantics as the real one: ids from
/// 1, status `pendente` on create, empty update fields leave values as is.
pub struct InMemoryTaskRpc {
    state: Mutex<(i64, BTreeMap<i64, Task>)>,
    absence: Absence,
}

impl InMemoryTaskRpc {
    pub fn new(absence: Absence) -> Self {
        Self {
            state: Mutex::new((0, BTreeMap::new())),
            absence,
        }
    }

    fn missing<T>(&self, id: TaskId, empty: T) -> RpcResult<T> {
        match self.absence {
            Absence::Status => Err(RpcError::status(
                RpcCode::NotFound,
                format!("Task with ID {id} not found"),
            )),
            Absence::EmptyRecord => Ok(empty),
        }
    }
}

#[async_trait]
impl TaskRpc for InMemoryTaskRpc {
    async fn create_task(&self, request: CreateTaskRequest) -> RpcResult<CreateTaskResponse> {
        let mut state = self.state.lock();
        state.0 += 1;
        let id = state.0;
        let task = Task {
            id: TaskId::new(id),
            title: request.title,
            description: request.description,
            status: "pendente".to_string(),
            created_by: request.created_by,
        };
        state.1.insert(id, task.clone());
        Ok(CreateTaskResponse {
            task: Some(task),
            message: "Task created successfully!".to_string(),
        })
    }

    async fn list_tasks(&self, _: ListTasksRequest) -> RpcResult<ListTasksResponse> {
        let state = self.state.lock();
        Ok(ListTasksResponse {
            tasks: state.1.values().cloned().collect(),
            message: "Tasks listed successfully!".to_string(),
        })
    }

    async fn get_task(&self, request: GetTaskRequest) -> RpcResult<GetTaskResponse> {
        let found = self.state.lock().1.get(&request.id.get()).cloned();
        match found {
            Some(task) => Ok(GetTaskResponse {
                task: Some(task),
                message: "Task found successfully!".to_string(),
            }),
            None => self.missing(
                request.id,
                GetTaskResponse {
                    task: Some(Task::default()),
                    message: String::new(),
                },
            ),
        }
    }

    async fn update_task(&self, request: UpdateTaskRequest) -> RpcResult<UpdateTaskResponse> {
        let mut state = self.state.lock();
        let Some(task) = state.1.get_mut(&request.id.get()) else {
            return self.missing(request.id, UpdateTaskResponse::default());
        };
        if !request.title.is_empty() {
            task.title = request.title;
        }
        if !request.description.is_empty() {
            task.description = request.description;
        }
        if !request.status.is_empty() {
            task.status = request.status;
        }
        Ok(UpdateTaskResponse {
            task: Some(task.clone()),
            message: "Task updated successfully!".to_string(),
        })
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> RpcResult<DeleteTaskResponse> {
        let removed = self.state.lock().1.remove(&request.id.get()).is_some();
        Ok(if removed {
            DeleteTaskResponse {
                success: true,
                message: "Task deleted successfully!".to_string(),
            }
        } else {
            DeleteTaskResponse {
                success: false,
                message: "Task not found".to_string(),
            }
        })
    }
}

/// Start a user service on an ephemeral port and return its endpoint URL.
pub async fn spawn_user_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = relay_user_service::create_router(Arc::new(UserRecordStore::new()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// A URL nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

pub fn gateway<R: TaskRpc + 'static>(rpc: Arc<R>, user_service_url: &str) -> Router {
    let config = GatewayConfig {
        public_base_url: Some(BASE.to_string()),
        backend_timeout_seconds: 2,
        ..GatewayConfig::default()
    };
    let tasks = TaskClient::new(rpc, config.backend_timeout());
    let users = UserClient::new(
        reqwest::Client::new(),
        user_service_url,
        config.backend_timeout(),
    );
    create_router(GatewayState::new(tasks, users, config))
}

/// Gateway over an in-memory task backend and a live user service.
pub async fn app() -> Router {
    let users = spawn_user_service().await;
    gateway(Arc::new(InMemoryTaskRpc::new(Absence::Status)), &users)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
