//! HTTP task store: shared state, route handlers, and server startup.
//!
//! Each project is a [`TaskTable`] held in memory. Every route answers with
//! the project's full canonical list, or a JSON [`ErrorResponse`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tasklist_proto::api::{
    CREATE_TASK_PATH, CreateTaskRequest, DELETE_TASK_PATH, ErrorResponse, LIST_TASKS_PATH,
    TOGGLE_STATUS_PATH, TaskListResponse, ToggleStatusRequest, UPDATE_TASK_PATH,
    UpdateTaskRequest,
};
use tasklist_proto::table::{TableError, TaskTable};
use tasklist_proto::task::{ProjectId, TaskId};
use tokio::sync::RwLock;

use crate::config::DEFAULT_MAX_BODY_SIZE;

/// Shared server state: one task table per project.
pub struct ServerState {
    projects: RwLock<HashMap<ProjectId, TaskTable>>,
    max_body_size: usize,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Creates an empty store with the default body size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_body_size(DEFAULT_MAX_BODY_SIZE)
    }

    /// Creates an empty store accepting request bodies up to `max_body_size`
    /// bytes.
    #[must_use]
    pub fn with_max_body_size(max_body_size: usize) -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            max_body_size,
        }
    }

    /// Canonical list of `project`; empty if the project has no tasks yet.
    pub async fn list(&self, project: &ProjectId) -> TaskListResponse {
        let projects = self.projects.read().await;
        projects
            .get(project)
            .map(TaskTable::to_response)
            .unwrap_or_default()
    }

    /// Applies `op` to an existing project's table and returns its new list.
    async fn update<F>(
        &self,
        project: &ProjectId,
        id: &TaskId,
        op: F,
    ) -> Result<TaskListResponse, ApiError>
    where
        F: FnOnce(&mut TaskTable) -> Result<(), TableError>,
    {
        let mut projects = self.projects.write().await;
        let table = projects
            .get_mut(project)
            .ok_or_else(|| ApiError::from(TableError::TaskNotFound(id.clone())))?;
        op(table)?;
        Ok(table.to_response())
    }
}

/// A refused request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The table rejected the operation.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Table(TableError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            Self::Table(TableError::TaskNotFound(_)) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request refused");
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult = Result<Json<TaskListResponse>, ApiError>;

async fn list_tasks(
    State(state): State<Arc<ServerState>>,
    Path(project_id): Path<ProjectId>,
) -> Json<TaskListResponse> {
    Json(state.list(&project_id).await)
}

async fn create_task(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult {
    let mut projects = state.projects.write().await;
    let table = projects.entry(req.project_id.clone()).or_default();
    let task = table.create(&req.name, req.priority)?;
    tracing::info!(
        project_id = %req.project_id,
        task_id = %task.id,
        priority = req.priority,
        "task created"
    );
    Ok(Json(table.to_response()))
}

async fn update_task(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult {
    let response = state
        .update(&req.project_id, &req.id, |table| table.rename(&req.id, &req.name))
        .await?;
    tracing::info!(project_id = %req.project_id, task_id = %req.id, "task renamed");
    Ok(Json(response))
}

async fn toggle_status(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ToggleStatusRequest>,
) -> ApiResult {
    let response = state
        .update(&req.project_id, &req.id, |table| {
            table.toggle_status(&req.id, req.status)
        })
        .await?;
    tracing::info!(
        project_id = %req.project_id,
        task_id = %req.id,
        status = !req.status,
        "task status set"
    );
    Ok(Json(response))
}

async fn delete_task(
    State(state): State<Arc<ServerState>>,
    Path((project_id, task_id)): Path<(ProjectId, TaskId)>,
) -> ApiResult {
    let response = state
        .update(&project_id, &task_id, |table| table.remove(&task_id).map(drop))
        .await?;
    tracing::info!(project_id = %project_id, task_id = %task_id, "task deleted");
    Ok(Json(response))
}

/// Builds the router for `state`.
pub fn router(state: Arc<ServerState>) -> Router {
    let max_body_size = state.max_body_size;
    Router::new()
        .route(&format!("{LIST_TASKS_PATH}/{{project_id}}"), get(list_tasks))
        .route(CREATE_TASK_PATH, post(create_task))
        .route(UPDATE_TASK_PATH, post(update_task))
        .route(TOGGLE_STATUS_PATH, post(toggle_status))
        .route(
            &format!("{DELETE_TASK_PATH}/{{project_id}}/{{task_id}}"),
            delete(delete_task),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}

/// Starts the server on the given address and returns the bound address
/// and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(ServerState::new())).await
}

/// Starts the server with a pre-configured [`ServerState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ServerState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task server error");
        }
    });

    Ok((bound_addr, handle))
}

/// Starts the server in-process on `127.0.0.1:0` for testing.
#[cfg(test)]
pub async fn start_test_server() -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server")
}
