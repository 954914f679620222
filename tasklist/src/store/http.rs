//! JSON-over-HTTP task store client.
//!
//! Speaks the routes in [`tasklist_proto::api`]: every call answers with a
//! `{ "tasks": [...] }` body, refusals carry `{ "error": "..." }`.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tasklist_proto::api::{
    self, CreateTaskRequest, ErrorResponse, TaskListResponse, ToggleStatusRequest,
    UpdateTaskRequest,
};
use tasklist_proto::task::{ProjectId, Task, TaskId};
use url::Url;

use super::{RemoteTaskStore, StoreError, StoreResult};

/// Task store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: Url,
}

impl HttpTaskStore {
    /// Creates a client for the store at `base_url` (e.g. `http://127.0.0.1:9400`).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The store's base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the route made of `segments`, appended to the base URL's path.
    ///
    /// Each segment is percent-encoded as a whole, so ids containing `/`,
    /// `?` or `#` stay a single segment. Empty, `.` and `..` segments cannot
    /// be addressed and are refused.
    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| matches!(**s, "" | "." | ".."))
        {
            return Err(StoreError::Protocol(format!(
                "id {bad:?} cannot be used in a route"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                StoreError::Protocol(format!("base url {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> StoreResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        Ok(self.client.request(method, url))
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        route: &'static str,
        body: &B,
    ) -> StoreResult<Vec<Task>> {
        let builder = self
            .request(Method::POST, &[api::route_segment(route)])?
            .json(body);
        send(builder).await
    }
}

/// Sends a request and decodes the canonical task list it answers with.
async fn send(builder: RequestBuilder) -> StoreResult<Vec<Task>> {
    let response = builder
        .send()
        .await
        .map_err(|e| StoreError::Unreachable(e.to_string()))?;
    decode(response).await
}

async fn decode(response: Response) -> StoreResult<Vec<Task>> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| StoreError::Unreachable(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&body).map_or_else(
            |_| String::from_utf8_lossy(&body).into_owned(),
            |e| e.error,
        );
        return Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: TaskListResponse =
        serde_json::from_slice(&body).map_err(|e| StoreError::Protocol(e.to_string()))?;
    parsed
        .into_tasks()
        .map_err(|id| StoreError::Protocol(format!("duplicate task id {id} in response")))
}

impl RemoteTaskStore for HttpTaskStore {
    async fn list_tasks(&self, project: &ProjectId) -> StoreResult<Vec<Task>> {
        let builder = self.request(Method::GET, &api::list_tasks_segments(project))?;
        send(builder).await
    }

    async fn create_task(
        &self,
        project: &ProjectId,
        name: &str,
        priority: i64,
    ) -> StoreResult<Vec<Task>> {
        let body = CreateTaskRequest {
            project_id: project.clone(),
            name: name.to_string(),
            priority,
        };
        self.post_json(api::CREATE_TASK_PATH, &body).await
    }

    async fn update_task(
        &self,
        project: &ProjectId,
        id: &TaskId,
        name: &str,
    ) -> StoreResult<Vec<Task>> {
        let body = UpdateTaskRequest {
            id: id.clone(),
            project_id: project.clone(),
            name: name.to_string(),
        };
        self.post_json(api::UPDATE_TASK_PATH, &body).await
    }

    async fn toggle_status(
        &self,
        project: &ProjectId,
        id: &TaskId,
        current: bool,
    ) -> StoreResult<Vec<Task>> {
        let body = ToggleStatusRequest {
            project_id: project.clone(),
            id: id.clone(),
            status: current,
        };
        self.post_json(api::TOGGLE_STATUS_PATH, &body).await
    }

    async fn delete_task(&self, project: &ProjectId, id: &TaskId) -> StoreResult<Vec<Task>> {
        let builder = self.request(Method::DELETE, &api::delete_task_segments(project, id))?;
        send(builder).await
    }
}
