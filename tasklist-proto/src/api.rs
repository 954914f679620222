//! Request and response bodies exchanged with a task store.
//!
//! Every operation answers with a [`TaskListResponse`] carrying the full,
//! canonically ordered task list of the project. Field names follow the
//! store's JSON conventions (`projectId`, `_id`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::task::{ProjectId, Task, TaskId};

/// Route for listing a project's tasks; append `/{projectId}`.
pub const LIST_TASKS_PATH: &str = "/tasks";
/// Route for creating a task.
pub const CREATE_TASK_PATH: &str = "/tasks";
/// Route for renaming a task.
pub const UPDATE_TASK_PATH: &str = "/update-task";
/// Route for flipping a task's status.
pub const TOGGLE_STATUS_PATH: &str = "/task-status";
/// Route for deleting a task; append `/{projectId}/{taskId}`.
pub const DELETE_TASK_PATH: &str = "/task";

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Owning project.
    pub project_id: ProjectId,
    /// Trimmed task name.
    pub name: String,
    /// Position hint, `len + 1` of the list the client saw.
    pub priority: i64,
}

/// Body of a rename request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Task being renamed.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Trimmed new name.
    pub name: String,
}

/// Body of a status toggle request.
///
/// `status` is the value the client currently shows; the store stores its
/// negation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStatusRequest {
    /// Owning project.
    pub project_id: ProjectId,
    /// Task being toggled.
    pub id: TaskId,
    /// Status before the toggle.
    pub status: bool,
}

/// Response to every task operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// The project's tasks in canonical order.
    pub tasks: Vec<Task>,
}

/// Error body returned by a store for a refused request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

impl TaskListResponse {
    /// Unwraps the task list, checking that no id appears twice.
    ///
    /// # Errors
    ///
    /// Returns the first repeated [`TaskId`].
    pub fn into_tasks(self) -> Result<Vec<Task>, TaskId> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if !seen.insert(&task.id) {
                return Err(task.id.clone());
            }
        }
        Ok(self.tasks)
    }
}

/// A route constant as a single URL path segment, without its leading `/`.
#[must_use]
pub fn route_segment(route: &'static str) -> &'static str {
    route.trim_start_matches('/')
}

/// Path segments of the list route for `project`.
///
/// Segments are unescaped; ids may contain any character, so callers must
/// percent-encode each one as a whole segment.
#[must_use]
pub fn list_tasks_segments(project: &ProjectId) -> [&str; 2] {
    [route_segment(LIST_TASKS_PATH), project.as_str()]
}

/// Path segments of the delete route for `task` in `project`. Unescaped, as
/// for [`list_tasks_segments`].
#[must_use]
pub fn delete_task_segments<'a>(project: &'a ProjectId, task: &'a TaskId) -> [&'a str; 3] {
    [route_segment(DELETE_TASK_PATH), project.as_str(), task.as_str()]
}
