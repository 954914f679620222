//! In-process task store.
//!
//! Keeps one [`TaskTable`] per project behind a mutex, so it answers with
//! exactly the canonical lists `tasklist-server` would. Every request is
//! recorded, and failures can be queued to simulate a store that is down.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use tasklist_proto::table::{TableError, TaskTable};
use tasklist_proto::task::{ProjectId, Task, TaskId};

use super::{RemoteTaskStore, StoreError, StoreResult};

/// A request as received by [`InMemoryTaskStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    /// List a project's tasks.
    List {
        /// Target project.
        project: ProjectId,
    },
    /// Create a task.
    Create {
        /// Target project.
        project: ProjectId,
        /// Name as sent.
        name: String,
        /// Position hint as sent.
        priority: i64,
    },
    /// Rename a task.
    Update {
        /// Target project.
        project: ProjectId,
        /// Task being renamed.
        id: TaskId,
        /// Name as sent.
        name: String,
    },
    /// Flip a task's status.
    Toggle {
        /// Target project.
        project: ProjectId,
        /// Task being toggled.
        id: TaskId,
        /// Status the client saw before toggling.
        status: bool,
    },
    /// Delete a task.
    Delete {
        /// Target project.
        project: ProjectId,
        /// Task being deleted.
        id: TaskId,
    },
}

/// Task store living in process memory.
#[derive(Default)]
pub struct InMemoryTaskStore {
    projects: Mutex<HashMap<ProjectId, TaskTable>>,
    requests: Mutex<Vec<StoreRequest>>,
    failures: Mutex<VecDeque<StoreError>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose `project` already holds tasks named `names`,
    /// with priorities `1..=names.len()`.
    ///
    /// Names that fail validation are skipped.
    #[must_use]
    pub fn with_tasks(project: &ProjectId, names: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut projects = store.projects.lock();
            let table = projects.entry(project.clone()).or_default();
            for (name, priority) in names.iter().zip(1_i64..) {
                if let Err(e) = table.create(name, priority) {
                    tracing::warn!(name = %name, error = %e, "skipping invalid seed task");
                }
            }
        }
        store
    }

    /// Makes the next request fail with `error` instead of being applied.
    ///
    /// Queued failures are consumed in FIFO order, one per request.
    pub fn fail_next(&self, error: StoreError) {
        self.failures.lock().push_back(error);
    }

    /// Returns every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests.lock().clone()
    }

    /// Forgets recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    /// Returns the canonical task list of `project` without recording a
    /// request.
    #[must_use]
    pub fn snapshot(&self, project: &ProjectId) -> Vec<Task> {
        self.projects
            .lock()
            .get(project)
            .map(|t| t.tasks().to_vec())
            .unwrap_or_default()
    }

    fn handle(&self, request: StoreRequest) -> StoreResult<Vec<Task>> {
        self.requests.lock().push(request.clone());
        if let Some(error) = self.failures.lock().pop_front() {
            tracing::debug!(error = %error, "injected store failure");
            return Err(error);
        }

        let mut projects = self.projects.lock();
        let (project, outcome) = match request {
            StoreRequest::List { project } => (project, Ok(())),
            StoreRequest::Create {
                project,
                name,
                priority,
            } => {
                let table = projects.entry(project.clone()).or_default();
                let outcome = table.create(&name, priority).map(|_| ());
                (project, outcome)
            }
            StoreRequest::Update { project, id, name } => {
                let table = projects.entry(project.clone()).or_default();
                (project, table.rename(&id, &name))
            }
            StoreRequest::Toggle {
                project,
                id,
                status,
            } => {
                let table = projects.entry(project.clone()).or_default();
                (project, table.toggle_status(&id, status))
            }
            StoreRequest::Delete { project, id } => {
                let table = projects.entry(project.clone()).or_default();
                (project, table.remove(&id).map(|_| ()))
            }
        };
        outcome.map_err(rejection)?;

        Ok(projects
            .get(&project)
            .map(|t| t.tasks().to_vec())
            .unwrap_or_default())
    }
}

/// Maps a table refusal to the status code a server would answer with.
fn rejection(error: TableError) -> StoreError {
    let status = match error {
        TableError::InvalidName(_) => 400,
        TableError::TaskNotFound(_) => 404,
    };
    StoreError::Rejected {
        status,
        message: error.to_string(),
    }
}

impl RemoteTaskStore for InMemoryTaskStore {
    async fn list_tasks(&self, project: &ProjectId) -> StoreResult<Vec<Task>> {
        self.handle(StoreRequest::List {
            project: project.clone(),
        })
    }

    async fn create_task(
        &self,
        project: &ProjectId,
        name: &str,
        priority: i64,
    ) -> StoreResult<Vec<Task>> {
        self.handle(StoreRequest::Create {
            project: project.clone(),
            name: name.to_string(),
            priority,
        })
    }

    async fn update_task(
        &self,
        project: &ProjectId,
        id: &TaskId,
        name: &str,
    ) -> StoreResult<Vec<Task>> {
        self.handle(StoreRequest::Update {
            project: project.clone(),
            id: id.clone(),
            name: name.to_string(),
        })
    }

    async fn toggle_status(
        &self,
        project: &ProjectId,
        id: &TaskId,
        current: bool,
    ) -> StoreResult<Vec<Task>> {
        self.handle(StoreRequest::Toggle {
            project: project.clone(),
            id: id.clone(),
            status: current,
        })
    }

    async fn delete_task(&self, project: &ProjectId, id: &TaskId) -> StoreResult<Vec<Task>> {
        self.handle(StoreRequest::Delete {
            project: project.clone(),
            id: id.clone(),
        })
    }
}
