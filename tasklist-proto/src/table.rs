//! Canonical ordering of one project's tasks.
//!
//! [`TaskTable`] is the authoritative side of the protocol: it applies the
//! store operations and keeps tasks sorted by ascending `priority`, with
//! ties broken by insertion order. Any store implementation answers
//! requests with [`TaskTable::to_response`].

use crate::api::TaskListResponse;
use crate::task::{NameError, Task, TaskId, normalize_task_name};

/// Errors returned by [`TaskTable`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The submitted name is not a valid task name.
    #[error(transparent)]
    InvalidName(#[from] NameError),
    /// No task with this id exists in the project.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// The ordered task list of a single project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    tasks: Vec<Task>,
}

impl TaskTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Returns the tasks in canonical order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Snapshot of the table as a store response.
    #[must_use]
    pub fn to_response(&self) -> TaskListResponse {
        TaskListResponse {
            tasks: self.tasks.clone(),
        }
    }

    /// Adds a new, not-done task with a freshly minted id.
    ///
    /// The task lands after every task whose priority is less than or equal
    /// to `priority`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidName`] if `name` is blank or too long.
    pub fn create(&mut self, name: &str, priority: i64) -> Result<&Task, TableError> {
        let name = normalize_task_name(name)?;
        let at = self.tasks.partition_point(|t| t.priority <= priority);
        self.tasks.insert(
            at,
            Task {
                id: TaskId::generate(),
                name,
                status: false,
                priority,
            },
        );
        Ok(&self.tasks[at])
    }

    /// Renames a task in place.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidName`] or [`TableError::TaskNotFound`].
    pub fn rename(&mut self, id: &TaskId, name: &str) -> Result<(), TableError> {
        let name = normalize_task_name(name)?;
        self.get_mut(id)?.name = name;
        Ok(())
    }

    /// Stores the negation of `current`, the status the client last saw.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TaskNotFound`] if the id is unknown.
    pub fn toggle_status(&mut self, id: &TaskId, current: bool) -> Result<(), TableError> {
        self.get_mut(id)?.status = !current;
        Ok(())
    }

    /// Removes a task, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TaskNotFound`] if the id is unknown.
    pub fn remove(&mut self, id: &TaskId) -> Result<Task, TableError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TableError::TaskNotFound(id.clone()))?;
        Ok(self.tasks.remove(idx))
    }

    fn get_mut(&mut self, id: &TaskId) -> Result<&mut Task, TableError> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TableError::TaskNotFound(id.clone()))
    }
}
