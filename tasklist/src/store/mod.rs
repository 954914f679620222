//! Remote task store port.
//!
//! Defines the [`RemoteTaskStore`] trait the engine round-trips every
//! persisted mutation through. Concrete implementations:
//! - [`memory::InMemoryTaskStore`]: in-process store with request recording
//!   and failure injection, for tests and offline runs
//! - [`http::HttpTaskStore`]: JSON-over-HTTP client for `tasklist-server`
//!   or any store speaking the same routes

pub mod http;
pub mod memory;

use std::future::Future;
use std::sync::Arc;

use tasklist_proto::task::{ProjectId, Task, TaskId};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of a store round-trip.
///
/// Every variant is a network failure from the engine's point of view: the
/// request did not produce a canonical list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or the connection broke.
    #[error("task store unreachable: {0}")]
    Unreachable(String),

    /// The store answered with a non-success status.
    #[error("task store rejected request ({status}): {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Reason given by the store.
        message: String,
    },

    /// The store answered with a body that is not a valid task list.
    #[error("invalid task store response: {0}")]
    Protocol(String),
}

/// A store holding the authoritative task list of each project.
///
/// Every operation answers with the project's full task list in canonical
/// order. Implementations guarantee the returned ids are unique.
pub trait RemoteTaskStore: Send + Sync {
    /// Fetches the task list of `project`.
    fn list_tasks(
        &self,
        project: &ProjectId,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;

    /// Creates a task named `name` with position hint `priority`.
    fn create_task(
        &self,
        project: &ProjectId,
        name: &str,
        priority: i64,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;

    /// Renames task `id`.
    fn update_task(
        &self,
        project: &ProjectId,
        id: &TaskId,
        name: &str,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;

    /// Asks the store to flip task `id`, whose status the caller sees as
    /// `current`.
    fn toggle_status(
        &self,
        project: &ProjectId,
        id: &TaskId,
        current: bool,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;

    /// Deletes task `id`.
    fn delete_task(
        &self,
        project: &ProjectId,
        id: &TaskId,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;
}

/// Lets several engines share one store.
impl<T: RemoteTaskStore> RemoteTaskStore for Arc<T> {
    fn list_tasks(
        &self,
        project: &ProjectId,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send {
        (**self).list_tasks(project)
    }

    fn create_task(
        &self,
        project: &ProjectId,
        name: &str,
        priority: i64,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send {
        (**self).create_task(project, name, priority)
    }

    fn update_task(
        &self,
        project: &ProjectId,
        id: &TaskId,
        name: &str,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send {
        (**self).update_task(project, id, name)
    }

    fn toggle_status(
        &self,
        project: &ProjectId,
        id: &TaskId,
        current: bool,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send {
        (**self).toggle_status(project, id, current)
    }

    fn delete_task(
        &self,
        project: &ProjectId,
        id: &TaskId,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send {
        (**self).delete_task(project, id)
    }
}
