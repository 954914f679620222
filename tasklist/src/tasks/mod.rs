//! Task list engine for one project.
//!
//! [`OrderedTaskList`] holds the displayed order, [`DragReorderController`]
//! reorders it locally from pointer events, [`TaskEditSession`] tracks the
//! name input, and [`ProjectTasks`] ties them to a remote store: every
//! persisted mutation round-trips and the store's canonical list replaces
//! the local one.

pub mod drag;
pub mod list;
pub mod session;
pub mod sync;

pub use drag::{DragGesture, DragReorderController, DragState, HoverOutcome, RowBounds};
pub use list::{ListView, OrderedTaskList};
pub use session::{EditMode, SubmitIntent, TaskEditSession};
pub use sync::{ProjectTasks, SubmitOutcome};

use tasklist_proto::task::TaskId;
use thiserror::Error;

use crate::store::StoreError;

/// Errors from local list operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ListError {
    /// The list is waiting for the store.
    #[error("task list is loading")]
    Loading,
    /// An index is past the end of the list.
    #[error("index {index} out of bounds for list of {len} tasks")]
    OutOfBounds {
        /// Offending index.
        index: usize,
        /// List length.
        len: usize,
    },
}

/// Errors from drag gestures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DragError {
    /// A drag is already in progress on this list.
    #[error("a drag is already in progress")]
    AlreadyDragging,
    /// The list refused the operation.
    #[error(transparent)]
    List(#[from] ListError),
}

/// Errors from store round-trips.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The store did not produce a canonical list.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Creating a task needs a loaded list to derive its priority.
    #[error("task list is not loaded")]
    NotLoaded,
    /// The task is not in the current list.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),
}
