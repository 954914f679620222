//! Per-project coordinator between the local task list and a remote store.
//!
//! `ProjectTasks` owns the list, edit session, and drag controller of one
//! project. Drags stay local. Every other mutation invalidates the list,
//! round-trips to the store, and loads the canonical list it answers with,
//! discarding any local-only order.
//!
//! When a round-trip fails the list goes back to what it showed before the
//! request and the edit session keeps its draft.

use tasklist_proto::task::{ProjectId, Task, TaskId};

use super::drag::{DragGesture, DragReorderController, HoverOutcome, RowBounds};
use super::list::OrderedTaskList;
use super::session::{SubmitIntent, TaskEditSession};
use super::{DragError, SyncError};
use crate::store::{RemoteTaskStore, StoreResult};

/// What a submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft was blank; nothing was sent.
    Skipped,
    /// A task was created.
    Created,
    /// A task was renamed.
    Updated,
}

/// The task list of one project, kept in step with a [`RemoteTaskStore`].
///
/// Mutating operations take `&mut self`, so at most one round-trip per
/// project is in flight.
pub struct ProjectTasks<S> {
    project: ProjectId,
    store: S,
    list: OrderedTaskList,
    session: TaskEditSession,
    drag: DragReorderController,
}

impl<S: RemoteTaskStore> ProjectTasks<S> {
    /// Creates the coordinator for `project`. The list is loading until the
    /// first [`refresh`](Self::refresh).
    pub const fn new(project: ProjectId, store: S) -> Self {
        Self {
            project,
            store,
            list: OrderedTaskList::new(),
            session: TaskEditSession::new(),
            drag: DragReorderController::new(),
        }
    }

    /// The project this list belongs to.
    #[must_use]
    pub const fn project(&self) -> &ProjectId {
        &self.project
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The displayed list.
    #[must_use]
    pub const fn list(&self) -> &OrderedTaskList {
        &self.list
    }

    /// The name input session.
    #[must_use]
    pub const fn session(&self) -> &TaskEditSession {
        &self.session
    }

    /// The drag controller.
    #[must_use]
    pub const fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    // --- edit session ---

    /// Feeds typed text into the name input. Returns `false` if ignored.
    pub fn type_name(&mut self, text: &str) -> bool {
        self.session.set_draft_name(text)
    }

    /// Starts renaming task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnknownTask`] if `id` is not in the list.
    pub fn begin_edit(&mut self, id: &TaskId) -> Result<(), SyncError> {
        let task = self
            .list
            .get(id)
            .ok_or_else(|| SyncError::UnknownTask(id.clone()))?;
        self.session.begin_edit(task.id.clone(), &task.name);
        Ok(())
    }

    /// Abandons the current draft and returns to create mode.
    pub fn cancel_edit(&mut self) {
        self.session.start_create();
    }

    // --- drag ---

    /// Starts dragging the task at `index`.
    ///
    /// # Errors
    ///
    /// See [`DragReorderController::begin`].
    pub fn begin_drag(&mut self, index: usize) -> Result<DragGesture, DragError> {
        self.drag.begin(&self.list, index)
    }

    /// Feeds a hover event to the drag controller.
    ///
    /// # Errors
    ///
    /// See [`DragReorderController::hover`].
    pub fn drag_hover(
        &mut self,
        hover_index: usize,
        pointer_y: f32,
        row: RowBounds,
    ) -> Result<HoverOutcome, DragError> {
        self.drag.hover(&mut self.list, hover_index, pointer_y, row)
    }

    /// Ends the drag. The new order is not sent to the store.
    pub fn end_drag(&mut self) -> Option<DragGesture> {
        self.drag.end()
    }

    // --- store round-trips ---

    /// Loads the project's canonical list.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the store fails.
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        self.list.invalidate();
        let result = self.store.list_tasks(&self.project).await;
        self.settle("list", result)
    }

    /// Submits the name input: creates a task in create mode, renames the
    /// edited task in edit mode. A blank draft sends nothing.
    ///
    /// On success the draft is cleared and the session returns to create
    /// mode. On failure the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotLoaded`] when creating while the list is
    /// loading, or [`SyncError::Store`] if the store fails.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SyncError> {
        let Some(intent) = self.session.prepare_submit(self.list.len()) else {
            return Ok(SubmitOutcome::Skipped);
        };

        if matches!(intent, SubmitIntent::Create { .. }) && self.list.is_loading() {
            return Err(SyncError::NotLoaded);
        }

        self.list.invalidate();
        let (op, outcome, result) = match &intent {
            SubmitIntent::Create { name, priority } => {
                let result = self
                    .store
                    .create_task(&self.project, name, *priority)
                    .await;
                ("create", SubmitOutcome::Created, result)
            }
            SubmitIntent::Update { id, name } => {
                let result = self.store.update_task(&self.project, id, name).await;
                ("update", SubmitOutcome::Updated, result)
            }
        };

        self.settle(op, result)?;
        self.session.complete_submit();
        Ok(outcome)
    }

    /// Asks the store to flip task `id`, currently shown as `current`. The
    /// checkbox only changes once the store's list arrives.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the store fails.
    pub async fn toggle(&mut self, id: &TaskId, current: bool) -> Result<(), SyncError> {
        self.list.invalidate();
        let result = self.store.toggle_status(&self.project, id, current).await;
        self.settle("toggle", result)
    }

    /// Toggles task `id` using the status the list currently shows.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnknownTask`] if `id` is not in the list, or
    /// [`SyncError::Store`] if the store fails.
    pub async fn toggle_task(&mut self, id: &TaskId) -> Result<(), SyncError> {
        let current = self
            .list
            .get(id)
            .map(|t| t.status)
            .ok_or_else(|| SyncError::UnknownTask(id.clone()))?;
        self.toggle(id, current).await
    }

    /// Deletes task `id`. No confirmation, no optimistic removal.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the store fails.
    pub async fn delete(&mut self, id: &TaskId) -> Result<(), SyncError> {
        self.list.invalidate();
        let result = self.store.delete_task(&self.project, id).await;
        self.settle("delete", result)
    }

    /// Applies the outcome of a round-trip to the list.
    fn settle(&mut self, op: &'static str, result: StoreResult<Vec<Task>>) -> Result<(), SyncError> {
        match result {
            Ok(tasks) => {
                tracing::debug!(project_id = %self.project, op, count = tasks.len(), "loaded canonical list");
                self.list.load(tasks);
                Ok(())
            }
            Err(e) => {
                let restored = self.list.restore();
                tracing::debug!(project_id = %self.project, op, restored, error = %e, "round-trip failed");
                Err(e.into())
            }
        }
    }
}
