//! Application state and intent handling.
//!
//! [`App`] is the boundary between a presentation layer and the task engine.
//! Every user action arrives as an [`Intent`]; store failures end here and
//! are logged, never propagated to the caller.

use tasklist_proto::task::{ProjectId, TaskId};

use crate::store::RemoteTaskStore;
use crate::tasks::{DragError, ListView, ProjectTasks, RowBounds, SyncError, TaskEditSession};

/// A user action against the task list.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Reload the list from the store.
    Refresh,
    /// Replace the name input with the given text.
    Type(String),
    /// Start renaming a task.
    BeginEdit(TaskId),
    /// Drop the draft and go back to create mode.
    CancelEdit,
    /// Create or rename, depending on the session mode.
    Submit,
    /// Type the text and submit it. Over-long text is ignored and nothing is
    /// submitted.
    Enter(String),
    /// Flip a task's done status.
    Toggle(TaskId),
    /// Delete a task.
    Delete(TaskId),
    /// Pick up the row at this index.
    DragStart(usize),
    /// The pointer moved over a row while dragging.
    DragHover {
        /// Index of the hovered row.
        index: usize,
        /// Pointer position.
        pointer_y: f32,
        /// Bounds of the hovered row.
        row: RowBounds,
    },
    /// Release the dragged row.
    DragEnd,
}

/// What a presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct AppView<'a> {
    /// The list, or its loading/empty state.
    pub list: ListView<'a>,
    /// The name input.
    pub session: &'a TaskEditSession,
    /// Task currently being dragged, if any.
    pub dragging: Option<&'a TaskId>,
}

/// Main application state for one open project.
pub struct App<S> {
    tasks: ProjectTasks<S>,
}

impl<S: RemoteTaskStore> App<S> {
    /// Opens `project` on `store`. Call `dispatch(Intent::Refresh)` to load it.
    pub const fn new(project: ProjectId, store: S) -> Self {
        Self {
            tasks: ProjectTasks::new(project, store),
        }
    }

    /// The underlying engine.
    #[must_use]
    pub const fn tasks(&self) -> &ProjectTasks<S> {
        &self.tasks
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> AppView<'_> {
        AppView {
            list: self.tasks.list().view(),
            session: self.tasks.session(),
            dragging: self.tasks.drag().gesture().map(|g| &g.task_id),
        }
    }

    /// Applies one intent.
    pub async fn dispatch(&mut self, intent: Intent) {
        let project_id = self.tasks.project().clone();
        match intent {
            Intent::Refresh => {
                let result = self.tasks.refresh().await;
                report(&project_id, "refresh", result);
            }
            Intent::Type(text) => {
                self.type_name(&text);
            }
            Intent::BeginEdit(id) => {
                if let Err(e) = self.tasks.begin_edit(&id) {
                    tracing::debug!(project_id = %project_id, error = %e, "cannot edit");
                }
            }
            Intent::CancelEdit => self.tasks.cancel_edit(),
            Intent::Submit => {
                let result = self.tasks.submit().await;
                report(&project_id, "submit", result);
            }
            Intent::Enter(text) => {
                if self.type_name(&text) {
                    let result = self.tasks.submit().await;
                    report(&project_id, "submit", result);
                }
            }
            Intent::Toggle(id) => {
                let result = self.tasks.toggle_task(&id).await;
                report(&project_id, "toggle", result);
            }
            Intent::Delete(id) => {
                let result = self.tasks.delete(&id).await;
                report(&project_id, "delete", result);
            }
            Intent::DragStart(index) => {
                if let Err(e) = self.tasks.begin_drag(index) {
                    log_drag_rejection(&project_id, &e);
                }
            }
            Intent::DragHover {
                index,
                pointer_y,
                row,
            } => match self.tasks.drag_hover(index, pointer_y, row) {
                Ok(outcome) => tracing::trace!(project_id = %project_id, ?outcome, "drag hover"),
                Err(e) => log_drag_rejection(&project_id, &e),
            },
            Intent::DragEnd => {
                if let Some(gesture) = self.tasks.end_drag() {
                    tracing::debug!(
                        project_id = %project_id,
                        task_id = %gesture.task_id,
                        from = gesture.origin,
                        to = gesture.index,
                        "drag finished"
                    );
                }
            }
        }
    }

    /// Feeds text into the name input; `false` if it was ignored.
    fn type_name(&mut self, text: &str) -> bool {
        let accepted = self.tasks.type_name(text);
        if !accepted {
            tracing::debug!(project_id = %self.tasks.project(), "name input over length limit, ignored");
        }
        accepted
    }
}

/// Logs the failure of a store round-trip. Store failures are warnings;
/// local rejections are debug noise.
fn report<T>(project_id: &ProjectId, op: &'static str, result: Result<T, SyncError>) {
    match result {
        Ok(_) => {}
        Err(SyncError::Store(e)) => {
            tracing::warn!(project_id = %project_id, op, error = %e, "task store request failed");
        }
        Err(e) => tracing::debug!(project_id = %project_id, op, error = %e, "intent rejected"),
    }
}

fn log_drag_rejection(project_id: &ProjectId, e: &DragError) {
    tracing::debug!(project_id = %project_id, error = %e, "drag rejected");
}
