//! Drag gesture state machine.
//!
//! Turns a continuous stream of hover events into discrete moves on an
//! [`OrderedTaskList`]. A gesture follows the dragged task by id, so each
//! move continues from where the task currently sits rather than where the
//! drag started.
//!
//! A hover only moves the task once the pointer has crossed the hovered
//! row's midpoint in the direction of travel.

use tasklist_proto::task::TaskId;

use super::DragError;
use super::list::OrderedTaskList;

/// Vertical extent of a rendered row, in the pointer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    /// Top edge.
    pub top: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl RowBounds {
    /// Creates bounds from a row's top and bottom edges.
    #[must_use]
    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Distance from the top edge to the row's midpoint.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        (self.bottom - self.top) / 2.0
    }
}

/// An in-flight drag of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// The task being dragged.
    pub task_id: TaskId,
    /// Index the drag started from.
    pub origin: usize,
    /// Index the task occupies now.
    pub index: usize,
}

/// Controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging(DragGesture),
}

/// What a hover event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// No drag in progress; nothing to do.
    NotDragging,
    /// The pointer is over the dragged task itself.
    SameRow,
    /// The pointer has not crossed the hovered row's midpoint yet.
    Held,
    /// The dragged task moved.
    Moved {
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// The dragged task vanished from the list (it was replaced by a load);
    /// the gesture ended.
    Cancelled,
}

/// Drag-to-reorder state machine for one list.
#[derive(Debug, Clone, Default)]
pub struct DragReorderController {
    state: DragState,
}

impl DragReorderController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// The active gesture, if any.
    #[must_use]
    pub const fn gesture(&self) -> Option<&DragGesture> {
        match &self.state {
            DragState::Dragging(gesture) => Some(gesture),
            DragState::Idle => None,
        }
    }

    /// `true` if `task_id` is the task being dragged.
    #[must_use]
    pub fn is_dragging(&self, task_id: &TaskId) -> bool {
        self.gesture().is_some_and(|g| &g.task_id == task_id)
    }

    /// Starts dragging the task at `index`, returning the new gesture.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] if a gesture is active, or a
    /// [`DragError::List`] error if the list is loading or `index` is out of
    /// range.
    pub fn begin(
        &mut self,
        list: &OrderedTaskList,
        index: usize,
    ) -> Result<DragGesture, DragError> {
        if let DragState::Dragging(_) = self.state {
            return Err(DragError::AlreadyDragging);
        }
        let tasks = list.tasks().ok_or(super::ListError::Loading)?;
        let task = tasks.get(index).ok_or(super::ListError::OutOfBounds {
            index,
            len: tasks.len(),
        })?;

        tracing::trace!(task_id = %task.id, index, "drag started");
        let gesture = DragGesture {
            task_id: task.id.clone(),
            origin: index,
            index,
        };
        self.state = DragState::Dragging(gesture.clone());
        Ok(gesture)
    }

    /// Handles the pointer hovering over row `hover_index` at vertical
    /// position `pointer_y`, where `row` is that row's extent.
    ///
    /// Dragging downward moves the task once the pointer is at or below the
    /// row's midpoint; dragging upward, once it is at or above it.
    ///
    /// # Errors
    ///
    /// Returns a [`DragError::List`] error if `hover_index` is out of range.
    pub fn hover(
        &mut self,
        list: &mut OrderedTaskList,
        hover_index: usize,
        pointer_y: f32,
        row: RowBounds,
    ) -> Result<HoverOutcome, DragError> {
        let Some(task_id) = self.gesture().map(|g| g.task_id.clone()) else {
            return Ok(HoverOutcome::NotDragging);
        };
        let Some(drag_index) = list.position(&task_id) else {
            tracing::debug!(task_id = %task_id, "dragged task left the list, ending drag");
            self.state = DragState::Idle;
            return Ok(HoverOutcome::Cancelled);
        };
        self.set_index(drag_index);

        if drag_index == hover_index {
            return Ok(HoverOutcome::SameRow);
        }
        if hover_index >= list.len() {
            return Err(super::ListError::OutOfBounds {
                index: hover_index,
                len: list.len(),
            }
            .into());
        }

        let hover_y = pointer_y - row.top;
        let middle = row.half_height();
        if drag_index < hover_index && hover_y < middle {
            return Ok(HoverOutcome::Held);
        }
        if drag_index > hover_index && hover_y > middle {
            return Ok(HoverOutcome::Held);
        }

        list.local_reorder(drag_index, hover_index)?;
        self.set_index(hover_index);
        tracing::trace!(task_id = %task_id, from = drag_index, to = hover_index, "drag moved task");
        Ok(HoverOutcome::Moved {
            from: drag_index,
            to: hover_index,
        })
    }

    /// Ends the gesture, returning it. No request is made to the store.
    pub fn end(&mut self) -> Option<DragGesture> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(gesture) => {
                tracing::trace!(
                    task_id = %gesture.task_id,
                    origin = gesture.origin,
                    index = gesture.index,
                    "drag ended"
                );
                Some(gesture)
            }
            DragState::Idle => None,
        }
    }

    fn set_index(&mut self, index: usize) {
        if let DragState::Dragging(gesture) = &mut self.state {
            gesture.index = index;
        }
    }
}
