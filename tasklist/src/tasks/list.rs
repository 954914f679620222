//! Ordered task list with optimistic local reordering.

use tasklist_proto::task::{Task, TaskId};

use super::ListError;

/// What a presentation layer should render for the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    /// A round-trip is outstanding; show a spinner.
    Loading,
    /// Loaded, no tasks; show the "no tasks" affordance.
    Empty,
    /// Loaded tasks in display order.
    Populated(&'a [Task]),
}

/// The in-memory ordered task list of one project.
///
/// Starts out loading. [`load`](Self::load) replaces the whole sequence with
/// a canonical list from the store; [`local_reorder`](Self::local_reorder)
/// moves a task for immediate feedback and is overwritten by the next load.
#[derive(Debug, Clone, Default)]
pub struct OrderedTaskList {
    /// `None` while loading.
    tasks: Option<Vec<Task>>,
    /// The last loaded list, kept while loading so a failed round-trip can
    /// fall back to it.
    last_loaded: Option<Vec<Task>>,
}

impl OrderedTaskList {
    /// Creates a list in the loading state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: None,
            last_loaded: None,
        }
    }

    /// Replaces the entire list and leaves the loading state.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.last_loaded = None;
        self.tasks = Some(tasks);
    }

    /// Enters the loading state ahead of a round-trip.
    ///
    /// The current sequence, local reorders included, is remembered for
    /// [`restore`](Self::restore). Invalidating an already loading list
    /// keeps the earlier snapshot.
    pub fn invalidate(&mut self) {
        if let Some(tasks) = self.tasks.take() {
            self.last_loaded = Some(tasks);
        }
    }

    /// Leaves the loading state by reinstating the list held before
    /// [`invalidate`](Self::invalidate).
    ///
    /// Returns `false` (and stays loading) if nothing was ever loaded.
    pub fn restore(&mut self) -> bool {
        if self.tasks.is_some() {
            return true;
        }
        match self.last_loaded.take() {
            Some(tasks) => {
                self.tasks = Some(tasks);
                true
            }
            None => false,
        }
    }

    /// `true` between invalidation (or construction) and the next load.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.tasks.is_none()
    }

    /// Tasks in display order, or `None` while loading.
    #[must_use]
    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    /// Number of tasks, `0` while loading.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.as_ref().map_or(0, Vec::len)
    }

    /// `true` if loaded and holding no tasks, or loading.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The render state of the list.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        match self.tasks.as_deref() {
            None => ListView::Loading,
            Some([]) => ListView::Empty,
            Some(tasks) => ListView::Populated(tasks),
        }
    }

    /// Index of task `id` in display order.
    #[must_use]
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.as_ref()?.iter().position(|t| &t.id == id)
    }

    /// Task `id`, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.as_ref()?.iter().find(|t| &t.id == id)
    }

    /// Task at display index `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Task> {
        self.tasks.as_ref()?.get(index)
    }

    /// Moves the task at `from` so it ends up at `to`, shifting the tasks
    /// in between by one. Equal indices are a no-op.
    ///
    /// Local only: the store never sees this order.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Loading`] while loading, or
    /// [`ListError::OutOfBounds`] if either index is past the end.
    pub fn local_reorder(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        let tasks = self.tasks.as_mut().ok_or(ListError::Loading)?;
        let len = tasks.len();
        for index in [from, to] {
            if index >= len {
                return Err(ListError::OutOfBounds { index, len });
            }
        }
        if from != to {
            let task = tasks.remove(from);
            tasks.insert(to, task);
        }
        Ok(())
    }
}
