//! Single-slot create-or-edit session for a project's task name input.

use tasklist_proto::task::{MAX_TASK_NAME_LENGTH, TaskId, fits_name_limit};

/// What the name input is for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Typing a new task.
    #[default]
    Create,
    /// Renaming an existing task.
    Edit(TaskId),
}

/// The store request a submit turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitIntent {
    /// Create a task at the end of the list.
    Create {
        /// Trimmed name.
        name: String,
        /// `len + 1` of the list at submit time.
        priority: i64,
    },
    /// Rename a task.
    Update {
        /// Task being renamed.
        id: TaskId,
        /// Trimmed name.
        name: String,
    },
}

/// The name input of one project and what it is editing.
///
/// Exactly one mode is active. The draft never exceeds
/// [`MAX_TASK_NAME_LENGTH`] characters: longer input is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditSession {
    mode: EditMode,
    draft: String,
}

impl TaskEditSession {
    /// Creates a session in create mode with an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: EditMode::Create,
            draft: String::new(),
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> &EditMode {
        &self.mode
    }

    /// Current draft, untrimmed.
    #[must_use]
    pub fn draft_name(&self) -> &str {
        &self.draft
    }

    /// `true` while renaming an existing task.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Edit(_))
    }

    /// Label of the submit action for the current mode.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.mode {
            EditMode::Create => "Add task",
            EditMode::Edit(_) => "Edit task",
        }
    }

    /// Returns to create mode with an empty draft.
    pub fn start_create(&mut self) {
        self.mode = EditMode::Create;
        self.draft.clear();
    }

    /// Replaces the draft with `text` as typed.
    ///
    /// Clearing the input while editing leaves edit mode. Text longer than
    /// [`MAX_TASK_NAME_LENGTH`] characters is ignored and `false` returned.
    pub fn set_draft_name(&mut self, text: &str) -> bool {
        if text.is_empty() && self.is_editing() {
            tracing::debug!("name cleared, leaving edit mode");
            self.start_create();
        }
        if !fits_name_limit(text) {
            return false;
        }
        text.clone_into(&mut self.draft);
        true
    }

    /// Switches to renaming `id`, prefilling the draft with its name.
    pub fn begin_edit(&mut self, id: TaskId, current_name: &str) {
        self.mode = EditMode::Edit(id);
        self.draft = current_name.chars().take(MAX_TASK_NAME_LENGTH).collect();
    }

    /// Builds the request a submit would send, given the current list
    /// length. Returns `None` if the draft is blank.
    #[must_use]
    pub fn prepare_submit(&self, list_len: usize) -> Option<SubmitIntent> {
        let name = self.draft.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        Some(match &self.mode {
            EditMode::Create => SubmitIntent::Create {
                name,
                priority: i64::try_from(list_len).map_or(i64::MAX, |n| n.saturating_add(1)),
            },
            EditMode::Edit(id) => SubmitIntent::Update {
                id: id.clone(),
                name,
            },
        })
    }

    /// Resets the session after the store accepted a submit.
    pub fn complete_submit(&mut self) {
        self.start_create();
    }
}
