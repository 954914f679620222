//! Task and project model.
//!
//! Identifiers are opaque strings: stores mint them, clients only compare
//! and echo them back. A [`Task`] serializes its id as `_id`, the field name
//! used by the task store's documents.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum task name length in characters, after trimming.
pub const MAX_TASK_NAME_LENGTH: usize = 19;

/// Opaque identifier of a task, unique within its project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier issued by a store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh, time-ordered identifier (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wraps a project identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A completable work item inside a project.
///
/// `priority` is a position hint assigned at creation time. The order a
/// client displays is the order of the list it received, not a re-sort on
/// this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-issued identifier.
    #[serde(rename = "_id")]
    pub id: TaskId,
    /// Display name, 1 to [`MAX_TASK_NAME_LENGTH`] characters.
    pub name: String,
    /// `true` once the task is done.
    pub status: bool,
    /// Position hint.
    pub priority: i64,
}

/// A named container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    #[serde(rename = "_id")]
    pub id: ProjectId,
    /// Display name.
    pub name: String,
}

/// Reasons a task name is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Nothing left after trimming.
    #[error("task name cannot be empty")]
    Empty,
    /// Longer than [`MAX_TASK_NAME_LENGTH`] characters after trimming.
    #[error("task name too long (max 19 characters)")]
    TooLong,
}

/// Returns `true` if `text` is short enough to be typed into a task name.
///
/// This is the bound applied while editing: the raw text, whitespace
/// included, must stay under 20 characters.
#[must_use]
pub fn fits_name_limit(text: &str) -> bool {
    text.chars().count() <= MAX_TASK_NAME_LENGTH
}

/// Trims `raw` and checks it is a valid task name.
///
/// # Errors
///
/// Returns [`NameError::Empty`] for blank input and [`NameError::TooLong`]
/// when the trimmed name exceeds [`MAX_TASK_NAME_LENGTH`] characters.
pub fn normalize_task_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if !fits_name_limit(name) {
        return Err(NameError::TooLong);
    }
    Ok(name.to_string())
}
