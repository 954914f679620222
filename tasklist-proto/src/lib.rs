//! Shared model and wire definitions for `tasklist`.
//!
//! Clients and stores agree on three things: the task model in [`task`],
//! the request/response shapes in [`api`], and the canonical ordering of a
//! project's task list in [`table`].

pub mod api;
pub mod table;
pub mod task;
