//! `tasklist`: ordered project task lists kept in step with a remote store.
//!
//! The engine lives in [`tasks`]: an ordered list with optimistic local
//! reordering, a drag gesture state machine, a single-slot edit session, and
//! the per-project coordinator that round-trips every other mutation through
//! a [`store::RemoteTaskStore`]. [`app`] is the boundary a presentation layer
//! talks to, and [`shell`] is the line interface the binary runs.

pub mod app;
pub mod config;
pub mod shell;
pub mod store;
pub mod tasks;
