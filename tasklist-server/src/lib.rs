//! `tasklist-server` library.
//!
//! An in-memory task store speaking the JSON routes `tasklist` clients use.
//! Exposed as a library so tests can run it in-process.

pub mod config;
pub mod server;
