//! Sizecheck: File Size Change Check
//!
//! Single-shot check reporting whether a file's size changed since the previous
//! invocation. Each run compares the current size with the size recorded by the
//! last run, reports a verdict through the exit code, and records the new size.

pub mod check;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod store;
pub mod tooling;
pub mod types;
