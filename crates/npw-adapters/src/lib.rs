//! Infrastructure adapters for npw.
//!
//! This crate implements the ports defined in `npw-core`: the environment
//! probes behind the validation engine, recents storage, and the project
//! generator. It contains all external dependencies and I/O operations.

pub mod generator;
pub mod project_query;
pub mod recents;

// Re-export commonly used adapters
pub use generator::FlutterCreateGenerator;
pub use project_query::{LocalProjectQuery, MemoryProjectQuery};
pub use recents::{FileRecentsStore, MemoryRecentsStore};
