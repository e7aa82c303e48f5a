//! Implementations of the [`ProjectQuery`] environment probe.
//!
//! [`ProjectQuery`]: npw_core::domain::ProjectQuery

pub mod local;
pub mod memory;

pub use local::LocalProjectQuery;
pub use memory::MemoryProjectQuery;
