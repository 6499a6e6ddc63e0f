//! Storage adapters implementing the project and task repository ports.
//!
//! Both contexts share one adapter per backend: deleting a project must
//! remove its tasks, so the in-memory arena keeps them side by side and the
//! relational schema links them with a cascading foreign key.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
