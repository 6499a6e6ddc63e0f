//! Project lifecycle management.
//!
//! A project is a uniquely named container of tasks. Creation is bounded by a
//! configured project count, names are unique across live projects, and
//! deleting a project removes every task it owns. The module follows the
//! crate's hexagonal layout:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Storage adapters live in [`crate::store`] because the in-memory arena and
//! the relational schema are shared with tasks.

pub mod domain;
pub mod ports;
pub mod services;
