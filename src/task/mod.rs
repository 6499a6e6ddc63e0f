//! Task lifecycle management.
//!
//! Tasks are titled work items with a status and an optional deadline. Each
//! task belongs to exactly one project and is created through that project,
//! which enforces the per-project task cap. The module follows the crate's
//! hexagonal layout:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
