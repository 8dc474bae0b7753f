//! Taskboard: work-tracking core with derived task status.
//!
//! This crate manages a three-level hierarchy — projects, tasks, and to-do
//! items — persisted in a remote document store, and derives an aggregate
//! completion status for each task from the completion state of its to-dos.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure records and the classification rule, with no
//!   infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory,
//!   `PostgreSQL`)
//!
//! # Modules
//!
//! - [`domain`]: Records, identifiers, and the derived-status rule
//! - [`ports`]: The [`ports::DocumentStore`] persistence contract
//! - [`adapters`]: In-memory and `PostgreSQL` store implementations
//! - [`repositories`]: Typed per-entity repositories over the store port
//! - [`services`]: The status aggregation pipeline

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod repositories;
pub mod services;

#[cfg(test)]
mod tests;
