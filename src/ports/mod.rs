//! Port contracts for persistence.
//!
//! Ports define infrastructure-agnostic interfaces; every higher layer
//! reaches storage through them.

pub mod store;

pub use store::{
    Document, DocumentStore, DocumentStoreError, DocumentStoreResult, FieldMap, Filter, ListOrder,
};
