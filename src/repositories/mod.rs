//! Typed entity repositories over the document-store port.
//!
//! Each repository validates write payloads before any store call and
//! decodes loosely-typed documents into structured records on the way out.
//! Absent records read through single-record lookups surface as `None`;
//! updates and deletes of absent records fail with
//! [`RepositoryError::NotFound`].

mod project;
mod task;
mod todo;

pub use project::{CreateProjectRequest, ProjectPatch, ProjectRepository};
pub use task::{CreateTaskRequest, TaskRepository};
pub use todo::{CreateTodoRequest, TodoRepository};

use crate::domain::DomainError;
use crate::ports::{Document, DocumentStoreError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors returned by repository operations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A write payload failed validation before reaching the store.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The record targeted by an update or delete does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind that was addressed.
        entity: &'static str,
        /// Identifier that was addressed.
        id: Uuid,
    },

    /// The store reported a fault.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),

    /// A stored document could not be decoded into its record type.
    #[error("stored {entity} record {id} failed to decode: {source}")]
    Decode {
        /// Entity kind that was read.
        entity: &'static str,
        /// Identifier of the offending document.
        id: Uuid,
        /// Underlying decode failure.
        source: Arc<serde_json::Error>,
    },
}

/// Decodes a materialized document into a typed record, logging and
/// re-raising on failure.
fn decode_record<T>(entity: &'static str, document: Document) -> RepositoryResult<T>
where
    T: DeserializeOwned,
{
    let id = document.id;
    serde_json::from_value(document.into_record_value()).map_err(|err| {
        tracing::warn!(entity, %id, error = %err, "stored record failed to decode");
        RepositoryError::Decode {
            entity,
            id,
            source: Arc::new(err),
        }
    })
}

/// Maps a store-level missing-document fault to the repository's
/// not-found error; every other fault passes through.
fn missing_as_not_found(
    entity: &'static str,
) -> impl FnOnce(DocumentStoreError) -> RepositoryError {
    move |err| match err {
        DocumentStoreError::Missing { id, .. } => RepositoryError::NotFound { entity, id },
        other => RepositoryError::Store(other),
    }
}
