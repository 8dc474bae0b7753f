//! Document-store port: the sole boundary for raw persistence I/O.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Loosely-typed field bag of a stored document.
pub type FieldMap = Map<String, Value>;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// A materialized document returned by read queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Document fields.
    pub fields: FieldMap,
}

impl Document {
    /// Merges the identifier and creation timestamp into the field bag,
    /// yielding the JSON value a typed record decodes from.
    #[must_use]
    pub fn into_record_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_owned(), Value::String(self.id.to_string()));
        fields.insert(
            "createdAt".to_owned(),
            Value::String(self.created_at.to_rfc3339()),
        );
        Value::Object(fields)
    }
}

/// Conjunctive query predicate over document fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The field holds exactly the given value.
    Equals {
        /// Field name.
        field: String,
        /// Expected value.
        value: Value,
    },
    /// The field holds an array containing the given value.
    Contains {
        /// Field name.
        field: String,
        /// Expected member.
        value: Value,
    },
}

impl Filter {
    /// Creates an equality predicate.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: Value) -> Self {
        Self::Equals {
            field: field.into(),
            value,
        }
    }

    /// Creates an array-membership predicate.
    #[must_use]
    pub fn contains(field: impl Into<String>, value: Value) -> Self {
        Self::Contains {
            field: field.into(),
            value,
        }
    }

    /// Returns the field the predicate applies to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::Contains { field, .. } => field,
        }
    }

    /// Returns the value the predicate compares against.
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Equals { value, .. } | Self::Contains { value, .. } => value,
        }
    }
}

/// Ordering applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Most recently created first.
    CreatedAtDesc,
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The document targeted by an update or delete does not exist.
    #[error("no document {id} in collection '{collection}'")]
    Missing {
        /// Collection that was addressed.
        collection: String,
        /// Identifier that was addressed.
        id: Uuid,
    },

    /// A predicate or ordering referenced a field the store cannot query.
    #[error("unqueryable field name: '{0}'")]
    InvalidFieldName(String),

    /// Backend failure: connectivity, permissions, or quota.
    #[error("store backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Builds a missing-document error.
    pub fn missing(collection: impl Into<String>, id: Uuid) -> Self {
        Self::Missing {
            collection: collection.into(),
            id,
        }
    }
}

/// Raw document persistence contract.
///
/// Implementations perform no retries; every backend fault propagates to
/// the caller.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document and returns its store-assigned identifier.
    ///
    /// The creation timestamp is stamped server-side; callers never supply
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Backend`] when the write fails.
    async fn insert(&self, collection: &str, fields: FieldMap) -> DocumentStoreResult<Uuid>;

    /// Lists documents matching every given predicate.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidFieldName`] for an unqueryable
    /// predicate field or [`DocumentStoreError::Backend`] when the query
    /// fails.
    async fn list(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<ListOrder>,
    ) -> DocumentStoreResult<Vec<Document>>;

    /// Reads a single document; `None` when the identifier is absent.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Backend`] when the read fails.
    async fn get(&self, collection: &str, id: Uuid) -> DocumentStoreResult<Option<Document>>;

    /// Merges the given fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Missing`] when the identifier is
    /// absent or [`DocumentStoreError::Backend`] when the write fails.
    async fn update(&self, collection: &str, id: Uuid, changes: FieldMap)
    -> DocumentStoreResult<()>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Missing`] when the identifier is
    /// absent or [`DocumentStoreError::Backend`] when the write fails.
    async fn delete(&self, collection: &str, id: Uuid) -> DocumentStoreResult<()>;
}
