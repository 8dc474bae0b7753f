//! To-do repository: typed CRUD over the `todoTasks` collection.

use super::{RepositoryResult, decode_record, missing_as_not_found};
use crate::domain::{DomainError, Priority, TaskId, TodoId, TodoItem};
use crate::ports::{DocumentStore, FieldMap, Filter};
use serde_json::Value;
use std::sync::Arc;

const COLLECTION: &str = "todoTasks";
const ENTITY: &str = "to-do";

/// Payload for creating a to-do item under a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoRequest {
    task_id: TaskId,
    priority: Priority,
    genre: String,
    name: String,
    is_finished: bool,
}

impl CreateTodoRequest {
    /// Creates a request with required to-do fields.
    ///
    /// The completion flag defaults to unfinished.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        priority: Priority,
        genre: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            task_id,
            priority,
            genre: genre.into(),
            name: name.into(),
            is_finished: false,
        }
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_finished(mut self, finished: bool) -> Self {
        self.is_finished = finished;
        self
    }

    fn into_fields(self) -> Result<FieldMap, DomainError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::EmptyTodoName);
        }

        let mut fields = FieldMap::new();
        fields.insert("taskId".to_owned(), Value::String(self.task_id.to_string()));
        fields.insert(
            "priority".to_owned(),
            Value::String(self.priority.as_str().to_owned()),
        );
        fields.insert("genre".to_owned(), Value::String(self.genre));
        fields.insert("name".to_owned(), Value::String(name));
        fields.insert("isFinish".to_owned(), Value::Bool(self.is_finished));
        Ok(fields)
    }
}

/// Typed repository for to-do records.
#[derive(Debug)]
pub struct TodoRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for TodoRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> TodoRepository<S>
where
    S: DocumentStore,
{
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a to-do item and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation failure for an empty name, or the store fault
    /// when the write fails.
    pub async fn create(&self, request: CreateTodoRequest) -> RepositoryResult<TodoId> {
        let fields = request.into_fields()?;
        let id = self.store.insert(COLLECTION, fields).await?;
        Ok(TodoId::from_uuid(id))
    }

    /// Lists the task's to-do items, unordered.
    ///
    /// # Errors
    ///
    /// Returns the store fault when the query fails, or a decode error for
    /// a malformed stored record.
    pub async fn list_by_task(&self, task_id: TaskId) -> RepositoryResult<Vec<TodoItem>> {
        let filters = [Filter::equals("taskId", Value::String(task_id.to_string()))];
        let documents = self.store.list(COLLECTION, &filters, None).await?;
        documents
            .into_iter()
            .map(|document| decode_record(ENTITY, document))
            .collect()
    }

    /// Sets the completion flag of a to-do item.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// for an absent identifier, or the store fault when the write fails.
    pub async fn set_finished(&self, id: TodoId, finished: bool) -> RepositoryResult<()> {
        let mut changes = FieldMap::new();
        changes.insert("isFinish".to_owned(), Value::Bool(finished));
        self.store
            .update(COLLECTION, id.into_inner(), changes)
            .await
            .map_err(missing_as_not_found(ENTITY))
    }

    /// Deletes a to-do item.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// for an absent identifier, or the store fault when the write fails.
    pub async fn delete(&self, id: TodoId) -> RepositoryResult<()> {
        self.store
            .delete(COLLECTION, id.into_inner())
            .await
            .map_err(missing_as_not_found(ENTITY))
    }
}
