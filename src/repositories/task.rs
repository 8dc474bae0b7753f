//! Task repository: typed CRUD over the `tasks` collection.

use super::{RepositoryResult, decode_record};
use crate::domain::{DomainError, ProjectId, Task, TaskId};
use crate::ports::{DocumentStore, FieldMap, Filter, ListOrder};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

const COLLECTION: &str = "tasks";
const ENTITY: &str = "task";

/// Payload for creating a task under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    name: String,
    description: String,
    status: String,
    due_date: Option<NaiveDate>,
    image_url: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    ///
    /// The stored status label defaults to [`Task::DEFAULT_STATUS`]; due
    /// date and illustration URL default to absent.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: description.into(),
            status: Task::DEFAULT_STATUS.to_owned(),
            due_date: None,
            image_url: None,
        }
    }

    /// Sets the free-form status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the illustration URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    fn into_fields(self) -> Result<FieldMap, DomainError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::EmptyTaskName);
        }

        let mut fields = FieldMap::new();
        fields.insert(
            "projectId".to_owned(),
            Value::String(self.project_id.to_string()),
        );
        fields.insert("name".to_owned(), Value::String(name));
        fields.insert("description".to_owned(), Value::String(self.description));
        fields.insert("status".to_owned(), Value::String(self.status));
        fields.insert(
            "dueDate".to_owned(),
            self.due_date
                .map_or(Value::Null, |date| Value::String(date.to_string())),
        );
        fields.insert(
            "imageUrl".to_owned(),
            self.image_url.map_or(Value::Null, Value::String),
        );
        Ok(fields)
    }
}

/// Typed repository for task records.
#[derive(Debug)]
pub struct TaskRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for TaskRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> TaskRepository<S>
where
    S: DocumentStore,
{
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a task and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation failure for an empty name, or the store fault
    /// when the write fails.
    pub async fn create(&self, request: CreateTaskRequest) -> RepositoryResult<TaskId> {
        let fields = request.into_fields()?;
        let id = self.store.insert(COLLECTION, fields).await?;
        Ok(TaskId::from_uuid(id))
    }

    /// Lists the project's tasks, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns the store fault when the query fails, or a decode error for
    /// a malformed stored record.
    pub async fn list_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Task>> {
        let filters = [Filter::equals(
            "projectId",
            Value::String(project_id.to_string()),
        )];
        let documents = self
            .store
            .list(COLLECTION, &filters, Some(ListOrder::CreatedAtDesc))
            .await?;
        documents
            .into_iter()
            .map(|document| decode_record(ENTITY, document))
            .collect()
    }

    /// Reads a single task; `Ok(None)` when the identifier is absent.
    ///
    /// # Errors
    ///
    /// Returns the store fault when the read fails, or a decode error for
    /// a malformed stored record.
    pub async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let document = self.store.get(COLLECTION, id.into_inner()).await?;
        document
            .map(|found| decode_record(ENTITY, found))
            .transpose()
    }
}
