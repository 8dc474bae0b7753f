//! Project repository: typed CRUD over the `projects` collection.

use super::{RepositoryResult, decode_record, missing_as_not_found};
use crate::domain::{DomainError, Project, ProjectId, UserId};
use crate::ports::{DocumentStore, FieldMap, Filter, ListOrder};
use serde_json::Value;
use std::sync::Arc;

const COLLECTION: &str = "projects";
const ENTITY: &str = "project";

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
    owner_id: String,
    contributors: Vec<String>,
}

impl CreateProjectRequest {
    /// Creates a request with required project fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            owner_id: owner_id.into(),
            contributors: Vec::new(),
        }
    }

    /// Sets the contributor references.
    #[must_use]
    pub fn with_contributors(mut self, contributors: impl IntoIterator<Item = String>) -> Self {
        self.contributors = contributors.into_iter().collect();
        self
    }

    fn into_fields(self) -> Result<FieldMap, DomainError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::EmptyProjectName);
        }
        let owner = UserId::new(self.owner_id)?;
        let contributors = validate_contributors(self.contributors)?;

        let mut fields = FieldMap::new();
        fields.insert("name".to_owned(), Value::String(name));
        fields.insert("description".to_owned(), Value::String(self.description));
        fields.insert(
            "ownerId".to_owned(),
            Value::String(owner.as_str().to_owned()),
        );
        fields.insert("contributors".to_owned(), contributor_values(&contributors));
        Ok(fields)
    }
}

/// Partial update payload for a project.
///
/// Only the fields set on the patch are written; everything else keeps its
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    name: Option<String>,
    description: Option<String>,
    contributors: Option<Vec<String>>,
}

impl ProjectPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the contributor set.
    #[must_use]
    pub fn with_contributors(mut self, contributors: impl IntoIterator<Item = String>) -> Self {
        self.contributors = Some(contributors.into_iter().collect());
        self
    }

    fn into_fields(self) -> Result<FieldMap, DomainError> {
        let mut fields = FieldMap::new();
        if let Some(name) = self.name {
            let trimmed = name.trim().to_owned();
            if trimmed.is_empty() {
                return Err(DomainError::EmptyProjectName);
            }
            fields.insert("name".to_owned(), Value::String(trimmed));
        }
        if let Some(description) = self.description {
            fields.insert("description".to_owned(), Value::String(description));
        }
        if let Some(contributors) = self.contributors {
            let contributors = validate_contributors(contributors)?;
            fields.insert("contributors".to_owned(), contributor_values(&contributors));
        }
        Ok(fields)
    }
}

/// Validates contributor references, deduplicating while preserving order.
fn validate_contributors(raw: Vec<String>) -> Result<Vec<UserId>, DomainError> {
    let mut contributors: Vec<UserId> = Vec::with_capacity(raw.len());
    for value in raw {
        let user = UserId::new(value)?;
        if !contributors.contains(&user) {
            contributors.push(user);
        }
    }
    Ok(contributors)
}

fn contributor_values(contributors: &[UserId]) -> Value {
    Value::Array(
        contributors
            .iter()
            .map(|user| Value::String(user.as_str().to_owned()))
            .collect(),
    )
}

/// Typed repository for project records.
#[derive(Debug)]
pub struct ProjectRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for ProjectRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ProjectRepository<S>
where
    S: DocumentStore,
{
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a project and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`](crate::domain::DomainError) failures for an
    /// empty name or invalid user references, or the store fault when the
    /// write fails.
    pub async fn create(&self, request: CreateProjectRequest) -> RepositoryResult<ProjectId> {
        let fields = request.into_fields()?;
        let id = self.store.insert(COLLECTION, fields).await?;
        Ok(ProjectId::from_uuid(id))
    }

    /// Lists every project, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns the store fault when the query fails, or a decode error for
    /// a malformed stored record.
    pub async fn list_all(&self) -> RepositoryResult<Vec<Project>> {
        let documents = self
            .store
            .list(COLLECTION, &[], Some(ListOrder::CreatedAtDesc))
            .await?;
        documents
            .into_iter()
            .map(|document| decode_record(ENTITY, document))
            .collect()
    }

    /// Lists projects owned by the given user, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns the store fault when the query fails, or a decode error for
    /// a malformed stored record.
    pub async fn list_by_owner(&self, owner: &UserId) -> RepositoryResult<Vec<Project>> {
        let filters = [Filter::equals(
            "ownerId",
            Value::String(owner.as_str().to_owned()),
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

    /// Lists projects that carry the given user in their contributor set.
    ///
    /// Unlike the other project listings, this query issues no ordering
    /// clause; callers needing a stable view sort the result themselves.
    ///
    /// # Errors
    ///
    /// Returns the store fault when the query fails, or a decode error for
    /// a malformed stored record.
    pub async fn list_by_contributor(&self, user: &UserId) -> RepositoryResult<Vec<Project>> {
        let filters = [Filter::contains(
            "contributors",
            Value::String(user.as_str().to_owned()),
        )];
        let documents = self.store.list(COLLECTION, &filters, None).await?;
        documents
            .into_iter()
            .map(|document| decode_record(ENTITY, document))
            .collect()
    }

    /// Applies a partial update to a project.
    ///
    /// # Errors
    ///
    /// Returns a validation failure for an invalid patch,
    /// [`RepositoryError::NotFound`](super::RepositoryError::NotFound) for
    /// an absent identifier, or the store fault when the write fails.
    pub async fn update(&self, id: ProjectId, patch: ProjectPatch) -> RepositoryResult<()> {
        let changes = patch.into_fields()?;
        self.store
            .update(COLLECTION, id.into_inner(), changes)
            .await
            .map_err(missing_as_not_found(ENTITY))
    }

    /// Deletes a project record.
    ///
    /// Tasks and to-dos under the project are left in place; there is no
    /// cascade.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// for an absent identifier, or the store fault when the write fails.
    pub async fn delete(&self, id: ProjectId) -> RepositoryResult<()> {
        self.store
            .delete(COLLECTION, id.into_inner())
            .await
            .map_err(missing_as_not_found(ENTITY))
    }
}
