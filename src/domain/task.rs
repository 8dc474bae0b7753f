//! Task record: the middle level of the work-tracking hierarchy.

use super::{ProjectId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task owned by a project.
///
/// The stored `status` field is a free-form, user-editable label. It is
/// decoupled from the derived completion status computed from the task's
/// to-do items and is never overwritten by the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    name: String,
    description: String,
    status: String,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Label stored when a task is created without an explicit status.
    pub const DEFAULT_STATUS: &'static str = "default";

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the stored free-form status label.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the illustration URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
