//! Project record and access-set membership.

use super::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project: the top level of the work-tracking hierarchy.
///
/// Decoded from the `projects` collection; identifiers and creation
/// timestamps are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    owner_id: UserId,
    #[serde(default)]
    contributors: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning user reference.
    #[must_use]
    pub const fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Returns the contributor references.
    #[must_use]
    pub fn contributors(&self) -> &[UserId] {
        &self.contributors
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the user belongs to the project's access set.
    ///
    /// The owner is always a member, even when absent from the contributor
    /// list.
    #[must_use]
    pub fn is_member(&self, user: &UserId) -> bool {
        self.owner_id == *user || self.contributors.contains(user)
    }
}
