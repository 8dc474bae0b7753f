//! Diesel row models for document persistence.

use super::schema::documents;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for document records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentRow {
    /// Store-assigned identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Logical collection name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub collection: String,
    /// Document field bag.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub body: Value,
    /// Server-assigned creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for document records.
///
/// `created_at` is omitted so the database default stamps it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow {
    /// Store-assigned identifier.
    pub id: uuid::Uuid,
    /// Logical collection name.
    pub collection: String,
    /// Document field bag.
    pub body: Value,
}
