//! `PostgreSQL` document store backed by a single JSONB table.

use super::{
    models::{DocumentRow, NewDocumentRow},
    schema::documents,
};
use crate::ports::{
    Document, DocumentStore, DocumentStoreError, DocumentStoreResult, FieldMap, Filter, ListOrder,
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use serde_json::Value;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the document store.
pub type DocumentPgPool = Pool<ConnectionManager<PgConnection>>;

const MERGE_SQL: &str = "UPDATE documents SET body = body || $1 WHERE collection = $2 AND id = $3";

/// `PostgreSQL`-backed document store.
///
/// Every logical collection shares one `documents` table; predicates are
/// evaluated with JSONB equality and containment operators.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: DocumentPgPool,
}

impl PostgresDocumentStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DocumentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DocumentStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DocumentStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DocumentStoreError::backend)?;
            f(&mut connection)
        })
        .await
        .map_err(DocumentStoreError::backend)?
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(&self, collection: &str, fields: FieldMap) -> DocumentStoreResult<Uuid> {
        let row = NewDocumentRow {
            id: Uuid::new_v4(),
            collection: collection.to_owned(),
            body: Value::Object(fields),
        };
        let id = row.id;
        self.run_blocking(move |connection| {
            diesel::insert_into(documents::table)
                .values(&row)
                .execute(connection)
                .map_err(DocumentStoreError::backend)?;
            Ok(())
        })
        .await?;
        Ok(id)
    }

    async fn list(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<ListOrder>,
    ) -> DocumentStoreResult<Vec<Document>> {
        let sql = build_list_sql(filters, order)?;
        let collection_name = collection.to_owned();
        let bind_values: Vec<Value> = filters.iter().map(|filter| filter.value().clone()).collect();
        self.run_blocking(move |connection| {
            let mut query = diesel::sql_query(sql).into_boxed::<Pg>();
            query = query.bind::<diesel::sql_types::Text, _>(collection_name);
            for value in bind_values {
                query = query.bind::<diesel::sql_types::Jsonb, _>(value);
            }
            let rows = query
                .load::<DocumentRow>(connection)
                .map_err(DocumentStoreError::backend)?;
            rows.into_iter().map(row_to_document).collect()
        })
        .await
    }

    async fn get(&self, collection: &str, id: Uuid) -> DocumentStoreResult<Option<Document>> {
        let collection_name = collection.to_owned();
        self.run_blocking(move |connection| {
            let row = documents::table
                .filter(documents::collection.eq(collection_name))
                .filter(documents::id.eq(id))
                .select(DocumentRow::as_select())
                .first::<DocumentRow>(connection)
                .optional()
                .map_err(DocumentStoreError::backend)?;
            row.map(row_to_document).transpose()
        })
        .await
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: FieldMap,
    ) -> DocumentStoreResult<()> {
        let collection_name = collection.to_owned();
        self.run_blocking(move |connection| {
            let affected = diesel::sql_query(MERGE_SQL)
                .bind::<diesel::sql_types::Jsonb, _>(Value::Object(changes))
                .bind::<diesel::sql_types::Text, _>(collection_name.clone())
                .bind::<diesel::sql_types::Uuid, _>(id)
                .execute(connection)
                .map_err(DocumentStoreError::backend)?;
            if affected == 0 {
                return Err(DocumentStoreError::missing(collection_name, id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, collection: &str, id: Uuid) -> DocumentStoreResult<()> {
        let collection_name = collection.to_owned();
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                documents::table
                    .filter(documents::collection.eq(collection_name.clone()))
                    .filter(documents::id.eq(id)),
            )
            .execute(connection)
            .map_err(DocumentStoreError::backend)?;
            if affected == 0 {
                return Err(DocumentStoreError::missing(collection_name, id));
            }
            Ok(())
        })
        .await
    }
}

/// Assembles the filtered list query with numbered binds.
///
/// `$1` is always the collection; predicate binds follow in declaration
/// order.
fn build_list_sql(filters: &[Filter], order: Option<ListOrder>) -> DocumentStoreResult<String> {
    let mut sql =
        String::from("SELECT id, collection, body, created_at FROM documents WHERE collection = $1");
    for (position, filter) in filters.iter().enumerate() {
        let field = filter.field();
        ensure_queryable_field(field)?;
        let bind = position + 2;
        match filter {
            Filter::Equals { .. } => {
                sql.push_str(&format!(" AND body->'{field}' = ${bind}"));
            }
            Filter::Contains { .. } => {
                sql.push_str(&format!(" AND body->'{field}' @> ${bind}"));
            }
        }
    }
    if matches!(order, Some(ListOrder::CreatedAtDesc)) {
        sql.push_str(" ORDER BY created_at DESC");
    }
    Ok(sql)
}

/// Rejects field names that cannot be spliced into a JSONB path.
fn ensure_queryable_field(field: &str) -> DocumentStoreResult<()> {
    let queryable =
        !field.is_empty() && field.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if queryable {
        Ok(())
    } else {
        Err(DocumentStoreError::InvalidFieldName(field.to_owned()))
    }
}

fn row_to_document(row: DocumentRow) -> DocumentStoreResult<Document> {
    let DocumentRow {
        id,
        collection,
        body,
        created_at,
    } = row;
    let Value::Object(fields) = body else {
        return Err(DocumentStoreError::backend(std::io::Error::other(format!(
            "document {id} in collection '{collection}' has a non-object body"
        ))));
    };
    Ok(Document {
        id,
        created_at,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_list_sql, ensure_queryable_field, row_to_document};
    use crate::adapters::postgres::models::DocumentRow;
    use crate::ports::{DocumentStoreError, Filter, ListOrder};
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn list_sql_without_filters_is_collection_scoped() {
        let sql = build_list_sql(&[], None).expect("valid query");
        assert_eq!(
            sql,
            "SELECT id, collection, body, created_at FROM documents WHERE collection = $1"
        );
    }

    #[test]
    fn list_sql_numbers_predicate_binds_after_collection() {
        let filters = vec![
            Filter::equals("projectId", json!("p-1")),
            Filter::contains("contributors", json!("u-1")),
        ];
        let sql = build_list_sql(&filters, Some(ListOrder::CreatedAtDesc)).expect("valid query");
        assert_eq!(
            sql,
            "SELECT id, collection, body, created_at FROM documents WHERE collection = $1 \
             AND body->'projectId' = $2 AND body->'contributors' @> $3 \
             ORDER BY created_at DESC"
        );
    }

    #[test]
    fn list_sql_rejects_unqueryable_field_names() {
        let filters = vec![Filter::equals("name'; DROP TABLE documents; --", json!("x"))];
        let result = build_list_sql(&filters, None);
        assert!(matches!(
            result,
            Err(DocumentStoreError::InvalidFieldName(_))
        ));
    }

    #[test]
    fn queryable_field_accepts_camel_case() {
        assert!(ensure_queryable_field("ownerId").is_ok());
        assert!(ensure_queryable_field("is_finish").is_ok());
        assert!(ensure_queryable_field("").is_err());
        assert!(ensure_queryable_field("a b").is_err());
    }

    #[test]
    fn non_object_body_surfaces_as_backend_error() {
        let row = DocumentRow {
            id: Uuid::new_v4(),
            collection: "projects".to_owned(),
            body: json!([1, 2, 3]),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row_to_document(row),
            Err(DocumentStoreError::Backend(_))
        ));
    }

    #[test]
    fn object_body_materializes_with_row_metadata() {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let row = DocumentRow {
            id,
            collection: "tasks".to_owned(),
            body: json!({"name": "write the report"}),
            created_at,
        };
        let document = row_to_document(row).expect("object body");
        assert_eq!(document.id, id);
        assert_eq!(document.created_at, created_at);
        assert_eq!(document.fields.get("name"), Some(&json!("write the report")));
    }
}
