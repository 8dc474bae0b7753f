//! Behavioural tests for the in-memory document store.

use crate::adapters::memory::InMemoryDocumentStore;
use crate::ports::{DocumentStore, DocumentStoreError, FieldMap, Filter, ListOrder};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Clock that always reports the same instant, forcing ordering
/// tie-breaks onto the insertion sequence.
#[derive(Debug)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn frozen_instant() -> DateTime<Utc> {
    "2026-01-10T10:00:00Z"
        .parse::<DateTime<Utc>>()
        .expect("valid timestamp")
}

#[fixture]
fn frozen_store() -> InMemoryDocumentStore<FixedClock> {
    InMemoryDocumentStore::with_clock(Arc::new(FixedClock(frozen_instant())))
}

fn fields(pairs: &[(&str, Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_stamps_the_clock_time(frozen_store: InMemoryDocumentStore<FixedClock>) {
    let id = frozen_store
        .insert("projects", fields(&[("name", json!("alpha"))]))
        .await
        .expect("insert should succeed");

    let document = frozen_store
        .get("projects", id)
        .await
        .expect("get should succeed")
        .expect("document should exist");
    assert_eq!(document.created_at, frozen_instant());
    assert_eq!(document.fields.get("name"), Some(&json!("alpha")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equal_timestamps_order_by_insertion_sequence(
    frozen_store: InMemoryDocumentStore<FixedClock>,
) {
    for name in ["first", "second", "third"] {
        frozen_store
            .insert("projects", fields(&[("name", json!(name))]))
            .await
            .expect("insert should succeed");
    }

    let listed = frozen_store
        .list("projects", &[], Some(ListOrder::CreatedAtDesc))
        .await
        .expect("list should succeed");
    let names: Vec<&Value> = listed
        .iter()
        .filter_map(|document| document.fields.get("name"))
        .collect();
    assert_eq!(names, vec![&json!("third"), &json!("second"), &json!("first")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unordered_list_returns_insertion_order(frozen_store: InMemoryDocumentStore<FixedClock>) {
    for name in ["first", "second"] {
        frozen_store
            .insert("todoTasks", fields(&[("name", json!(name))]))
            .await
            .expect("insert should succeed");
    }

    let listed = frozen_store
        .list("todoTasks", &[], None)
        .await
        .expect("list should succeed");
    let names: Vec<&Value> = listed
        .iter()
        .filter_map(|document| document.fields.get("name"))
        .collect();
    assert_eq!(names, vec![&json!("first"), &json!("second")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_are_conjunctive(frozen_store: InMemoryDocumentStore<FixedClock>) {
    frozen_store
        .insert(
            "tasks",
            fields(&[("projectId", json!("p-1")), ("status", json!("default"))]),
        )
        .await
        .expect("insert should succeed");
    frozen_store
        .insert(
            "tasks",
            fields(&[("projectId", json!("p-1")), ("status", json!("urgent"))]),
        )
        .await
        .expect("insert should succeed");
    frozen_store
        .insert(
            "tasks",
            fields(&[("projectId", json!("p-2")), ("status", json!("default"))]),
        )
        .await
        .expect("insert should succeed");

    let filters = [
        Filter::equals("projectId", json!("p-1")),
        Filter::equals("status", json!("default")),
    ];
    let listed = frozen_store
        .list("tasks", &filters, None)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contains_filter_matches_array_membership(
    frozen_store: InMemoryDocumentStore<FixedClock>,
) {
    frozen_store
        .insert(
            "projects",
            fields(&[("contributors", json!(["alice", "bob"]))]),
        )
        .await
        .expect("insert should succeed");
    frozen_store
        .insert("projects", fields(&[("contributors", json!(["carol"]))]))
        .await
        .expect("insert should succeed");

    let filters = [Filter::contains("contributors", json!("bob"))];
    let listed = frozen_store
        .list("projects", &filters, None)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_merges_changed_fields_only(frozen_store: InMemoryDocumentStore<FixedClock>) {
    let id = frozen_store
        .insert(
            "projects",
            fields(&[("name", json!("alpha")), ("description", json!("old"))]),
        )
        .await
        .expect("insert should succeed");

    frozen_store
        .update("projects", id, fields(&[("description", json!("new"))]))
        .await
        .expect("update should succeed");

    let document = frozen_store
        .get("projects", id)
        .await
        .expect("get should succeed")
        .expect("document should exist");
    assert_eq!(document.fields.get("name"), Some(&json!("alpha")));
    assert_eq!(document.fields.get("description"), Some(&json!("new")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_absent_document_is_missing(frozen_store: InMemoryDocumentStore<FixedClock>) {
    let result = frozen_store
        .update("projects", Uuid::new_v4(), fields(&[("name", json!("x"))]))
        .await;
    assert!(matches!(result, Err(DocumentStoreError::Missing { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_document(frozen_store: InMemoryDocumentStore<FixedClock>) {
    let id = frozen_store
        .insert("todoTasks", fields(&[("name", json!("item"))]))
        .await
        .expect("insert should succeed");

    frozen_store
        .delete("todoTasks", id)
        .await
        .expect("delete should succeed");
    let fetched = frozen_store
        .get("todoTasks", id)
        .await
        .expect("get should succeed");
    assert!(fetched.is_none());

    let again = frozen_store.delete("todoTasks", id).await;
    assert!(matches!(again, Err(DocumentStoreError::Missing { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_of_absent_document_is_none(frozen_store: InMemoryDocumentStore<FixedClock>) {
    let fetched = frozen_store
        .get("projects", Uuid::new_v4())
        .await
        .expect("get should succeed");
    assert!(fetched.is_none());
}
