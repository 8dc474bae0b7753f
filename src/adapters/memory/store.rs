//! Thread-safe in-memory document store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::ports::{
    Document, DocumentStore, DocumentStoreError, DocumentStoreResult, FieldMap, Filter, ListOrder,
};

/// In-memory document store with clock-injected timestamp stamping.
///
/// Keeps an insertion sequence per document so descending-creation ordering
/// stays deterministic when the clock hands out identical timestamps.
#[derive(Debug)]
pub struct InMemoryDocumentStore<C> {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryDocumentStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    collections: HashMap<String, HashMap<Uuid, StoredDocument>>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    fields: FieldMap,
    created_at: DateTime<Utc>,
    sequence: u64,
}

impl InMemoryDocumentStore<DefaultClock> {
    /// Creates a store stamping timestamps from the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryDocumentStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store stamping timestamps from the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock,
        }
    }
}

fn matches_filter(fields: &FieldMap, filter: &Filter) -> bool {
    match filter {
        Filter::Equals { field, value } => fields.get(field) == Some(value),
        Filter::Contains { field, value } => fields
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|members| members.contains(value)),
    }
}

fn materialize(id: Uuid, stored: &StoredDocument) -> Document {
    Document {
        id,
        created_at: stored.created_at,
        fields: stored.fields.clone(),
    }
}

#[async_trait]
impl<C> DocumentStore for InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, collection: &str, fields: FieldMap) -> DocumentStoreResult<Uuid> {
        let created_at = self.clock.utc();
        let mut state = self
            .state
            .write()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))?;
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        let id = Uuid::new_v4();
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(
                id,
                StoredDocument {
                    fields,
                    created_at,
                    sequence,
                },
            );
        Ok(id)
    }

    async fn list(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<ListOrder>,
    ) -> DocumentStoreResult<Vec<Document>> {
        let state = self
            .state
            .read()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))?;

        let mut matches: Vec<(&Uuid, &StoredDocument)> = state
            .collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|(_, stored)| {
                        filters
                            .iter()
                            .all(|filter| matches_filter(&stored.fields, filter))
                    })
                    .collect()
            })
            .unwrap_or_default();

        match order {
            Some(ListOrder::CreatedAtDesc) => {
                matches.sort_by(|(_, a), (_, b)| {
                    (b.created_at, b.sequence).cmp(&(a.created_at, a.sequence))
                });
            }
            // No ordering requested: fall back to insertion order so
            // repeated queries stay stable.
            None => matches.sort_by_key(|(_, stored)| stored.sequence),
        }

        Ok(matches
            .into_iter()
            .map(|(id, stored)| materialize(*id, stored))
            .collect())
    }

    async fn get(&self, collection: &str, id: Uuid) -> DocumentStoreResult<Option<Document>> {
        let state = self
            .state
            .read()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|documents| documents.get(&id))
            .map(|stored| materialize(id, stored)))
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: FieldMap,
    ) -> DocumentStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))?;
        let stored = state
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&id))
            .ok_or_else(|| DocumentStoreError::missing(collection, id))?;
        for (field, value) in changes {
            stored.fields.insert(field, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> DocumentStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))?;
        let removed = state
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(&id));
        if removed.is_none() {
            return Err(DocumentStoreError::missing(collection, id));
        }
        Ok(())
    }
}
