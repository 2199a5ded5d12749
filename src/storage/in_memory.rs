//! In-memory implementation of RecordStore for testing and development

use crate::core::entity::ID_FIELD;
use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::query::filter::{Filter, lookup_path};
use crate::core::query::sort::SortSpec;
use crate::core::store::{Document, RecordStore};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

const BACKEND: &str = "memory";

type Collection = IndexMap<String, Document>;

/// In-memory record store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Documents keep insertion order, which is also the tiebreak when sort keys
/// are equal.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Collection>>, StorageError> {
        self.collections
            .read()
            .map_err(|e| StorageError::query(BACKEND, format!("Failed to acquire read lock: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Collection>>, StorageError> {
        self.collections
            .write()
            .map_err(|e| StorageError::query(BACKEND, format!("Failed to acquire write lock: {e}")))
    }

    fn matching(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StorageError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StorageError> {
        let id = document
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::query(BACKEND, "document has no string id"))?
            .to_string();

        let mut collections = self.write()?;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(StorageError::query(
                BACKEND,
                format!("duplicate id {id} in {collection}"),
            ));
        }
        docs.insert(id, document.clone());

        Ok(document)
    }

    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Document>, StorageError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(&id.to_string()))
            .cloned())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StorageError> {
        self.matching(collection, filter)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StorageError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn find_sorted(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &SortSpec,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StorageError> {
        let mut docs = self.matching(collection, filter)?;
        // stable: equal keys keep insertion order
        docs.sort_by(|a, b| sort.compare(a, b));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(docs.into_iter().skip(skip).take(limit).collect())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StorageError> {
        let mut collections = self.write()?;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&id.to_string()))
        else {
            return Ok(None);
        };

        for (key, value) in patch {
            if key != ID_FIELD {
                document.insert(key, value);
            }
        }
        Ok(Some(document.clone()))
    }

    async fn delete(&self, collection: &str, id: &Uuid) -> Result<bool, StorageError> {
        let mut collections = self.write()?;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.shift_remove(&id.to_string()))
            .is_some())
    }

    async fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>, StorageError> {
        let docs = self.matching(collection, filter)?;
        let mut values: Vec<Value> = Vec::new();

        let mut push = |value: &Value| {
            if !values.contains(value) {
                values.push(value.clone());
            }
        };
        for doc in &docs {
            match lookup_path(doc, field) {
                Some(Value::Array(items)) => items.iter().for_each(&mut push),
                Some(value) => push(value),
                None => {}
            }
        }

        values.sort_by(|a, b| FieldValue::from_json(a).sort_cmp(&FieldValue::from_json(b)));
        Ok(values)
    }
}
