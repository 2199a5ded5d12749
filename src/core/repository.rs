//! Typed access to one collection of a record store

use crate::core::entity::{CREATED_AT_FIELD, ID_FIELD, Record, UPDATED_AT_FIELD, timestamp};
use crate::core::error::{AtelierResult, EntityError, StorageError, ValidationError};
use crate::core::query::{Filter, QueryPlan, QueryRequest, QueryResult, SortSpec};
use crate::core::store::{Document, RecordStore};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Parse a path identifier
pub fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId {
        value: raw.to_string(),
    })
}

/// Record-typed facade over a [`RecordStore`] collection
///
/// Handles identifiers, timestamps and validation so that handlers only deal
/// with payloads and records.
pub struct Repository<T> {
    store: Arc<dyn RecordStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn to_document(record: &T) -> Result<Document, StorageError> {
        match serde_json::to_value(record).map_err(StorageError::serialization)? {
            Value::Object(doc) => Ok(doc),
            other => Err(StorageError::serialization(format!(
                "{} did not serialize to an object: {other}",
                T::LABEL
            ))),
        }
    }

    pub fn from_document(document: Document) -> Result<T, StorageError> {
        serde_json::from_value(Value::Object(document)).map_err(StorageError::serialization)
    }

    /// Build a new record from a client payload
    ///
    /// Client-supplied `id` and timestamps are ignored. The creation hook runs
    /// before validation so derived fields (slugs) are validated too.
    pub fn build(payload: Value) -> AtelierResult<T> {
        let mut document = into_object(payload)?;
        let now = timestamp::now();

        document.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
        document.insert(CREATED_AT_FIELD.to_string(), now.clone());
        document.insert(UPDATED_AT_FIELD.to_string(), now);

        let mut record: T = serde_json::from_value(Value::Object(document)).map_err(|e| {
            ValidationError::InvalidJson {
                message: e.to_string(),
            }
        })?;
        record.on_create();
        record.validate()?;
        Ok(record)
    }

    /// Validate a payload and insert it as a new record
    pub async fn create(&self, payload: Value) -> AtelierResult<T> {
        let record = Self::build(payload)?;
        self.insert(record).await
    }

    /// Insert an already-built record
    pub async fn insert(&self, record: T) -> AtelierResult<T> {
        let document = Self::to_document(&record)?;
        let stored = self.store.insert(T::COLLECTION, document).await?;
        tracing::debug!(collection = T::COLLECTION, id = %record.id(), "record created");
        Ok(Self::from_document(stored)?)
    }

    pub async fn get(&self, id: &Uuid) -> AtelierResult<Option<T>> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(Self::from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Fetch by id or fail with a not-found error
    pub async fn require(&self, id: &Uuid) -> AtelierResult<T> {
        self.get(id)
            .await?
            .ok_or_else(|| EntityError::not_found(T::LABEL, id).into())
    }

    /// First record matching a filter
    pub async fn find_one(&self, filter: &Filter) -> AtelierResult<Option<T>> {
        let mut docs = self
            .store
            .find_sorted(T::COLLECTION, filter, &SortSpec::default(), 0, Some(1))
            .await?;
        match docs.pop() {
            Some(doc) => Ok(Some(Self::from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Matching records in the given order, optionally capped
    pub async fn list(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        limit: Option<u64>,
    ) -> AtelierResult<Vec<T>> {
        let docs = self
            .store
            .find_sorted(T::COLLECTION, filter, sort, 0, limit)
            .await?;
        docs.into_iter()
            .map(|d| Self::from_document(d).map_err(Into::into))
            .collect()
    }

    pub async fn count(&self, filter: &Filter) -> AtelierResult<u64> {
        Ok(self.store.count(T::COLLECTION, filter).await?)
    }

    /// Run a paginated list query over this collection
    pub async fn query(
        &self,
        request: &QueryRequest,
        authenticated: bool,
    ) -> AtelierResult<QueryResult<Document>> {
        let plan = QueryPlan::for_record::<T>(request, authenticated);
        Ok(plan.execute(self.store.as_ref()).await?)
    }

    /// Merge a partial payload into a record
    ///
    /// The merged record is validated before anything is written. Unknown
    /// keys are dropped; `id` and `createdAt` cannot be changed.
    pub async fn update(&self, id: &Uuid, payload: Value) -> AtelierResult<T> {
        let mut patch = into_object(payload)?;
        patch.remove(ID_FIELD);
        patch.remove(CREATED_AT_FIELD);
        patch.insert(UPDATED_AT_FIELD.to_string(), timestamp::now());

        let mut merged = self
            .store
            .get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| EntityError::not_found(T::LABEL, id))?;
        merged.extend(patch.clone());

        let record: T = serde_json::from_value(Value::Object(merged)).map_err(|e| {
            ValidationError::InvalidJson {
                message: e.to_string(),
            }
        })?;
        record.validate()?;

        // Write back the normalized form of each patched field
        let normalized = Self::to_document(&record)?;
        let patch: Document = patch
            .into_iter()
            .filter_map(|(key, raw)| match normalized.get(&key) {
                Some(value) => Some((key, value.clone())),
                None if raw.is_null() => Some((key, Value::Null)),
                None => None,
            })
            .collect();

        self.apply(id, patch).await
    }

    /// Write raw field values without validation (counters and the like)
    pub async fn apply(&self, id: &Uuid, patch: Document) -> AtelierResult<T> {
        let updated = self
            .store
            .update_by_id(T::COLLECTION, id, patch)
            .await?
            .ok_or_else(|| EntityError::not_found(T::LABEL, id))?;
        Ok(Self::from_document(updated)?)
    }

    /// Delete a record, returning it
    pub async fn delete(&self, id: &Uuid) -> AtelierResult<T> {
        let record = self.require(id).await?;
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(EntityError::not_found(T::LABEL, id).into());
        }
        tracing::debug!(collection = T::COLLECTION, %id, "record deleted");
        Ok(record)
    }

    /// Distinct values of a field among matching records
    pub async fn distinct(&self, field: &str, filter: &Filter) -> AtelierResult<Vec<Value>> {
        Ok(self.store.distinct(T::COLLECTION, field, filter).await?)
    }
}

fn into_object(payload: Value) -> Result<Document, ValidationError> {
    match payload {
        Value::Object(doc) => Ok(doc),
        other => Err(ValidationError::InvalidJson {
            message: format!("expected a JSON object, got {other}"),
        }),
    }
}
