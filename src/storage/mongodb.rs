//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! atelier = { version = "0.3", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One MongoDB collection per record collection (`artworks`, `heroslides`, ...).
//!
//! # Serialization strategy
//!
//! Documents are converted from `serde_json` to BSON and back. Identifiers
//! are stored as UUID strings and timestamps as fixed-width RFC 3339
//! strings. The `id` field is mapped to MongoDB's `_id` convention.
//!
//! # Query translation
//!
//! Query-string values arrive untyped. Equality and `in` matches expand each
//! string into its typed variants (string plus integer/float/boolean) with
//! `$in`; range comparisons use the single most specific variant.

use crate::core::entity::{ID_FIELD, IndexDefinition, IndexKey, Record};
use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::query::filter::{CompareOp, Condition, Filter};
use crate::core::query::sort::SortSpec;
use crate::core::store::{Document as JsonDocument, RecordStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Database, IndexModel};
use serde_json::Value;
use uuid::Uuid;

const BACKEND: &str = "mongodb";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn query_error(e: mongodb::error::Error) -> StorageError {
    StorageError::query(BACKEND, e)
}

/// Convert a JSON document into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: JsonDocument) -> Result<Document, StorageError> {
    let bson_val = mongodb::bson::to_bson(&Value::Object(json))
        .map_err(|e| StorageError::serialization(format!("Failed to convert JSON to BSON: {e}")))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(StorageError::serialization("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove(ID_FIELD) {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a JSON document,
/// renaming `_id` → `id` for record convention.
fn document_to_json(mut doc: Document) -> JsonDocument {
    if let Some(id) = doc.remove("_id") {
        doc.insert(ID_FIELD, id);
    }

    match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => JsonDocument::new(),
    }
}

fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn field_name(field: &str) -> &str {
    if field == ID_FIELD { "_id" } else { field }
}

fn json_to_bson(value: &Value) -> Result<Bson, StorageError> {
    mongodb::bson::to_bson(value).map_err(StorageError::serialization)
}

/// Every BSON value a query-string value may be stored as
fn variants(value: &Value) -> Result<Vec<Bson>, StorageError> {
    let Value::String(raw) = value else {
        return Ok(vec![json_to_bson(value)?]);
    };

    let mut variants = vec![Bson::String(raw.clone())];
    match raw.as_str() {
        "true" => variants.push(Bson::Boolean(true)),
        "false" => variants.push(Bson::Boolean(false)),
        _ => {
            if let Ok(i) = raw.parse::<i64>() {
                variants.push(Bson::Int64(i));
            }
            if raw.contains('.')
                && let Ok(f) = raw.parse::<f64>()
            {
                variants.push(Bson::Double(f));
            }
        }
    }
    Ok(variants)
}

/// Most specific typed reading of a query-string value, for range operators
fn typed(value: &Value) -> Result<Bson, StorageError> {
    if let Value::String(raw) = value {
        if let Ok(i) = raw.parse::<i64>() {
            return Ok(Bson::Int64(i));
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Ok(Bson::Double(f));
        }
    }
    json_to_bson(value)
}

fn condition_to_bson(condition: &Condition) -> Result<Bson, StorageError> {
    match condition {
        Condition::Eq(value) => {
            let mut candidates = variants(value)?;
            if candidates.len() == 1 {
                Ok(candidates.remove(0))
            } else {
                Ok(Bson::Document(doc! { "$in": candidates }))
            }
        }
        Condition::Compare(ops) => {
            let mut clause = Document::new();
            for (op, operand) in ops {
                let bson = match (op, operand) {
                    (CompareOp::In, Value::Array(items)) => {
                        let mut all = Vec::new();
                        for item in items {
                            all.extend(variants(item)?);
                        }
                        Bson::Array(all)
                    }
                    (CompareOp::In, single) => Bson::Array(variants(single)?),
                    (_, value) => typed(value)?,
                };
                clause.insert(op.native(), bson);
            }
            Ok(Bson::Document(clause))
        }
    }
}

/// Translate a structural filter into a MongoDB query document
pub fn filter_to_document(filter: &Filter) -> Result<Document, StorageError> {
    let mut query = Document::new();
    for (field, condition) in filter.conditions() {
        query.insert(field_name(field), condition_to_bson(condition)?);
    }
    if let Some(text) = filter.text() {
        query.insert("$text", doc! { "$search": text.query() });
    }
    Ok(query)
}

/// Translate a sort specification into a MongoDB sort document
pub fn sort_to_document(sort: &SortSpec) -> Document {
    let mut document = Document::new();
    for key in sort.keys() {
        document.insert(field_name(&key.field), key.direction.as_i32());
    }
    document
}

fn index_model(definition: &IndexDefinition) -> IndexModel {
    let mut keys = Document::new();
    for (field, kind) in &definition.keys {
        let value = match kind {
            IndexKey::Ascending => Bson::Int32(1),
            IndexKey::Descending => Bson::Int32(-1),
            IndexKey::Text => Bson::String("text".to_string()),
        };
        keys.insert(field_name(field), value);
    }
    let options = IndexOptions::builder().unique(definition.unique).build();
    IndexModel::builder().keys(keys).options(options).build()
}

// ---------------------------------------------------------------------------
// MongoStore
// ---------------------------------------------------------------------------

/// Record store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use atelier::storage::MongoStore;
///
/// let store = MongoStore::connect("mongodb://localhost:27017", "atelier").await?;
/// store.ensure_indexes::<Artwork>().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to a MongoDB deployment and select a database
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(client.database(database)))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }

    /// Create the indexes a record type declares
    ///
    /// This method is idempotent and safe to call on every startup.
    pub async fn ensure_indexes<T: Record>(&self) -> Result<(), StorageError> {
        let models: Vec<IndexModel> = T::indexes().iter().map(index_model).collect();
        if models.is_empty() {
            return Ok(());
        }

        self.collection(T::COLLECTION)
            .create_indexes(models)
            .await
            .map_err(query_error)?;

        tracing::debug!(collection = T::COLLECTION, "indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn insert(
        &self,
        collection: &str,
        document: JsonDocument,
    ) -> Result<JsonDocument, StorageError> {
        let bson = json_to_document(document.clone())?;
        self.collection(collection)
            .insert_one(bson)
            .await
            .map_err(query_error)?;
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<JsonDocument>, StorageError> {
        let doc = self
            .collection(collection)
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(query_error)?;
        Ok(doc.map(document_to_json))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<JsonDocument>, StorageError> {
        let cursor = self
            .collection(collection)
            .find(filter_to_document(filter)?)
            .await
            .map_err(query_error)?;

        let docs: Vec<Document> = cursor.try_collect().await.map_err(query_error)?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StorageError> {
        self.collection(collection)
            .count_documents(filter_to_document(filter)?)
            .await
            .map_err(query_error)
    }

    async fn find_sorted(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &SortSpec,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<JsonDocument>, StorageError> {
        let mut find = self
            .collection(collection)
            .find(filter_to_document(filter)?)
            .sort(sort_to_document(sort))
            .skip(skip.min(i64::MAX as u64));
        if let Some(limit) = limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await.map_err(query_error)?;
        let docs: Vec<Document> = cursor.try_collect().await.map_err(query_error)?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &Uuid,
        mut patch: JsonDocument,
    ) -> Result<Option<JsonDocument>, StorageError> {
        patch.remove(ID_FIELD);
        if patch.is_empty() {
            return self.get(collection, id).await;
        }

        let set = json_to_document(patch)?;
        let updated = self
            .collection(collection)
            .find_one_and_update(doc! { "_id": uuid_bson(id) }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(query_error)?;
        Ok(updated.map(document_to_json))
    }

    async fn delete(&self, collection: &str, id: &Uuid) -> Result<bool, StorageError> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(query_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>, StorageError> {
        let values = self
            .collection(collection)
            .distinct(field_name(field), filter_to_document(filter)?)
            .await
            .map_err(query_error)?;

        let mut values: Vec<Value> = values.into_iter().map(Bson::into_relaxed_extjson).collect();
        values.sort_by(|a, b| FieldValue::from_json(a).sort_cmp(&FieldValue::from_json(b)));
        Ok(values)
    }
}
