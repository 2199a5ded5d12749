//! Record store abstraction
//!
//! Backends persist JSON documents grouped into named collections. Everything
//! above this trait (query builder, ordered lists, repositories) is backend
//! agnostic; every method maps onto a single bounded request against the
//! store, and failures surface as [`StorageError`] without retries.

use crate::core::error::StorageError;
use crate::core::query::filter::{Filter, TextSearch};
use crate::core::query::sort::SortSpec;
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored record in its JSON form
pub type Document = Map<String, Value>;

/// Trait for document stores the query builder and ordered lists run against
///
/// Comparison operators (`gt`, `gte`, `lt`, `lte`, `in`) carried by a
/// [`Filter`] must be supported natively.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Backend name used in logs and errors
    fn backend(&self) -> &'static str;

    /// Insert a new document; `document["id"]` must already be set
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StorageError>;

    /// Fetch a document by id
    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Document>, StorageError>;

    /// All documents matching the filter, in natural order
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StorageError>;

    /// Number of documents matching the filter
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StorageError>;

    /// Matching documents in sort order, skipping `skip` and returning at most `limit`
    async fn find_sorted(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &SortSpec,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StorageError>;

    /// Extend a filter with a full-text constraint over `fields`
    fn text_search(&self, filter: Filter, query: &str, fields: &[&str]) -> Filter {
        filter.with_text_search(TextSearch::new(query, fields))
    }

    /// Merge `patch` into a document; `None` when no document has this id
    async fn update_by_id(
        &self,
        collection: &str,
        id: &Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StorageError>;

    /// Delete a document; `false` when no document had this id
    async fn delete(&self, collection: &str, id: &Uuid) -> Result<bool, StorageError>;

    /// Distinct values of a field across matching documents
    async fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>, StorageError>;
}
