//! Query plans and their execution
//!
//! A [`QueryPlan`] is resolved once from the raw request and never mutated
//! afterwards. Execution issues two independent reads (a count and a page
//! fetch) which are not snapshot-consistent: a concurrent write between them
//! can leave `total` and the page slightly out of step. Callers tolerate that.

use crate::core::entity::{ID_FIELD, Record, Visibility};
use crate::core::error::StorageError;
use crate::core::query::filter::{Filter, TextSearch, lookup_path};
use crate::core::query::page::{PageSpec, Pagination};
use crate::core::query::request::QueryRequest;
use crate::core::query::sort::SortSpec;
use crate::core::store::{Document, RecordStore};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fully-resolved `{filter, search, projection, sort, page}` for one collection
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub collection: String,
    pub filter: Filter,
    pub search: Option<String>,
    pub text_fields: Vec<String>,
    pub projection: Option<Vec<String>>,
    pub sort: SortSpec,
    pub page: PageSpec,
}

impl QueryPlan {
    /// Resolve a request against a collection
    ///
    /// Anonymous callers are always confined to the visible subset: the
    /// visibility field is forced to its public value whatever they asked for.
    pub fn build(
        collection: &str,
        request: &QueryRequest,
        authenticated: bool,
        visibility: Option<&Visibility>,
        text_fields: &[&str],
    ) -> Self {
        let mut filter = Filter::from_request(request);
        if !authenticated && let Some(rule) = visibility {
            filter = filter.restrict_to_public(rule);
        }

        Self {
            collection: collection.to_string(),
            filter,
            search: request
                .get_text("search")
                .filter(|s| TextSearch::has_terms(s))
                .map(str::to_string),
            text_fields: text_fields.iter().map(|f| f.to_string()).collect(),
            projection: parse_projection(request.get_text("select")),
            sort: SortSpec::parse(request.get_text("sort")),
            page: PageSpec::parse(request.get_text("page"), request.get_text("limit")),
        }
    }

    /// Resolve a request against the collection of a record type
    pub fn for_record<T: Record>(request: &QueryRequest, authenticated: bool) -> Self {
        Self::build(
            T::COLLECTION,
            request,
            authenticated,
            T::visibility().as_ref(),
            T::text_fields(),
        )
    }

    /// The filter sent to the store, with the text constraint attached if any
    pub fn store_filter(&self, store: &dyn RecordStore) -> Filter {
        match &self.search {
            Some(query) => {
                let fields: Vec<&str> = self.text_fields.iter().map(String::as_str).collect();
                store.text_search(self.filter.clone(), query, &fields)
            }
            None => self.filter.clone(),
        }
    }

    /// Restrict a document to the selected fields plus the identifier
    pub fn project(&self, document: Document) -> Document {
        let Some(fields) = &self.projection else {
            return document;
        };

        let mut projected = Map::new();
        if let Some(id) = document.get(ID_FIELD) {
            projected.insert(ID_FIELD.to_string(), id.clone());
        }
        for field in fields {
            if let Some(value) = lookup_path(&document, field) {
                insert_path(&mut projected, field, value.clone());
            }
        }
        projected
    }

    /// Run the plan: count, page fetch, projection, pagination metadata
    pub async fn execute(
        &self,
        store: &dyn RecordStore,
    ) -> Result<QueryResult<Document>, StorageError> {
        let filter = self.store_filter(store);

        let (total, records) = futures::try_join!(
            store.count(&self.collection, &filter),
            store.find_sorted(
                &self.collection,
                &filter,
                &self.sort,
                self.page.skip(),
                Some(self.page.limit),
            ),
        )?;

        tracing::debug!(
            collection = %self.collection,
            total,
            page = self.page.page,
            limit = self.page.limit,
            returned = records.len(),
            "list query executed"
        );

        Ok(QueryResult {
            records: records.into_iter().map(|d| self.project(d)).collect(),
            total,
            pagination: Pagination::new(&self.page, total),
        })
    }
}

/// Parse `select=title,year` into field names
///
/// Blank tokens are dropped; an empty selection means full records.
pub fn parse_projection(select: Option<&str>) -> Option<Vec<String>> {
    let fields: Vec<String> = select?
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    (!fields.is_empty()).then_some(fields)
}

fn insert_path(target: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            target.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

/// Records of one page plus the total match count
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub pagination: Pagination,
}

impl<T> QueryResult<T> {
    /// Wrap in the list envelope returned by HTTP routes
    pub fn into_response(self) -> ListResponse<T> {
        ListResponse {
            success: true,
            count: self.records.len(),
            total: self.total,
            pagination: self.pagination,
            data: self.records,
        }
    }
}

/// `{success, count, total, pagination, data}`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub total: u64,
    pub pagination: Pagination,
    pub data: Vec<T>,
}
