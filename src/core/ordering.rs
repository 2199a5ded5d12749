//! Ordered lists: append-at-end creation and bulk reordering
//!
//! `order` values are not required to be contiguous. Deleting a record
//! leaves a gap, and duplicate values are allowed; records sharing a value
//! come back in the store's stable tiebreak order.

use crate::core::entity::{ID_FIELD, ORDER_FIELD, Ordered};
use crate::core::error::{AtelierResult, StorageError, ValidationError};
use crate::core::query::{Filter, SortSpec};
use crate::core::repository::Repository;
use crate::core::store::{Document, RecordStore};
use futures::future::try_join_all;
use serde_json::Value;
use uuid::Uuid;

/// New `order` value for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssignment {
    pub id: Uuid,
    pub order: i64,
}

/// `max(order) + 1`, or `0` for an empty collection
///
/// Saturates at `i64::MAX`, which reorder can assign.
pub async fn next_order(store: &dyn RecordStore, collection: &str) -> Result<i64, StorageError> {
    let top = store
        .find_sorted(
            collection,
            &Filter::new(),
            &SortSpec::descending(ORDER_FIELD),
            0,
            Some(1),
        )
        .await?;

    Ok(top
        .first()
        .and_then(|doc| doc.get(ORDER_FIELD))
        .and_then(Value::as_i64)
        .map_or(0, |max| max.saturating_add(1)))
}

/// The order to store for a new record
///
/// An explicit integer (including `0`, and integer strings such as `"3"`) is
/// kept with no collision check. Anything else falls back to [`next_order`].
pub async fn resolve_order(
    store: &dyn RecordStore,
    collection: &str,
    explicit: Option<&Value>,
) -> Result<Value, StorageError> {
    match explicit.and_then(explicit_order) {
        Some(order) => Ok(Value::from(order)),
        None => Ok(Value::from(next_order(store, collection).await?)),
    }
}

fn explicit_order(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate a reorder payload before anything is written
///
/// `payload` is the array found under `argument` in the request body.
pub fn parse_assignments(
    payload: Option<&Value>,
    argument: &str,
) -> Result<Vec<OrderAssignment>, ValidationError> {
    let invalid = || {
        ValidationError::invalid_argument(
            argument,
            format!("Please provide an array of {argument} with id and order"),
        )
    };

    let items = match payload {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(invalid()),
    };

    items
        .iter()
        .map(|item| {
            let id = item
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .and_then(|s| Uuid::parse_str(s).ok());
            let order = item.get(ORDER_FIELD).and_then(Value::as_i64);
            match (id, order) {
                (Some(id), Some(order)) => Ok(OrderAssignment { id, order }),
                _ => Err(invalid()),
            }
        })
        .collect()
}

/// Apply assignments, then return every record sorted by `order` ascending
///
/// Writes are issued concurrently, one per assignment, with no transaction
/// around them: if write k fails the others may already be applied. Ids that
/// match no record are skipped.
pub async fn reorder(
    store: &dyn RecordStore,
    collection: &str,
    assignments: &[OrderAssignment],
) -> Result<Vec<Document>, StorageError> {
    let updates = assignments.iter().map(|assignment| async move {
        let mut patch = Document::new();
        patch.insert(ORDER_FIELD.to_string(), Value::from(assignment.order));
        let updated = store.update_by_id(collection, &assignment.id, patch).await?;
        if updated.is_none() {
            tracing::warn!(collection, id = %assignment.id, "reorder skipped unknown record");
        }
        Ok::<_, StorageError>(())
    });
    try_join_all(updates).await?;

    tracing::debug!(collection, count = assignments.len(), "records reordered");

    store
        .find_sorted(
            collection,
            &Filter::new(),
            &SortSpec::ascending(ORDER_FIELD),
            0,
            None,
        )
        .await
}

impl<T: Ordered> Repository<T> {
    pub async fn next_order(&self) -> AtelierResult<i64> {
        Ok(next_order(self.store(), T::COLLECTION).await?)
    }

    /// Create a record, appending it to the end unless the payload sets `order`
    pub async fn create_ordered(&self, mut payload: Value) -> AtelierResult<T> {
        let order = resolve_order(self.store(), T::COLLECTION, payload.get(ORDER_FIELD)).await?;
        if let Value::Object(fields) = &mut payload {
            fields.insert(ORDER_FIELD.to_string(), order);
        }
        self.create(payload).await
    }

    /// Validate a reorder payload, apply it and return the full ordered list
    pub async fn reorder(&self, payload: Option<&Value>, argument: &str) -> AtelierResult<Vec<T>> {
        let assignments = parse_assignments(payload, argument)?;
        let documents = reorder(self.store(), T::COLLECTION, &assignments).await?;
        documents
            .into_iter()
            .map(|doc| Self::from_document(doc).map_err(Into::into))
            .collect()
    }
}
