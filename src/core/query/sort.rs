//! Sort specifications

use crate::core::entity::CREATED_AT_FIELD;
use crate::core::field::FieldValue;
use crate::core::query::filter::lookup_path;
use serde_json::{Map, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Numeric form used by document stores (`1` / `-1`)
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Ordered sequence of sort keys, highest priority first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl Default for SortSpec {
    /// Newest first
    fn default() -> Self {
        Self::descending(CREATED_AT_FIELD)
    }
}

impl SortSpec {
    pub fn ascending(field: &str) -> Self {
        Self {
            keys: vec![SortKey {
                field: field.to_string(),
                direction: SortDirection::Ascending,
            }],
        }
    }

    pub fn descending(field: &str) -> Self {
        Self {
            keys: vec![SortKey {
                field: field.to_string(),
                direction: SortDirection::Descending,
            }],
        }
    }

    /// Append a lower-priority key
    pub fn then(mut self, field: &str, direction: SortDirection) -> Self {
        self.keys.push(SortKey {
            field: field.to_string(),
            direction,
        });
        self
    }

    /// Parse `title,-year` style expressions
    ///
    /// Tokens are passed through as field names without validation. An absent
    /// or blank expression falls back to the default.
    pub fn parse(expr: Option<&str>) -> Self {
        let keys: Vec<SortKey> = expr
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter_map(|token| {
                let (field, direction) = match token.strip_prefix('-') {
                    Some(rest) => (rest, SortDirection::Descending),
                    None => (token, SortDirection::Ascending),
                };
                (!field.is_empty()).then(|| SortKey {
                    field: field.to_string(),
                    direction,
                })
            })
            .collect();

        if keys.is_empty() {
            Self::default()
        } else {
            Self { keys }
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare two documents; missing fields sort as null
    pub fn compare(&self, a: &Map<String, Value>, b: &Map<String, Value>) -> Ordering {
        for key in &self.keys {
            let left = field_of(a, &key.field);
            let right = field_of(b, &key.field);
            let ordering = match key.direction {
                SortDirection::Ascending => left.sort_cmp(&right),
                SortDirection::Descending => right.sort_cmp(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn field_of(document: &Map<String, Value>, field: &str) -> FieldValue {
    lookup_path(document, field)
        .map(FieldValue::from_json)
        .unwrap_or(FieldValue::Null)
}
