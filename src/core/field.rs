//! Field value types and query-value comparison
//!
//! Stored records are JSON documents, while query parameters arrive as strings.
//! [`FieldValue`] bridges the two: a stored value decides the type, and the
//! query-supplied value is coerced to it before comparing (`"2020"` against the
//! integer `2020`, `"true"` against a boolean, an RFC 3339 string against a
//! timestamp).

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A polymorphic field value read from a stored document
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Object(Map<String, Value>),
    Null,
}

impl FieldValue {
    /// Read a stored JSON value
    ///
    /// Strings that parse as RFC 3339 timestamps become [`FieldValue::DateTime`],
    /// since timestamps are persisted in that form.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => FieldValue::DateTime(dt.with_timezone(&Utc)),
                Err(_) => FieldValue::String(s.clone()),
            },
            Value::Array(items) => FieldValue::Array(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => FieldValue::Object(map.clone()),
        }
    }

    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Coerce a query-supplied value to this value's type
    ///
    /// Returns `None` when the query value cannot represent this type, in which
    /// case it never matches.
    pub fn coerce(&self, raw: &Value) -> Option<FieldValue> {
        match self {
            FieldValue::Integer(_) | FieldValue::Float(_) => match raw {
                Value::Number(_) => Some(Self::from_json(raw)),
                Value::String(s) => parse_number(s.trim()),
                _ => None,
            },
            FieldValue::Boolean(_) => match raw {
                Value::Bool(b) => Some(FieldValue::Boolean(*b)),
                Value::String(s) => match s.as_str() {
                    "true" => Some(FieldValue::Boolean(true)),
                    "false" => Some(FieldValue::Boolean(false)),
                    _ => None,
                },
                _ => None,
            },
            FieldValue::DateTime(_) => match raw {
                Value::String(s) => parse_datetime(s.trim()).map(FieldValue::DateTime),
                _ => None,
            },
            FieldValue::String(_) => match raw {
                Value::String(s) => Some(FieldValue::String(s.clone())),
                Value::Number(n) => Some(FieldValue::String(n.to_string())),
                Value::Bool(b) => Some(FieldValue::String(b.to_string())),
                _ => None,
            },
            FieldValue::Null => match raw {
                Value::Null => Some(FieldValue::Null),
                Value::String(s) if s == "null" => Some(FieldValue::Null),
                _ => None,
            },
            FieldValue::Object(_) => match raw {
                Value::Object(map) => Some(FieldValue::Object(map.clone())),
                _ => None,
            },
            FieldValue::Array(_) => match raw {
                Value::Array(_) => Some(Self::from_json(raw)),
                _ => None,
            },
        }
    }

    /// Compare this stored value with a query value of the same logical type
    pub fn compare_to_query(&self, raw: &Value) -> Option<Ordering> {
        let other = self.coerce(raw)?;
        match (self, &other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            (FieldValue::Null, FieldValue::Null) => Some(Ordering::Equal),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Equality against a query value under type coercion
    pub fn matches_query(&self, raw: &Value) -> bool {
        self.compare_to_query(raw) == Some(Ordering::Equal)
    }

    /// Total order across types, used for sorting
    ///
    /// Values of different types are ranked null < numbers < strings < objects
    /// < arrays < booleans < timestamps, the order document stores use.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Array(a), FieldValue::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.sort_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (a, b) => a.type_rank().cmp(&b.type_rank()),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::String(_) => 2,
            FieldValue::Object(_) => 3,
            FieldValue::Array(_) => 4,
            FieldValue::Boolean(_) => 5,
            FieldValue::DateTime(_) => 6,
        }
    }
}

fn parse_number(s: &str) -> Option<FieldValue> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(FieldValue::Integer(i));
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(FieldValue::Float)
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
