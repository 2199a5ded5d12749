//! Record traits defining the core abstraction for all stored types

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

/// Identifier field present on every stored document
pub const ID_FIELD: &str = "id";
/// Creation timestamp field
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Last-update timestamp field
pub const UPDATED_AT_FIELD: &str = "updatedAt";
/// Manual display-order field
pub const ORDER_FIELD: &str = "order";

/// Base trait for every record type stored in a collection.
///
/// All records have:
/// - id: Unique identifier
/// - createdAt / updatedAt: timestamps maintained by the repository
///
/// Records serialize to camelCase JSON documents; the field names are the
/// contract the query builder filters and sorts on.
pub trait Record: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static {
    /// Collection name in the record store (e.g. "artworks")
    const COLLECTION: &'static str;

    /// Human-readable type name used in messages (e.g. "Artwork")
    const LABEL: &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Field gating what anonymous callers may see, if any
    fn visibility() -> Option<Visibility> {
        None
    }

    /// Fields covered by full-text search
    fn text_fields() -> &'static [&'static str] {
        &[]
    }

    /// Secondary indexes stores should maintain for this collection
    fn indexes() -> Vec<IndexDefinition> {
        Vec::new()
    }

    /// Hook run once before the first insert (slug generation and the like)
    fn on_create(&mut self) {}
}

/// Key kind within an index definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    Ascending,
    Descending,
    Text,
}

/// Backend-neutral description of a secondary index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    pub keys: Vec<(&'static str, IndexKey)>,
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(keys: &[(&'static str, IndexKey)]) -> Self {
        Self {
            keys: keys.to_vec(),
            unique: false,
        }
    }

    /// Full-text index over the given fields
    pub fn text(fields: &[&'static str]) -> Self {
        Self::new(&fields.iter().map(|f| (*f, IndexKey::Text)).collect::<Vec<_>>())
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Records whose display sequence is controlled by an explicit `order` field
pub trait Ordered: Record {
    /// Current display position
    fn order(&self) -> i64;
}

/// Fixed-width RFC 3339 timestamps with millisecond precision
///
/// Stores that compare timestamps as strings then order them chronologically.
/// Use with `#[serde(with = "timestamp")]`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Current time in stored form
    pub fn now() -> Value {
        Value::String(format(&Utc::now()))
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// The value a visibility field must hold for anonymous callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicValue {
    /// Enumerated status, e.g. `status = "published"`
    Text(&'static str),
    /// Boolean flag, e.g. `isActive = true`
    Flag(bool),
}

/// Rule restricting anonymous callers to the public subset of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub field: &'static str,
    pub public_value: PublicValue,
}

impl Visibility {
    pub const fn text(field: &'static str, value: &'static str) -> Self {
        Self {
            field,
            public_value: PublicValue::Text(value),
        }
    }

    pub const fn flag(field: &'static str, value: bool) -> Self {
        Self {
            field,
            public_value: PublicValue::Flag(value),
        }
    }

    /// The public value as stored JSON
    pub fn public_json(&self) -> Value {
        match self.public_value {
            PublicValue::Text(s) => Value::String(s.to_string()),
            PublicValue::Flag(b) => Value::Bool(b),
        }
    }

    /// Whether a stored document belongs to the public subset
    pub fn is_visible(&self, document: &Map<String, Value>) -> bool {
        document.get(self.field) == Some(&self.public_json())
    }
}
