//! Raw list-query parameters
//!
//! The HTTP layer hands over decoded `(key, value)` pairs. Bracket notation is
//! expanded into nested mappings the way form-style query strings are usually
//! read, so `year[gte]=2020&tags[in]=oil&tags[in]=ink` becomes
//! `{year: {gte: "2020"}, tags: {in: ["oil", "ink"]}}`.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Keys consumed by the query builder itself; never treated as filter fields
pub const RESERVED_KEYS: [&str; 5] = ["select", "sort", "page", "limit", "search"];

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// `key=value`
    Text(String),
    /// Repeated `key=a&key=b` or `key[]=a&key[]=b`
    List(Vec<String>),
    /// `key[sub]=value`
    Map(IndexMap<String, QueryValue>),
}

impl QueryValue {
    /// First textual value, as a scalar read of the parameter
    pub fn first_text(&self) -> Option<&str> {
        match self {
            QueryValue::Text(s) => Some(s),
            QueryValue::List(items) => items.first().map(String::as_str),
            QueryValue::Map(_) => None,
        }
    }

    /// Convert to JSON for filter construction
    pub fn to_json(&self) -> Value {
        match self {
            QueryValue::Text(s) => Value::String(s.clone()),
            QueryValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            QueryValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    fn push(&mut self, value: String) {
        *self = match std::mem::replace(self, QueryValue::List(Vec::new())) {
            QueryValue::Text(existing) => QueryValue::List(vec![existing, value]),
            QueryValue::List(mut items) => {
                items.push(value);
                QueryValue::List(items)
            }
            QueryValue::Map(_) => QueryValue::Text(value),
        };
    }
}

/// Mapping of parameter name to value, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    params: IndexMap<String, QueryValue>,
}

impl QueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `(key, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::new();
        for (key, value) in pairs {
            request.insert(key.as_ref(), value.into());
        }
        request
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string
    ///
    /// Undecodable input yields an empty request rather than an error.
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
        Self::from_pairs(pairs)
    }

    /// Insert one pair, expanding bracket notation
    pub fn insert(&mut self, key: &str, value: String) {
        let (root, path, append) = split_key(key);
        if root.is_empty() {
            return;
        }
        insert_path(&mut self.params, root, &path, append, value);
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Scalar text for a key
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(QueryValue::first_text)
    }

    /// All parameters that are not reserved keys
    pub fn filter_fields(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.params
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Split `a[b][c]` into (`a`, [`b`, `c`], false) and `a[]` into (`a`, [], true)
fn split_key(key: &str) -> (&str, Vec<&str>, bool) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new(), false);
    };
    if !key.ends_with(']') {
        return (key, Vec::new(), false);
    }

    let root = &key[..open];
    let mut segments: Vec<&str> = key[open + 1..key.len() - 1].split("][").collect();
    let append = segments.last().is_some_and(|s| s.is_empty());
    if append {
        segments.pop();
    }
    if segments.iter().any(|s| s.is_empty() || s.contains('[') || s.contains(']')) {
        return (key, Vec::new(), false);
    }
    (root, segments, append)
}

fn insert_path(
    map: &mut IndexMap<String, QueryValue>,
    key: &str,
    rest: &[&str],
    append: bool,
    value: String,
) {
    match rest.split_first() {
        None => {
            if let Some(existing) = map.get_mut(key)
                && !matches!(existing, QueryValue::Map(_))
            {
                existing.push(value);
                return;
            }
            let fresh = if append {
                QueryValue::List(vec![value])
            } else {
                QueryValue::Text(value)
            };
            map.insert(key.to_string(), fresh);
        }
        Some((next, tail)) => {
            let entry = map
                .entry(key.to_string())
                .or_insert_with(|| QueryValue::Map(IndexMap::new()));
            if !matches!(entry, QueryValue::Map(_)) {
                *entry = QueryValue::Map(IndexMap::new());
            }
            if let QueryValue::Map(inner) = entry {
                insert_path(inner, next, tail, append, value);
            }
        }
    }
}
