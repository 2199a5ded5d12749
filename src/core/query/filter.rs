//! Filter predicates derived from list-query parameters
//!
//! Operator mappings are rewritten structurally: a parameter whose value is a
//! mapping made only of `gt`, `gte`, `lt`, `lte` or `in` keys becomes a
//! comparison. Everything else is an equality match, so a plain string such as
//! `"login"` or `"legacy"` is never read as an operator.

use crate::core::entity::Visibility;
use crate::core::field::FieldValue;
use crate::core::query::request::{QueryRequest, QueryValue};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Comparison operators accepted in bracket notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl CompareOp {
    /// Parse a bare operator name; anything else is not an operator
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "gt" => Some(CompareOp::Gt),
            "gte" => Some(CompareOp::Gte),
            "lt" => Some(CompareOp::Lt),
            "lte" => Some(CompareOp::Lte),
            "in" => Some(CompareOp::In),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
            CompareOp::In => "in",
        }
    }

    /// Native operator form used by document stores (`$gte`, `$in`, ...)
    pub fn native(&self) -> &'static str {
        match self {
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
            CompareOp::In => "$in",
        }
    }

    /// Shape the raw operand; `in` always takes a list
    fn operand(&self, value: &QueryValue) -> Value {
        match (self, value) {
            (CompareOp::In, QueryValue::Text(s)) => Value::Array(
                s.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| Value::String(part.to_string()))
                    .collect(),
            ),
            (CompareOp::In, QueryValue::Map(_)) => Value::Array(vec![value.to_json()]),
            _ => value.to_json(),
        }
    }

    /// Evaluate against a stored value
    pub fn test(&self, stored: &Value, operand: &Value) -> bool {
        if let CompareOp::In = self {
            return match operand {
                Value::Array(candidates) => candidates.iter().any(|c| value_matches(stored, c)),
                single => value_matches(stored, single),
            };
        }

        if let Value::Array(items) = stored {
            return items.iter().any(|item| self.test(item, operand));
        }

        let Some(ordering) = FieldValue::from_json(stored).compare_to_query(operand) else {
            return false;
        };
        match self {
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
            CompareOp::In => unreachable!("handled above"),
        }
    }
}

/// Condition on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value (an array field matches if any element does)
    Eq(Value),
    /// Every comparison must hold
    Compare(Vec<(CompareOp, Value)>),
}

impl Condition {
    /// Build from a raw parameter value
    pub fn from_query(value: &QueryValue) -> Self {
        match value {
            QueryValue::Map(map)
                if !map.is_empty() && map.keys().all(|k| CompareOp::parse(k).is_some()) =>
            {
                Condition::Compare(
                    map.iter()
                        .filter_map(|(k, v)| CompareOp::parse(k).map(|op| (op, op.operand(v))))
                        .collect(),
                )
            }
            // Repeated scalar keys select any of the given values
            QueryValue::List(_) => Condition::Compare(vec![(CompareOp::In, value.to_json())]),
            other => Condition::Eq(other.to_json()),
        }
    }

    /// Evaluate against a stored value (`None` when the field is absent)
    pub fn matches(&self, stored: Option<&Value>) -> bool {
        let stored = stored.unwrap_or(&Value::Null);
        match self {
            Condition::Eq(expected) => value_matches(stored, expected),
            Condition::Compare(ops) => ops.iter().all(|(op, operand)| op.test(stored, operand)),
        }
    }
}

/// Equality under query coercion, with document-store array semantics
pub(crate) fn value_matches(stored: &Value, expected: &Value) -> bool {
    if stored == expected {
        return true;
    }
    match (stored, expected) {
        (Value::Array(items), _) => items.iter().any(|item| value_matches(item, expected)),
        (_, Value::Object(_)) | (Value::Object(_), _) => false,
        _ => FieldValue::from_json(stored).matches_query(expected),
    }
}

/// Resolve a dotted path (`dimensions.width`) inside a document
pub(crate) fn lookup_path<'a>(document: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = document.get(path) {
        return Some(value);
    }
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Full-text constraint ANDed with the structural filter
#[derive(Debug, Clone, PartialEq)]
pub struct TextSearch {
    query: String,
    terms: Vec<String>,
    fields: Vec<String>,
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| Regex::new(r"\w+").unwrap())
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    word_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

impl TextSearch {
    pub fn new(query: &str, fields: &[&str]) -> Self {
        Self {
            query: query.to_string(),
            terms: words(query).collect(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Whether `query` holds at least one searchable word
    pub fn has_terms(query: &str) -> bool {
        words(query).next().is_some()
    }

    /// The search string as supplied by the caller
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lowercased search terms
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Fields searched
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// A document matches when any term occurs as a word in any text field
    pub fn matches(&self, document: &Map<String, Value>) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        self.fields
            .iter()
            .filter_map(|field| lookup_path(document, field))
            .any(|value| self.value_contains_term(value))
    }

    fn value_contains_term(&self, value: &Value) -> bool {
        match value {
            Value::String(text) => words(text).any(|w| self.terms.contains(&w)),
            Value::Array(items) => items.iter().any(|item| self.value_contains_term(item)),
            _ => false,
        }
    }
}

/// Structural filter: field conditions plus an optional text search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: IndexMap<String, Condition>,
    text: Option<TextSearch>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter fields of a request (reserved keys stripped, operators rewritten)
    pub fn from_request(request: &QueryRequest) -> Self {
        let conditions = request
            .filter_fields()
            .map(|(field, value)| (field.clone(), Condition::from_query(value)))
            .collect();
        Self {
            conditions,
            text: None,
        }
    }

    /// Require `field == value`, replacing any existing condition on the field
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .insert(field.to_string(), Condition::Eq(value.into()));
        self
    }

    /// Add a comparison on a field
    pub fn compare(mut self, field: &str, op: CompareOp, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.conditions.get_mut(field) {
            Some(Condition::Compare(ops)) => ops.push((op, value)),
            _ => {
                self.conditions
                    .insert(field.to_string(), Condition::Compare(vec![(op, value)]));
            }
        }
        self
    }

    /// Force the visibility field to its public value, overriding the caller
    pub fn restrict_to_public(self, rule: &Visibility) -> Self {
        self.eq(rule.field, rule.public_json())
    }

    /// Attach a text-search constraint
    pub fn with_text_search(mut self, search: TextSearch) -> Self {
        self.text = Some(search);
        self
    }

    pub fn condition(&self, field: &str) -> Option<&Condition> {
        self.conditions.get(field)
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&String, &Condition)> {
        self.conditions.iter()
    }

    pub fn text(&self) -> Option<&TextSearch> {
        self.text.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.text.is_none()
    }

    /// Evaluate against a stored document
    pub fn matches(&self, document: &Map<String, Value>) -> bool {
        self.conditions
            .iter()
            .all(|(field, condition)| condition.matches(lookup_path(document, field)))
            && self.text.as_ref().is_none_or(|t| t.matches(document))
    }
}
