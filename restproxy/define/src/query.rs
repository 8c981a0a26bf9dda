//! Ordered query parameter bindings.
//!
//! Query keys keep their insertion order, and so do the values of each key.
//! That order is carried verbatim into the generated query string.

use serde::{Deserialize, Serialize};

use crate::types::ValueRef;

/// One query key with its ordered value references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEntry {
    pub key: String,
    #[serde(default)]
    pub values: Vec<ValueRef>,
}

/// Ordered mapping from query key to value references.
///
/// ## Examples
///
/// ```
/// use restproxy_define::QueryParams;
///
/// let mut query = QueryParams::new();
/// query.push("tag", "first_tag");
/// query.push("limit", "limit");
/// query.push("tag", "second_tag");
///
/// let keys: Vec<_> = query.iter().map(|(key, _)| key).collect();
/// assert_eq!(keys, vec!["tag", "limit"]);
/// assert_eq!(query.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<QueryEntry>", into = "Vec<QueryEntry>")]
pub struct QueryParams {
    entries: Vec<QueryEntry>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to `key`, adding the key at the end if it is new.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ValueRef>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.values.push(value),
            None => self.entries.push(QueryEntry {
                key,
                values: vec![value],
            }),
        }
    }

    /// Total number of `(key, value)` pairs across all keys.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|entry| entry.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates keys in insertion order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValueRef])> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.values.as_slice()))
    }

    /// Iterates every `(key, value)` pair, key-major.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &ValueRef)> {
        self.entries.iter().flat_map(|entry| {
            entry
                .values
                .iter()
                .map(move |value| (entry.key.as_str(), value))
        })
    }
}

impl From<Vec<QueryEntry>> for QueryParams {
    fn from(entries: Vec<QueryEntry>) -> Self {
        let mut query = QueryParams::new();
        for entry in entries {
            for value in entry.values {
                query.push(entry.key.clone(), value);
            }
        }
        query
    }
}

impl From<QueryParams> for Vec<QueryEntry> {
    fn from(query: QueryParams) -> Self {
        query.entries
    }
}
