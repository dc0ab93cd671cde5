//! Schemaless property bags
//!
//! Persons, groups and events all carry arbitrary JSON properties. The
//! `Properties` wrapper keeps that map behind a small API so call sites do
//! not depend on the backing collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property bag keyed by property name
///
/// Keys iterate in sorted order, which keeps serialized forms canonical.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    data: serde_json::Map<String, Value>,
}

impl Properties {
    /// Create an empty property bag
    pub fn new() -> Self {
        Self {
            data: serde_json::Map::new(),
        }
    }

    /// Build from a JSON value; non-object input yields an empty bag
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            _ => Self::new(),
        }
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get a property as a string slice, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Set a property value
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// Remove a property, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Check whether a property is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Iterate over properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for Properties {
    fn from(data: serde_json::Map<String, Value>) -> Self {
        Self { data }
    }
}

impl From<Properties> for serde_json::Map<String, Value> {
    fn from(properties: Properties) -> Self {
        properties.data
    }
}
