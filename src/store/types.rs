use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Sort order understood by the store: a field name, `-` prefixed for
/// descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub field: String,
    pub descending: bool,
}

impl OrderSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Reverse-chronological by creation time, the order every page uses
    pub fn newest_first() -> Self {
        Self::descending("created_date")
    }
}

impl Default for OrderSpec {
    fn default() -> Self {
        Self::newest_first()
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// Exact-field predicate object for `filter` calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyQuery {
    fields: Map<String, Value>,
}

impl PropertyQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query matching a single identifier
    pub fn by_id(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self::new().with("id", id)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a serialized record carries every field of the query with an
    /// equal value
    pub fn matches(&self, record: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

/// How many records each page asks the store for
pub mod limits {
    pub const CATALOG: usize = 100;
    pub const HOME: usize = 50;
    pub const DETAIL_RELATED: usize = 50;
    pub const CONTACT: usize = 100;
}
