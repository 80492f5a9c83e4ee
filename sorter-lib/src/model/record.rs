//! Dynamic source record

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Opaque, stable identity of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A child record as returned by the remote data source.
///
/// Records hold field values as a `HashMap<String, Value>`. A field whose
/// value is itself a record represents a one-hop relationship, reachable
/// through a dotted field spec (`Product__r.Name`).
///
/// # Example
///
/// ```
/// use sorter_lib::model::{SourceRecord, Value};
///
/// let record = SourceRecord::with_id("a0B1")
///     .set("Name", "Bolt")
///     .set("Product__r", SourceRecord::new().set("Name", "Fasteners"));
///
/// assert_eq!(record.resolve("Name"), Value::from("Bolt"));
/// assert_eq!(record.resolve("Product__r.Name"), Value::from("Fasteners"));
/// assert_eq!(record.resolve("Product__r.Missing"), Value::empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceRecord {
    /// The unique identifier of the record.
    pub(crate) id: Option<RecordId>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl SourceRecord {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given id.
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: HashMap::new(),
        }
    }

    /// Returns the record id, if set.
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Resolves a display field spec against this record.
    ///
    /// A bare key reads a direct field; `relation.field` reads a field of the
    /// nested related record. Anything that cannot be resolved (blank spec,
    /// more than one dot, missing relation or field, null value) yields
    /// [`Value::empty`]. Resolution never fails.
    pub fn resolve(&self, spec: &str) -> Value {
        let found = match FieldPath::parse(spec) {
            FieldPath::Direct(field) => self.get(field),
            FieldPath::Related { relation, field } => self
                .get(relation)
                .and_then(Value::as_record)
                .and_then(|related| related.get(field)),
            FieldPath::Invalid => None,
        };
        match found {
            Some(value) if !value.is_null() => value.clone(),
            _ => Value::empty(),
        }
    }
}

/// A parsed display field spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath<'a> {
    /// A field of the record itself.
    Direct(&'a str),
    /// A field of a related record.
    Related {
        /// Relationship field holding the related record.
        relation: &'a str,
        /// Field of the related record.
        field: &'a str,
    },
    /// A spec that cannot be resolved.
    Invalid,
}

impl<'a> FieldPath<'a> {
    /// Parses a field spec. Only one level of relationship is supported.
    pub fn parse(spec: &'a str) -> Self {
        if spec.is_empty() {
            return FieldPath::Invalid;
        }
        if !spec.contains('.') {
            return FieldPath::Direct(spec);
        }
        let mut parts = spec.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(relation), Some(field), None) => FieldPath::Related { relation, field },
            _ => FieldPath::Invalid,
        }
    }
}
