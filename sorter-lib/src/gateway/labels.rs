//! Ordered field label mapping

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

/// Label of one display field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel {
    /// Field spec.
    pub key: String,
    /// Display label.
    pub label: String,
}

/// Field spec → label mapping that keeps the order the source emitted.
///
/// Serialized as a JSON object; the entry order of the object is the column
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldLabels(Vec<FieldLabel>);

impl FieldLabels {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a label, replacing the label of an existing key in place.
    pub fn push(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        match self.0.iter_mut().find(|l| l.key == key) {
            Some(existing) => existing.label = label,
            None => self.0.push(FieldLabel { key, label }),
        }
    }

    /// Returns the label for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|l| l.key == key).map(|l| l.label.as_str())
    }

    /// Iterates labels in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldLabel> {
        self.0.iter()
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for FieldLabels {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        let mut labels = FieldLabels::new();
        for (key, label) in iter {
            labels.push(key, label);
        }
        labels
    }
}

impl<'a> IntoIterator for &'a FieldLabels {
    type Item = &'a FieldLabel;
    type IntoIter = std::slice::Iter<'a, FieldLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for FieldLabels {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for label in &self.0 {
            map.serialize_entry(&label.key, &label.label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldLabels {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldLabelsVisitor)
    }
}

struct FieldLabelsVisitor;

impl<'de> Visitor<'de> for FieldLabelsVisitor {
    type Value = FieldLabels;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of field names to labels")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut labels = FieldLabels::new();
        while let Some((key, label)) = access.next_entry::<String, String>()? {
            labels.push(key, label);
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_replaces_in_place() {
        let mut labels: FieldLabels = [("Name", "Name"), ("Amount__c", "Amount")].into_iter().collect();
        labels.push("Name", "Item Name");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.iter().next().map(|l| l.label.as_str()), Some("Item Name"));
        assert_eq!(labels.get("Amount__c"), Some("Amount"));
    }

    #[test]
    fn test_serialize_in_order() {
        let labels: FieldLabels = [("b", "B"), ("a", "A")].into_iter().collect();
        assert_eq!(serde_json::to_string(&labels).unwrap(), r#"{"b":"B","a":"A"}"#);
    }
}
