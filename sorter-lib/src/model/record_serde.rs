//! Custom serialization for SourceRecord.
//!
//! Records travel as flat JSON objects:
//! - The identity is stored under `"Id"` (`"id"` is accepted on read)
//! - Related records are nested objects: `"Product__r": {"Name": "Bolt"}`
//! - Type metadata under `"attributes"` is ignored on read

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::RecordId;
use super::SourceRecord;
use super::Value;

const ID_KEYS: [&str; 2] = ["Id", "id"];
const METADATA_KEY: &str = "attributes";

impl SourceRecord {
    /// Builds a record from a decoded JSON object.
    pub fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut record = SourceRecord::new();
        for (key, value) in map {
            record.accept(key, value);
        }
        record
    }

    fn accept(&mut self, key: String, value: serde_json::Value) {
        if key == METADATA_KEY {
            return;
        }
        if ID_KEYS.contains(&key.as_str())
            && let Some(id) = id_from_json(&value)
        {
            self.id = Some(id);
            return;
        }
        self.fields.insert(key, Value::from(value));
    }
}

fn id_from_json(value: &serde_json::Value) -> Option<RecordId> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(RecordId::new(s.clone())),
        serde_json::Value::Number(n) => Some(RecordId::new(n.to_string())),
        _ => None,
    }
}

impl Serialize for SourceRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.fields.len() + usize::from(self.id.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(id) = &self.id {
            map.serialize_entry(ID_KEYS[0], id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SourceRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SourceRecordVisitor)
    }
}

struct SourceRecordVisitor;

impl<'de> Visitor<'de> for SourceRecordVisitor {
    type Value = SourceRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a record object")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = SourceRecord::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            record.accept(key, value);
        }
        Ok(record)
    }
}
