//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::SourceRecord;

/// A dynamic value held by a field of a [`SourceRecord`].
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true / false | `Bool` |
/// | integer | `Int` |
/// | fractional number | `Decimal` (or `Float` if not representable) |
/// | string | `String` |
/// | object | `Record` (one-hop relationship) |
/// | array | `Json` |
///
/// # Example
///
/// ```
/// use sorter_lib::model::Value;
///
/// assert_eq!(Value::from("Widget").display(), "Widget");
/// assert_eq!(Value::from(3i64).display(), "3");
/// assert_eq!(Value::Null.display(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Exact decimal value.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Nested related record.
    Record(Box<SourceRecord>),
    /// Fallback for values without a dedicated variant.
    Json(serde_json::Value),
}

impl Value {
    /// The value used for cells that could not be resolved.
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the nested record, if this value is one.
    pub fn as_record(&self) -> Option<&SourceRecord> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns a numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Returns the text a table cell shows for this value.
    ///
    /// Null and nested records display as an empty string.
    pub fn display(&self) -> String {
        match self {
            Value::Null | Value::Record(_) => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Json(j) => j.to_string(),
        }
    }

    /// Orders values for sorting by a sort-order field.
    ///
    /// Numbers compare numerically, everything else by display text.
    /// Nulls sort last.
    pub fn cmp_for_sort(&self, other: &Value) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => self.display().cmp(&other.display()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Ok(d) = n.to_string().parse::<Decimal>() {
                    Value::Decimal(d)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Json(n.into()))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Object(map) => Value::Record(Box::new(SourceRecord::from_json_map(map))),
            other => Value::Json(other),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Decimal(d) => match exact_f64(d) {
                Some(f) => serializer.serialize_f64(f),
                None => serializer.serialize_str(&d.to_string()),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Record(r) => r.serialize(serializer),
            Value::Json(j) => j.serialize(serializer),
        }
    }
}

/// Returns the decimal as an `f64` if the conversion loses nothing.
fn exact_f64(d: &Decimal) -> Option<f64> {
    let f = d.to_f64()?;
    let back = Decimal::from_f64(f)?;
    (back.normalize() == d.normalize()).then_some(f)
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<SourceRecord> for Value {
    fn from(v: SourceRecord) -> Self {
        Value::Record(Box::new(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(serde_json::json!(3)), Value::Int(3));
        assert_eq!(
            Value::from(serde_json::json!(1250.5)),
            Value::Decimal("1250.5".parse().unwrap())
        );
        assert_eq!(Value::from(serde_json::json!(1250.5)).display(), "1250.5");
    }

    #[test]
    fn test_from_json_object_is_record() {
        let value = Value::from(serde_json::json!({"Id": "01t1", "Name": "Bolt"}));
        let record = value.as_record().unwrap();
        assert_eq!(record.id().map(|id| id.as_str()), Some("01t1"));
        assert_eq!(record.get("Name"), Some(&Value::from("Bolt")));
        assert_eq!(value.display(), "");
    }

    #[test]
    fn test_sort_comparison() {
        assert_eq!(Value::from(2i64).cmp_for_sort(&Value::from(10i64)), Ordering::Less);
        assert_eq!(
            Value::from(2.5).cmp_for_sort(&Value::Decimal("2.5".parse().unwrap())),
            Ordering::Equal
        );
        assert_eq!(Value::Null.cmp_for_sort(&Value::from(1i64)), Ordering::Greater);
        assert_eq!(Value::from("b").cmp_for_sort(&Value::from("a")), Ordering::Greater);
    }

    #[test]
    fn test_decimal_serializes_as_number() {
        let amount = Value::Decimal("1250.5".parse().unwrap());
        let json = serde_json::to_value(&amount).unwrap();
        assert_eq!(json, serde_json::json!(1250.5));
        assert_eq!(Value::from(json), amount);
    }

    #[test]
    fn test_decimal_beyond_f64_serializes_as_string() {
        let precise: Decimal = "12345678901234567890.123456789".parse().unwrap();
        let json = serde_json::to_value(Value::Decimal(precise)).unwrap();
        assert_eq!(json, serde_json::json!("12345678901234567890.123456789"));
    }

    #[test]
    fn test_serialize_scalars_and_records() {
        let record = SourceRecord::with_id("01t1").set("Name", "Bolt");
        assert_eq!(serde_json::to_value(Value::Null).unwrap(), serde_json::Value::Null);
        assert_eq!(serde_json::to_value(Value::from(3i64)).unwrap(), serde_json::json!(3));
        assert_eq!(serde_json::to_value(Value::from("x")).unwrap(), serde_json::json!("x"));
        assert_eq!(
            serde_json::to_value(Value::from(record)).unwrap(),
            serde_json::json!({"Id": "01t1", "Name": "Bolt"})
        );
    }
}
