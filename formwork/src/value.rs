//! Dynamic values held by field controllers and forms.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A scalar value held by a single control.
///
/// # Example
///
/// ```
/// use formwork::Value;
///
/// let name = Value::from("Joe");
/// let age = Value::from(42.0);
/// let agreed = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean value (checkboxes).
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for null and empty strings.
    ///
    /// `false` and `0` are values, not the absence of one.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Length in characters, for values that have one.
    pub fn char_len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    /// Returns the string slice if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
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
        Value::Number(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// The value of one top-level form entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Value of a single field.
    Scalar(Value),
    /// Values of a repeatable field, in item order.
    List(Vec<Value>),
}

impl FieldValue {
    /// Returns the scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            FieldValue::List(_) => None,
        }
    }

    /// Returns the list of values, if this is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            FieldValue::List(v) => Some(v),
            FieldValue::Scalar(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Scalar(v)
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(v: Vec<Value>) -> Self {
        FieldValue::List(v)
    }
}

/// Ordered mapping from field key to value.
///
/// Entries keep declaration order, both in memory and when serialized, so
/// `{"first": ..., "second": ...}` round-trips in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValue {
    entries: Vec<(String, FieldValue)>,
}

impl FormValue {
    /// Create an empty form value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a key, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for FormValue {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut value = FormValue::new();
        for (k, v) in iter {
            value.insert(k, v);
        }
        value
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormValueVisitor;

        impl<'de> Visitor<'de> for FormValueVisitor {
            type Value = FormValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FormValue, A::Error> {
                let mut value = FormValue::new();
                while let Some((k, v)) = access.next_entry::<String, FieldValue>()? {
                    value.insert(k, v);
                }
                Ok(value)
            }
        }

        deserializer.deserialize_map(FormValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(!Value::from(" ").is_empty());
        assert!(!Value::from(false).is_empty());
        assert!(!Value::from(0).is_empty());
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(Value::from("héllo").char_len(), Some(5));
        assert_eq!(Value::from(12.5).char_len(), None);
        assert_eq!(Value::Null.char_len(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_form_value_keeps_order() {
        let value = FormValue::new()
            .with("zeta", Value::from("z"))
            .with("alpha", vec![Value::from("a"), Value::from("b")]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"zeta":"z","alpha":["a","b"]}"#);

        let parsed: FormValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_form_value_insert_replaces_in_place() {
        let mut value = FormValue::new().with("a", Value::from(1)).with("b", Value::from(2));
        value.insert("a", Value::from(3));
        assert_eq!(value.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(value.get("a"), Some(&FieldValue::Scalar(Value::from(3))));
    }
}
