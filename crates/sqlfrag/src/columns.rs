//! Ordered column → value input for `select`, `insert` and `update`.

use crate::error::{FragmentError, FragmentResult};
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Column names mapped to values, in insertion order.
///
/// Insertion order is the order columns are emitted in. Setting a column that is
/// already present replaces its value and keeps its position. Two maps are
/// equal only when their columns appear in the same order.
///
/// # Example
/// ```ignore
/// use sqlfrag::Columns;
///
/// let data = Columns::new()
///     .set("username", "alice")
///     .set("age", 30)
///     .set_opt("nickname", None::<&str>);
/// assert_eq!(data.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Columns {
    entries: IndexMap<String, Value>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<Value>>(self, column: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Insert a column value, returning the previous value if the column existed.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(column.into(), value.into())
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries.get(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Build from a JSON object, keeping its key order.
    pub fn from_json(json: serde_json::Value) -> FragmentResult<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(FragmentError::validation(format!(
                "expected a JSON object for column data, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Build from any serializable struct or map. Struct fields keep their
    /// declaration order.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> FragmentResult<Self> {
        Self::from_json(serde_json::to_value(data)?)
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl PartialEq for Columns {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Columns {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut columns = Columns::new();
        for (column, value) in iter {
            columns.insert(column, value);
        }
        columns
    }
}

impl IntoIterator for Columns {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Anything `select` can list columns from.
pub trait ColumnList {
    fn column_names(&self) -> Vec<&str>;
}

impl ColumnList for Columns {
    fn column_names(&self) -> Vec<&str> {
        self.names().collect()
    }
}

impl<S: AsRef<str>> ColumnList for [S] {
    fn column_names(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>, const N: usize> ColumnList for [S; N] {
    fn column_names(&self) -> Vec<&str> {
        self.as_slice().column_names()
    }
}

impl<S: AsRef<str>> ColumnList for Vec<S> {
    fn column_names(&self) -> Vec<&str> {
        self.as_slice().column_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order() {
        let data = Columns::new().set("b", 1).set("a", 2).set("c", 3);
        assert_eq!(data.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn resetting_a_column_keeps_its_position() {
        let mut data = Columns::new().set("a", 1).set("b", 2);
        let old = data.insert("a", "x");
        assert_eq!(old, Some(Value::from(1)));
        assert_eq!(data.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(data.get("a"), Some(&Value::from("x")));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = Columns::new().set("a", 1).set("b", 2);
        let ba = Columns::new().set("b", 2).set("a", 1);
        assert_ne!(ab, ba);
        assert_eq!(ab, Columns::new().set("a", 0).set("b", 2).set("a", 1));
    }

    #[test]
    fn lookup_in_wide_maps() {
        let data: Columns = (0..500).map(|i| (format!("c{i}"), i)).collect();
        assert_eq!(data.get("c499"), Some(&Value::from(499)));
        assert_eq!(data.names().next(), Some("c0"));
        assert!(data.get("c500").is_none());
    }

    #[test]
    fn set_opt_skips_none() {
        let data = Columns::new()
            .set_opt("a", Some(1))
            .set_opt("b", None::<i32>);
        assert_eq!(data.len(), 1);
        assert!(data.get("b").is_none());
    }

    #[test]
    fn from_json_object() {
        let data = Columns::from_json(json!({"z": 1, "a": "x", "m": null})).unwrap();
        assert_eq!(data.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(data.get("m"), Some(&Value::Null));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let err = Columns::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            FragmentError::Validation("expected a JSON object for column data, got an array".into())
        );
    }

    #[test]
    fn from_serialize_keeps_field_order() {
        #[derive(Serialize)]
        struct NewUser<'a> {
            username: &'a str,
            age: u32,
            email: Option<&'a str>,
        }

        let data = Columns::from_serialize(&NewUser {
            username: "alice",
            age: 30,
            email: None,
        })
        .unwrap();
        assert_eq!(
            data.names().collect::<Vec<_>>(),
            vec!["username", "age", "email"]
        );
        assert_eq!(data.get("age"), Some(&Value::from(30_i64)));
    }

    #[test]
    fn column_lists() {
        assert_eq!(["a", "b"].column_names(), vec!["a", "b"]);
        assert_eq!(
            vec!["x".to_string()].column_names(),
            vec!["x"]
        );
        let data: Columns = vec![("k", 1)].into_iter().collect();
        assert_eq!(data.column_names(), vec!["k"]);
    }
}
