//! Bound parameter values handed to the execution layer.

use crate::value::Number;
use serde::Serialize;

/// A single bound value, one per `?` in a fragment's SQL.
///
/// Only a few shapes reach the driver: everything the escaper cannot inline
/// is already coerced to text (timestamps to ISO-8601, records to JSON).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    /// SQL NULL
    Null,
    /// Numeric value (bound by `insert`/`update`, never by the composer)
    Number(Number),
    /// Text value
    Text(String),
    /// List value bound as a single array parameter
    List(Vec<Param>),
}

impl Param {
    /// Returns `true` for [`Param::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }

    /// Returns the text if this is a [`Param::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Param::Number`].
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Param::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<Number> for Param {
    fn from(value: Number) -> Self {
        Param::Number(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Number(Number::Int(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(Number::Float(value))
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(values: Vec<T>) -> Self {
        Param::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert!(Param::Null.is_null());
        assert_eq!(Param::from("a").as_str(), Some("a"));
        assert_eq!(Param::from(3_i64).as_number(), Some(Number::Int(3)));
        assert_eq!(Param::from(3_i64).as_str(), None);
    }

    #[test]
    fn serializes_untagged() {
        let params = vec![
            Param::Null,
            Param::from(1_i64),
            Param::from(1.5),
            Param::from("x"),
            Param::from(vec!["a", "b"]),
        ];
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"[null,1,1.5,"x",["a","b"]]"#
        );
    }
}
