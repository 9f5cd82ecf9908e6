//! Domain values accepted by the escaper, the builders and the composer.
//!
//! [`Value`] is a closed set of shapes. Every Rust input is converted into one of
//! them through `From`, and the escaper matches on the variant to decide between
//! an inline literal and a bound parameter.
//!
//! ```ignore
//! use sqlfrag::Value;
//!
//! let values: Vec<Value> = vec![1.into(), "a".into(), None::<i32>.into()];
//! ```

use crate::error::FragmentResult;
use crate::fragment::Fragment;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

/// A numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is a float NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_nan())
    }

    /// Whether the number's text is valid SQL numeric syntax.
    ///
    /// NaN and the infinities are not; they are bound as text instead.
    pub fn is_inline_safe(&self) -> bool {
        match self {
            Number::Int(_) | Number::UInt(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Float(v) if v.is_nan() => f.write_str("NaN"),
            Number::Float(v) if v.is_infinite() => {
                f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0.0 prints as "0"
            Number::Float(v) if v == 0.0 => f.write_str("0"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A value to be escaped.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Inlined as its decimal text (unless NaN or infinite).
    Number(Number),
    /// Inlined as `NULL`.
    Null,
    /// Escaped element-wise into `(a, b, ...)`.
    List(Vec<Value>),
    /// Spliced verbatim with its parameters by the escaper. `insert` and
    /// `update` bind its SQL text instead.
    Raw(Fragment),
    /// Bound as an ISO-8601 UTC string.
    Timestamp(DateTime<Utc>),
    /// Bound as JSON text.
    Record(serde_json::Value),
    /// Bound as-is. Catch-all for anything coerced to a string.
    Text(String),
}

impl Value {
    /// Serialize any value into a [`Value::Record`].
    pub fn json<T: Serialize + ?Sized>(value: &T) -> FragmentResult<Self> {
        Ok(Value::Record(serde_json::to_value(value)?))
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Millisecond-precision ISO-8601 with a `Z` suffix, e.g. `2024-01-02T03:04:05.000Z`.
pub(crate) fn iso_string(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty => $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Number(Number::$variant(value as $wide))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64 => i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64 => u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Value::Text(value.hyphenated().to_string())
    }
}

impl From<Fragment> for Value {
    fn from(value: Fragment) -> Self {
        Value::Raw(value)
    }
}

impl From<&Fragment> for Value {
    fn from(value: &Fragment) -> Self {
        Value::Raw(value.clone())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::Timestamp(value.with_timezone(&Utc))
    }
}

/// Naive timestamps are taken to be UTC.
impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value.and_utc())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::from(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::UInt(u))
                } else if let Some(f) = n.as_f64() {
                    Value::Number(Number::Float(f))
                } else {
                    Value::Text(n.to_string())
                }
            }
            Json::String(s) => Value::Text(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            object @ Json::Object(_) => Value::Record(object),
        }
    }
}
