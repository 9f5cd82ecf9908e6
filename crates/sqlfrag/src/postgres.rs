//! `tokio-postgres` binding for fragment parameters.
//!
//! Enable with the crate feature: `sqlfrag = { features = ["postgres"] }`.
//!
//! ```ignore
//! let f = sqlfrag::query!("SELECT * FROM users WHERE name = {}", "alice")?;
//! let rows = client.query(&f.to_numbered_sql(), &f.params_ref()).await?;
//! ```
//!
//! [`Param`] accepts any column type and converts at bind time, because the
//! escaper has already coerced timestamps and records to text. A value that does
//! not fit the target type fails the bind with an error rather than sending
//! mismatched bytes.

use crate::fragment::Fragment;
use crate::param::Param;
use crate::value::Number;
use bytes::BytesMut;
use chrono::{DateTime, Utc};
use std::error::Error;
use tokio_postgres::types::{IsNull, Kind, ToSql, Type};

type BoxError = Box<dyn Error + Sync + Send>;

impl Fragment {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params()
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

impl ToSql for Param {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Param::Null => Ok(IsNull::Yes),
            Param::Number(n) => number_to_sql(*n, ty, out),
            Param::Text(s) => text_to_sql(s, ty, out),
            Param::List(items) => match ty.kind() {
                Kind::Array(_) => items.as_slice().to_sql(ty, out),
                _ => Err(format!("cannot bind a list to {}", ty).into()),
            },
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

fn is_text_type(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN
    )
}

fn number_to_sql(n: Number, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(integral(n)?)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(integral(n)?)?.to_sql(ty, out),
        Type::INT8 => integral(n)?.to_sql(ty, out),
        Type::FLOAT4 => (float(n) as f32).to_sql(ty, out),
        Type::FLOAT8 => float(n).to_sql(ty, out),
        _ if is_text_type(ty) => n.to_string().to_sql(ty, out),
        _ => Err(format!("cannot bind number {} to {}", n, ty).into()),
    }
}

fn integral(n: Number) -> Result<i64, BoxError> {
    match n {
        Number::Int(v) => Ok(v),
        Number::UInt(v) => Ok(i64::try_from(v)?),
        Number::Float(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
            Ok(v as i64)
        }
        Number::Float(v) => Err(format!("{} is not an integer", v).into()),
    }
}

fn float(n: Number) -> f64 {
    match n {
        Number::Int(v) => v as f64,
        Number::UInt(v) => v as f64,
        Number::Float(v) => v,
    }
}

fn text_to_sql(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        _ if is_text_type(ty) => s.to_sql(ty, out),
        Type::JSON | Type::JSONB => serde_json::from_str::<serde_json::Value>(s)?.to_sql(ty, out),
        Type::TIMESTAMPTZ => DateTime::parse_from_rfc3339(s)?
            .with_timezone(&Utc)
            .to_sql(ty, out),
        Type::TIMESTAMP => DateTime::parse_from_rfc3339(s)?.naive_utc().to_sql(ty, out),
        Type::UUID => uuid::Uuid::parse_str(s)?.to_sql(ty, out),
        Type::BOOL => s.parse::<bool>()?.to_sql(ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 => {
            number_to_sql(Number::Int(s.parse::<i64>()?), ty, out)
        }
        Type::FLOAT4 | Type::FLOAT8 => number_to_sql(Number::Float(s.parse::<f64>()?), ty, out),
        _ => Err(format!("cannot bind text to {}", ty).into()),
    }
}
