//! Value escaping.
//!
//! Numbers and NULL are structurally safe and are spliced into the SQL as literal
//! text. Everything else is bound through a `?` placeholder so the driver applies
//! its own escaping.

use crate::config::FragmentConfig;
use crate::error::{FragmentError, FragmentResult};
use crate::fragment::Fragment;
use crate::param::Param;
use crate::value::{Value, iso_string};

/// Escape a value with the default configuration.
///
/// # Example
/// ```ignore
/// let f = sqlfrag::escape(vec![sqlfrag::Value::from(1), "a".into()])?;
/// assert_eq!(f.sql(), "(1, ?)");
/// ```
pub fn escape(value: impl Into<Value>) -> FragmentResult<Fragment> {
    escape_with(value, &FragmentConfig::default())
}

/// Escape a value into a fragment.
///
/// The result is either inline literal text with no parameters (numbers, NULL)
/// or text containing placeholders with one parameter per placeholder. A raw
/// fragment comes back unchanged, parameters included, for the caller to splice.
pub fn escape_with(value: impl Into<Value>, config: &FragmentConfig) -> FragmentResult<Fragment> {
    let mut out = Fragment::empty();
    escape_into(&mut out, value.into(), config, 0)?;
    Ok(out)
}

pub(crate) fn escape_into(
    out: &mut Fragment,
    value: Value,
    config: &FragmentConfig,
    depth: usize,
) -> FragmentResult<()> {
    match value {
        Value::Number(n) if n.is_inline_safe() => out.push_str(&n.to_string()),
        Value::Null => out.push_str("NULL"),
        Value::List(items) => {
            let depth = enter_list(depth, config)?;
            out.push_str("(");
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                escape_into(out, item, config, depth)?;
            }
            out.push_str(")");
        }
        Value::Raw(fragment) => out.push_fragment(fragment),
        // NaN and infinities
        Value::Number(n) => out.push_bind(Param::Text(n.to_string())),
        Value::Timestamp(ts) => out.push_bind(Param::Text(iso_string(&ts))),
        Value::Record(json) => out.push_bind(Param::Text(json.to_string())),
        Value::Text(s) => out.push_bind(Param::Text(s)),
    }
    Ok(())
}

/// The single parameter a value binds to in `insert`/`update`.
///
/// Unlike [`escape_with`], numbers and NULL are bound rather than inlined, and a
/// list binds as one array parameter. A raw fragment binds its SQL text; its own
/// parameters are dropped.
pub(crate) fn bind_param(value: Value, config: &FragmentConfig, depth: usize) -> FragmentResult<Param> {
    match value {
        Value::Number(n) if n.is_inline_safe() => Ok(Param::Number(n)),
        Value::Null => Ok(Param::Null),
        Value::List(items) => {
            let depth = enter_list(depth, config)?;
            items
                .into_iter()
                .map(|item| bind_param(item, config, depth))
                .collect::<FragmentResult<Vec<_>>>()
                .map(Param::List)
        }
        Value::Raw(fragment) => Ok(Param::Text(fragment.sql().to_string())),
        Value::Number(n) => Ok(Param::Text(n.to_string())),
        Value::Timestamp(ts) => Ok(Param::Text(iso_string(&ts))),
        Value::Record(json) => Ok(Param::Text(json.to_string())),
        Value::Text(s) => Ok(Param::Text(s)),
    }
}

fn enter_list(depth: usize, config: &FragmentConfig) -> FragmentResult<usize> {
    let depth = depth + 1;
    if depth > config.max_depth {
        return Err(FragmentError::NestingTooDeep {
            max: config.max_depth,
        });
    }
    Ok(depth)
}
