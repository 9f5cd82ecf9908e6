//! Fragment logging via `tracing`.
//!
//! Enable with the crate feature: `sqlfrag = { features = ["tracing"] }`. Each built
//! fragment emits one `TRACE` event on the `sqlfrag.fragment` target. Without the
//! feature these calls compile to nothing.

use crate::config::FragmentConfig;
use crate::fragment::Fragment;

#[cfg(feature = "tracing")]
pub(crate) fn fragment_built(kind: &'static str, fragment: &Fragment, config: &FragmentConfig) {
    let sql = truncate_sql(fragment.sql(), config.max_log_sql_length);
    tracing::trace!(
        target: "sqlfrag.fragment",
        kind,
        param_count = fragment.params().len(),
        sql = %sql,
    );
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn fragment_built(_kind: &'static str, _fragment: &Fragment, _config: &FragmentConfig) {}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

/// Cut at `max_bytes`, backing off to the previous char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
