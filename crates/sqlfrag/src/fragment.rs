//! The raw fragment: SQL text plus its positional parameters.
//!
//! Every builder and the composer produce a [`Fragment`]. Its SQL uses `?` as the
//! placeholder marker and `params()[i]` binds to the i-th `?` from the left.
//!
//! # Example
//!
//! ```ignore
//! use sqlfrag::raw;
//!
//! let f = raw("SET \"foo\" = ?", vec!["foo".into()]);
//! assert_eq!(f.sql(), "SET \"foo\" = ?");
//! ```

use crate::error::{FragmentError, FragmentResult};
use crate::param::Param;
use serde::Serialize;
use std::fmt;

/// SQL text that is final and safe to splice as-is, with its bound parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fragment {
    sql: String,
    params: Vec<Param>,
}

/// Create a caller-trusted fragment. The SQL is not inspected.
pub fn raw(sql: impl Into<String>, params: Vec<Param>) -> Fragment {
    Fragment::new(sql, params)
}

impl Fragment {
    /// Create a fragment from SQL text and its parameters.
    pub fn new(sql: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create an empty fragment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The SQL text, with `?` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters, in placeholder order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Split into SQL text and parameters.
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params)
    }

    /// `true` if there is neither SQL text nor parameters.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.params.is_empty()
    }

    /// Count `?` markers outside quoted literals, quoted identifiers and comments.
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        scan_placeholders(&self.sql, |_| count += 1);
        count
    }

    /// Check that the placeholder count matches the parameter count.
    pub fn validate(&self) -> FragmentResult<()> {
        let placeholders = self.placeholder_count();
        if placeholders != self.params.len() {
            return Err(FragmentError::PlaceholderMismatch {
                placeholders,
                params: self.params.len(),
            });
        }
        Ok(())
    }

    /// Render SQL with `$1, $2, ...` placeholders instead of `?`.
    pub fn to_numbered_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + self.params.len() * 2);
        let mut last = 0;
        let mut idx: usize = 0;
        scan_placeholders(&self.sql, |pos| {
            idx += 1;
            out.push_str(&self.sql[last..pos]);
            use std::fmt::Write;
            let _ = write!(&mut out, "${}", idx);
            last = pos + 1;
        });
        out.push_str(&self.sql[last..]);
        out
    }

    /// Concatenate fragments with a separator, keeping each fragment's
    /// parameters contiguous and in order.
    pub fn join(fragments: impl IntoIterator<Item = Fragment>, separator: &str) -> Fragment {
        let mut out = Fragment::empty();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_fragment(fragment);
        }
        out
    }

    pub(crate) fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub(crate) fn push_bind(&mut self, param: Param) {
        self.sql.push('?');
        self.params.push(param);
    }

    pub(crate) fn push_fragment(&mut self, other: Fragment) {
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Call `on_placeholder` with the byte offset of every `?` that is a placeholder.
///
/// Skips `'...'` literals, `"..."` identifiers, `-- ...` line comments and
/// `/* ... */` block comments. Doubled quotes inside literals fall out of the
/// state machine naturally (close then reopen).
fn scan_placeholders(sql: &str, mut on_placeholder: impl FnMut(usize)) {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Literal,
        Ident,
        LineComment,
        BlockComment,
    }

    let bytes = sql.as_bytes();
    let mut state = State::Code;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            State::Code => match b {
                b'?' => on_placeholder(i),
                b'\'' => state = State::Literal,
                b'"' => state = State::Ident,
                b'-' if next == Some(b'-') => {
                    state = State::LineComment;
                    i += 1;
                }
                b'/' if next == Some(b'*') => {
                    state = State::BlockComment;
                    i += 1;
                }
                _ => {}
            },
            State::Literal if b == b'\'' => state = State::Code,
            State::Ident if b == b'"' => state = State::Code,
            State::LineComment if b == b'\n' => state = State::Code,
            State::BlockComment if b == b'*' && next == Some(b'/') => {
                state = State::Code;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_keeps_sql_and_params() {
        let f = raw(r#"SET "foo" = ?"#, vec![Param::from("foo")]);
        assert_eq!(f.sql(), r#"SET "foo" = ?"#);
        assert_eq!(f.params(), &[Param::from("foo")]);
        assert_eq!(f.to_string(), r#"SET "foo" = ?"#);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn empty_fragment() {
        let f = Fragment::empty();
        assert!(f.is_empty());
        assert_eq!(f.placeholder_count(), 0);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn placeholders_inside_quotes_and_comments_are_ignored() {
        let f = raw(
            "SELECT '?', \"a?\", 'it''s ?' FROM t -- ?\nWHERE a = ? /* ? */ AND b = ?",
            vec![Param::from(1_i64), Param::from(2_i64)],
        );
        assert_eq!(f.placeholder_count(), 2);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn validate_reports_mismatch() {
        let f = raw("a = ? AND b = ?", vec![Param::Null]);
        assert_eq!(
            f.validate(),
            Err(FragmentError::PlaceholderMismatch {
                placeholders: 2,
                params: 1
            })
        );
    }

    #[test]
    fn numbered_sql_renders_in_order() {
        let f = raw(
            "SELECT * FROM t WHERE a = ? AND b = '?' AND c IN (?, ?)",
            vec![Param::Null, Param::Null, Param::Null],
        );
        assert_eq!(
            f.to_numbered_sql(),
            "SELECT * FROM t WHERE a = $1 AND b = '?' AND c IN ($2, $3)"
        );
    }

    #[test]
    fn join_keeps_params_contiguous() {
        let a = raw("a = ?", vec![Param::from("x")]);
        let b = raw("b = ?, c = ?", vec![Param::from("y"), Param::from("z")]);
        let joined = Fragment::join([a, b], ", ");
        assert_eq!(joined.sql(), "a = ?, b = ?, c = ?");
        assert_eq!(
            joined.params(),
            &[Param::from("x"), Param::from("y"), Param::from("z")]
        );
    }

    #[test]
    fn serializes_sql_and_params() {
        let f = raw("a = ?", vec![Param::from("x")]);
        assert_eq!(
            serde_json::to_string(&f).unwrap(),
            r#"{"sql":"a = ?","params":["x"]}"#
        );
    }
}
