//! Template-style query composition.
//!
//! A template is literal SQL text interleaved with values ("holes"). Literal text
//! is appended verbatim. Each hole is escaped: numbers and NULL are inlined, raw
//! fragments are spliced with their parameters, and everything else becomes a `?`
//! with one bound parameter.
//!
//! Three equivalent entry points:
//!
//! ```ignore
//! use sqlfrag::{compose, query, table, Value};
//!
//! // Fluent builder
//! let q = query("SELECT * FROM ")
//!     .value(table("test"))
//!     .sql(" WHERE \"foo\" = ")
//!     .value(123)
//!     .sql(" AND \"bar\" = ")
//!     .value("test")
//!     .build()?;
//!
//! // Explicit segments and holes
//! let q = compose(
//!     &["SELECT * FROM ", " WHERE \"foo\" = "],
//!     vec![table("test").into(), Value::from(123)],
//! )?;
//!
//! // Format-style macro, `{}` marks a hole
//! let q = sqlfrag::query!("SELECT * FROM {} WHERE \"foo\" = {}", table("test"), 123)?;
//! ```

use crate::config::FragmentConfig;
use crate::error::{FragmentError, FragmentResult};
use crate::escape::escape_into;
use crate::fragment::Fragment;
use crate::trace;
use crate::value::Value;

/// Fluent template builder. Always holds one more text segment than values.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    segments: Vec<String>,
    holes: Vec<Value>,
}

/// Start a template with an initial text segment.
pub fn query(initial_sql: impl Into<String>) -> Query {
    Query::new(initial_sql)
}

impl Query {
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            segments: vec![initial_sql.into()],
            holes: Vec::new(),
        }
    }

    /// Append literal SQL text.
    pub fn sql(mut self, text: &str) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.push_str(text);
        }
        self
    }

    /// Append a value hole.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.holes.push(value.into());
        self.segments.push(String::new());
        self
    }

    /// Append values separated by `separator`, e.g. for `VALUES (...)` rows.
    pub fn values<I, V>(mut self, values: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self = self.sql(separator);
            }
            self = self.value(value);
        }
        self
    }

    /// Number of holes so far.
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Compose with the default configuration.
    pub fn build(self) -> FragmentResult<Fragment> {
        self.build_with(&FragmentConfig::default())
    }

    /// Compose with an explicit configuration.
    pub fn build_with(self, config: &FragmentConfig) -> FragmentResult<Fragment> {
        compose_parts(self.segments, self.holes, config)
    }
}

/// Compose from explicit text segments and holes.
///
/// `segments.len()` must be `holes.len() + 1`.
pub fn compose<S: AsRef<str>>(segments: &[S], holes: Vec<Value>) -> FragmentResult<Fragment> {
    compose_with(segments, holes, &FragmentConfig::default())
}

/// [`compose`] with an explicit configuration.
pub fn compose_with<S: AsRef<str>>(
    segments: &[S],
    holes: Vec<Value>,
    config: &FragmentConfig,
) -> FragmentResult<Fragment> {
    compose_parts(segments.iter().map(AsRef::<str>::as_ref), holes, config)
}

/// Compose from a template where `{}` marks a hole.
///
/// `{{` and `}}` produce literal braces. Used by the [`query!`](crate::query!) macro.
pub fn format_query(template: &str, holes: Vec<Value>) -> FragmentResult<Fragment> {
    format_query_with(template, holes, &FragmentConfig::default())
}

/// [`format_query`] with an explicit configuration.
pub fn format_query_with(
    template: &str,
    holes: Vec<Value>,
    config: &FragmentConfig,
) -> FragmentResult<Fragment> {
    let segments = split_template(template)?;
    compose_parts(segments, holes, config)
}

fn compose_parts<I, S>(segments: I, holes: Vec<Value>, config: &FragmentConfig) -> FragmentResult<Fragment>
where
    I: IntoIterator<Item = S>,
    I::IntoIter: ExactSizeIterator,
    S: AsRef<str>,
{
    let segments = segments.into_iter();
    if segments.len() != holes.len() + 1 {
        return Err(FragmentError::TemplateMismatch {
            segments: segments.len(),
            holes: holes.len(),
        });
    }

    let mut out = Fragment::empty();
    let mut holes = holes.into_iter();
    for segment in segments {
        out.push_str(segment.as_ref());
        if let Some(hole) = holes.next() {
            escape_into(&mut out, hole, config, 0)?;
        }
    }
    trace::fragment_built("query", &out, config);
    Ok(out)
}

/// Split a template on `{}`, unescaping `{{` and `}}`.
fn split_template(template: &str) -> FragmentResult<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let next = chars.peek().map(|&(_, next)| next);
        match (c, next) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                current.push(c);
            }
            ('{', Some('}')) => {
                chars.next();
                segments.push(std::mem::take(&mut current));
            }
            ('{' | '}', _) => {
                return Err(FragmentError::validation(format!(
                    "unmatched '{c}' at byte {pos} in query template"
                )));
            }
            _ => current.push(c),
        }
    }
    segments.push(current);
    Ok(segments)
}

/// Compose a fragment from a format-style template, where `{}` marks a hole.
///
/// Each hole argument is converted with `Value::from`. Returns
/// `FragmentResult<Fragment>`; a hole/argument count mismatch is a
/// [`FragmentError::TemplateMismatch`].
///
/// ```ignore
/// let f = sqlfrag::query!("SELECT * FROM {} WHERE id IN {}", sqlfrag::table("t"), vec![1, 2])?;
/// assert_eq!(f.sql(), r#"SELECT * FROM "t" WHERE id IN (1, 2)"#);
/// ```
#[macro_export]
macro_rules! query {
    ($template:expr $(, $hole:expr)* $(,)?) => {
        $crate::compose::format_query(
            $template,
            ::std::vec![$($crate::Value::from($hole)),*],
        )
    };
}
