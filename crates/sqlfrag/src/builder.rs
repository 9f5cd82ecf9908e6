//! Fragment builders: `table`, `select`, `insert`, `update`.
//!
//! Identifiers are wrapped in double quotes and never escaped or validated; they
//! are assumed to be caller-controlled. Every value, raw fragments included,
//! binds exactly one `?`, so placeholders always match columns one to one.
//!
//! ```ignore
//! use sqlfrag::{Columns, insert, update};
//!
//! let data = Columns::new().set("foo", "bar");
//! assert_eq!(insert(&data)?.sql(), r#"("foo") VALUES (?)"#);
//! assert_eq!(update(&data)?.sql(), r#""foo" = ?"#);
//! ```

use crate::columns::{ColumnList, Columns};
use crate::config::FragmentConfig;
use crate::error::FragmentResult;
use crate::escape::bind_param;
use crate::fragment::Fragment;
use crate::trace;

fn push_ident(out: &mut Fragment, name: &str) {
    out.push_str("\"");
    out.push_str(name);
    out.push_str("\"");
}

/// Quote a table name: `"name"`.
pub fn table(name: &str) -> Fragment {
    let mut out = Fragment::empty();
    push_ident(&mut out, name);
    trace::fragment_built("table", &out, &FragmentConfig::default());
    out
}

/// Comma-separated, quoted column list from a [`Columns`] map or a list of names.
///
/// Values in a [`Columns`] map are ignored.
pub fn select<C: ColumnList + ?Sized>(data: &C) -> Fragment {
    let mut out = Fragment::empty();
    for (i, name) in data.column_names().into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_ident(&mut out, name);
    }
    trace::fragment_built("select", &out, &FragmentConfig::default());
    out
}

/// `("a", "b") VALUES (?, ?)` with one bound parameter per column.
pub fn insert(data: &Columns) -> FragmentResult<Fragment> {
    insert_with(data, &FragmentConfig::default())
}

/// [`insert`] with an explicit configuration.
pub fn insert_with(data: &Columns, config: &FragmentConfig) -> FragmentResult<Fragment> {
    let mut out = Fragment::empty();
    out.push_str("(");
    for (i, name) in data.names().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_ident(&mut out, name);
    }
    out.push_str(") VALUES (");
    for (i, (_, value)) in data.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_bind(bind_param(value.clone(), config, 0)?);
    }
    out.push_str(")");
    trace::fragment_built("insert", &out, config);
    Ok(out)
}

/// `"a" = ?, "b" = ?` with one bound parameter per column.
pub fn update(data: &Columns) -> FragmentResult<Fragment> {
    update_with(data, &FragmentConfig::default())
}

/// [`update`] with an explicit configuration.
pub fn update_with(data: &Columns, config: &FragmentConfig) -> FragmentResult<Fragment> {
    let mut out = Fragment::empty();
    for (i, (name, value)) in data.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_ident(&mut out, name);
        out.push_str(" = ");
        out.push_bind(bind_param(value.clone(), config, 0)?);
    }
    trace::fragment_built("update", &out, config);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FragmentError;
    use crate::fragment::raw;
    use crate::param::Param;
    use crate::value::{Number, Value};

    #[test]
    fn table_quotes_name() {
        let t = table("testName");
        assert_eq!(t.sql(), r#""testName""#);
        assert!(t.params().is_empty());
    }

    #[test]
    fn table_is_idempotent() {
        assert_eq!(table("x"), table("x"));
    }

    #[test]
    fn table_does_not_escape_quotes() {
        assert_eq!(table(r#"a"b"#).sql(), r#""a"b""#);
    }

    #[test]
    fn select_from_columns_ignores_values() {
        let data = Columns::new().set("foo", "foo").set("bar", 123);
        let f = select(&data);
        assert_eq!(f.sql(), r#""foo", "bar""#);
        assert!(f.params().is_empty());
    }

    #[test]
    fn select_from_names() {
        assert_eq!(select(&["foo", "bar"]).sql(), r#""foo", "bar""#);
        assert_eq!(select(&vec!["id".to_string()]).sql(), r#""id""#);
        assert_eq!(select::<[&str]>(&[]).sql(), "");
    }

    #[test]
    fn insert_single_column() {
        let f = insert(&Columns::new().set("foo", "bar")).unwrap();
        assert_eq!(f.sql(), r#"("foo") VALUES (?)"#);
        assert_eq!(f.params(), &[Param::from("bar")]);
    }

    #[test]
    fn insert_binds_every_value_in_key_order() {
        let data = Columns::new()
            .set("name", "alice")
            .set("age", 30)
            .set("deleted_at", None::<String>);
        let f = insert(&data).unwrap();
        assert_eq!(f.sql(), r#"("name", "age", "deleted_at") VALUES (?, ?, ?)"#);
        assert_eq!(
            f.params(),
            &[
                Param::from("alice"),
                Param::Number(Number::Int(30)),
                Param::Null
            ]
        );
        assert!(f.validate().is_ok());
    }

    #[test]
    fn insert_binds_lists_as_one_param() {
        let data = Columns::new().set("tags", vec!["a", "b"]);
        let f = insert(&data).unwrap();
        assert_eq!(f.sql(), r#"("tags") VALUES (?)"#);
        assert_eq!(f.params(), &[Param::from(vec!["a", "b"])]);
    }

    #[test]
    fn insert_binds_raw_values_as_text() {
        let data = Columns::new()
            .set("a", 1)
            .set("created_at", raw("NOW() - ?::interval", vec![Param::from("1 day")]))
            .set("b", "x");
        let f = insert(&data).unwrap();
        assert_eq!(f.sql(), r#"("a", "created_at", "b") VALUES (?, ?, ?)"#);
        assert_eq!(f.sql().matches('?').count(), data.len());
        assert_eq!(
            f.params(),
            &[
                Param::from(1_i64),
                Param::from("NOW() - ?::interval"),
                Param::from("x")
            ]
        );
    }

    #[test]
    fn insert_empty() {
        let f = insert(&Columns::new()).unwrap();
        assert_eq!(f.sql(), "() VALUES ()");
        assert!(f.params().is_empty());
    }

    #[test]
    fn update_single_column() {
        let f = update(&Columns::new().set("foo", "bar")).unwrap();
        assert_eq!(f.sql(), r#""foo" = ?"#);
        assert_eq!(f.params(), &[Param::from("bar")]);
    }

    #[test]
    fn update_multiple_columns_with_raw() {
        let data = Columns::new()
            .set("status", "inactive")
            .set("updated_at", raw("NOW()", vec![]))
            .set("score", 1.5);
        let f = update(&data).unwrap();
        assert_eq!(f.sql(), r#""status" = ?, "updated_at" = ?, "score" = ?"#);
        assert_eq!(f.sql().matches('?').count(), data.len());
        assert_eq!(
            f.params(),
            &[Param::from("inactive"), Param::from("NOW()"), Param::from(1.5)]
        );
    }

    #[test]
    fn update_binds_raw_inside_list() {
        let stamps = vec![Value::from(raw("NOW()", vec![])), Value::from(1)];
        let data = Columns::new().set("stamps", stamps);
        let f = update(&data).unwrap();
        assert_eq!(f.sql(), r#""stamps" = ?"#);
        assert_eq!(
            f.params(),
            &[Param::List(vec![Param::from("NOW()"), Param::from(1_i64)])]
        );
    }

    #[test]
    fn update_empty() {
        assert!(update(&Columns::new()).unwrap().is_empty());
    }

    #[test]
    fn depth_limit_applies_to_bound_lists() {
        let config = FragmentConfig::new().max_depth(1);
        let data = Columns::new().set("matrix", vec![vec![1]]);
        let err = update_with(&data, &config).unwrap_err();
        assert_eq!(err, FragmentError::NestingTooDeep { max: 1 });
        assert!(insert_with(&Columns::new().set("v", vec![1]), &config).is_ok());
    }
}
