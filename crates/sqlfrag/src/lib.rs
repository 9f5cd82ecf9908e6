//! # sqlfrag
//!
//! Parameter-safe SQL fragments.
//!
//! ## Features
//!
//! - **Values never become SQL text**: strings, timestamps and records are always
//!   bound through a `?` placeholder. Only numbers and `NULL` are inlined.
//! - **Identifiers are verbatim**: `table`, `select`, `insert` and `update` wrap
//!   names in double quotes and trust the caller.
//! - **Composable**: a [`Fragment`] nested in another keeps its parameters in
//!   placeholder order.
//! - **No execution**: a fragment is `(sql, params)`, handed to whatever runs it.
//!   The `postgres` feature adds `tokio-postgres` binding.
//!
//! ## Example
//!
//! ```ignore
//! use sqlfrag::{Columns, insert, query, table};
//!
//! let data = Columns::new().set("username", "alice").set("age", 30);
//!
//! let q = query("INSERT INTO ")
//!     .value(table("users"))
//!     .sql(" ")
//!     .value(insert(&data)?)
//!     .build()?;
//!
//! assert_eq!(q.sql(), r#"INSERT INTO "users" ("username", "age") VALUES (?, ?)"#);
//! assert_eq!(q.params().len(), 2);
//!
//! let q = sqlfrag::query!("SELECT * FROM {} WHERE id IN {}", table("users"), vec![1, 2, 3])?;
//! assert_eq!(q.sql(), r#"SELECT * FROM "users" WHERE id IN (1, 2, 3)"#);
//! ```

pub mod builder;
pub mod columns;
pub mod compose;
pub mod config;
pub mod error;
pub mod escape;
pub mod fragment;
pub mod param;
pub mod value;

mod trace;

#[cfg(feature = "postgres")]
mod postgres;

pub use builder::{insert, insert_with, select, table, update, update_with};
pub use columns::{ColumnList, Columns};
pub use compose::{compose, compose_with, format_query, format_query_with, query, Query};
pub use config::FragmentConfig;
pub use error::{FragmentError, FragmentResult};
pub use escape::{escape, escape_with};
pub use fragment::{raw, Fragment};
pub use param::Param;
pub use value::{Number, Value};
