//! Example demonstrating sqlfrag's builders and template composition.
//!
//! Run with:
//!   cargo run --example compose -p sqlfrag

use chrono::Utc;
use serde::Serialize;
use sqlfrag::{Columns, FragmentResult, Value, insert, query, select, table, update};

#[derive(Debug)]
struct Filters {
    status: Option<String>,
    roles_any_of: Vec<String>,
    min_age: Option<i32>,
}

#[derive(Serialize)]
struct NewUser<'a> {
    name: &'a str,
    status: &'a str,
    age: i32,
    settings: serde_json::Value,
}

fn build_list_users(filters: &Filters) -> FragmentResult<sqlfrag::Fragment> {
    let mut q = query("SELECT ")
        .value(select(&["id", "name", "status"]))
        .sql(" FROM ")
        .value(table("users"))
        .sql(" WHERE 1=1");

    if let Some(status) = &filters.status {
        q = q.sql(" AND \"status\" = ").value(status);
    }
    if !filters.roles_any_of.is_empty() {
        q = q.sql(" AND \"role\" IN ").value(filters.roles_any_of.clone());
    }
    if let Some(age) = filters.min_age {
        q = q.sql(" AND \"age\" >= ").value(age);
    }

    q.sql(" ORDER BY \"created_at\" DESC").build()
}

fn main() -> FragmentResult<()> {
    let filters = Filters {
        status: Some("active".to_string()),
        roles_any_of: vec!["admin".to_string(), "owner".to_string()],
        min_age: Some(18),
    };

    let list = build_list_users(&filters)?;
    println!("list sql:\n  {}", list);
    println!("  numbered: {}", list.to_numbered_sql());
    println!("  params = {:?}\n", list.params());

    let data = Columns::from_serialize(&NewUser {
        name: "alice",
        status: "active",
        age: 30,
        settings: serde_json::json!({"theme": "dark"}),
    })?;
    let create = sqlfrag::query!("INSERT INTO {} {} RETURNING \"id\"", table("users"), insert(&data)?)?;
    println!("insert sql:\n  {}", create);
    println!("  params = {}\n", serde_json::to_string(create.params())?);

    let changes = Columns::new()
        .set("status", "inactive")
        .set("updated_at", Utc::now())
        .set("deleted_at", Value::Null);
    let deactivate = query("UPDATE ")
        .value(table("users"))
        .sql(" SET ")
        .value(update(&changes)?)
        .sql(" WHERE \"id\" = ")
        .value(42)
        .build()?;
    println!("update sql:\n  {}", deactivate);
    println!("  params = {:?}", deactivate.params());

    Ok(())
}
