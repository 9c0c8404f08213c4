#![allow(dead_code)]

use super::{mysql_pool, test_mysql_url};
use connectors::sql::{base::adapter::SqlAdapter, mysql::adapter::MySqlAdapter};
use engine_runtime::execution::{
    executor::{ApplyOptions, run},
    result::AlterResult,
};
use model::core::selection::SelectionCriteria;
use mysql_async::prelude::*;
use tokio_util::sync::CancellationToken;

/// Column facts as the server reports them after a run.
#[derive(Debug)]
pub struct ColumnInfo {
    pub column_type: String,
    pub nullable: bool,
    pub extra: String,
    pub collation: Option<String>,
}

/// Drop & recreate `schema`, then run each DDL statement inside it.
pub async fn reset_schema(schema: &str, ddl: &[&str]) {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("mysql connection");

    conn.query_drop(format!("DROP DATABASE IF EXISTS `{schema}`"))
        .await
        .expect("drop schema");
    conn.query_drop(format!("CREATE DATABASE `{schema}`"))
        .await
        .expect("create schema");
    conn.query_drop(format!("USE `{schema}`"))
        .await
        .expect("use schema");

    for stmt in ddl {
        conn.query_drop(*stmt).await.expect("run ddl");
    }

    drop(conn);
    pool.disconnect().await.ok();
}

pub async fn drop_schema(schema: &str) {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("mysql connection");
    conn.query_drop(format!("DROP DATABASE IF EXISTS `{schema}`"))
        .await
        .expect("drop schema");
    drop(conn);
    pool.disconnect().await.ok();
}

/// Build the plan for `criteria` and apply it against the test server.
pub async fn alter(criteria: &SelectionCriteria, write: bool) -> Vec<AlterResult> {
    let adapter = MySqlAdapter::connect(&test_mysql_url())
        .await
        .expect("connect adapter");
    let options = ApplyOptions {
        max_workers: 2,
        dry_run: !write,
    };

    run(criteria, adapter, options, CancellationToken::new())
        .await
        .expect("run alteration")
}

pub async fn column_info(schema: &str, table: &str, column: &str) -> ColumnInfo {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("mysql connection");

    let row: Option<(String, String, String, Option<String>)> = conn
        .exec_first(
            r#"SELECT COLUMN_TYPE, IS_NULLABLE, EXTRA, COLLATION_NAME
               FROM information_schema.COLUMNS
               WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND COLUMN_NAME = ?"#,
            (schema, table, column),
        )
        .await
        .expect("query column");

    drop(conn);
    pool.disconnect().await.ok();

    let (column_type, is_nullable, extra, collation) =
        row.unwrap_or_else(|| panic!("column {schema}.{table}.{column} not found"));
    ColumnInfo {
        column_type,
        nullable: is_nullable == "YES",
        extra,
        collation,
    }
}

pub async fn table_collation(schema: &str, table: &str) -> String {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("mysql connection");

    let collation: Option<String> = conn
        .exec_first(
            "SELECT TABLE_COLLATION FROM information_schema.TABLES WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?",
            (schema, table),
        )
        .await
        .expect("query table");

    drop(conn);
    pool.disconnect().await.ok();

    collation.unwrap_or_else(|| panic!("table {schema}.{table} not found"))
}

pub fn assert_all_ok(results: &[AlterResult]) {
    for result in results {
        assert!(
            result.is_ok(),
            "table {} failed: {:?}",
            result.table(),
            result.error()
        );
    }
}
