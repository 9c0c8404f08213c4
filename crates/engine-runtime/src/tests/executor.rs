use super::mock::{MockAdapter, int_column, statements};
use crate::{
    error::ExecutionError,
    execution::{
        executor::{ApplyOptions, apply, run},
        result::NOT_EXECUTED,
        workers::worker_count,
    },
};
use connectors::sql::base::adapter::SqlAdapter;
use model::core::{intent::Intent, selection::SelectionCriteria};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

fn options(max_workers: usize, dry_run: bool) -> ApplyOptions {
    ApplyOptions {
        max_workers,
        dry_run,
    }
}

#[test]
fn test_worker_count() {
    assert_eq!(worker_count(0, 7), 7);
    assert_eq!(worker_count(5, 3), 3);
    assert_eq!(worker_count(2, 10), 2);
    assert_eq!(worker_count(0, 0), 0);
}

#[tokio::test]
async fn test_dry_run_sends_nothing() {
    for max_workers in [0, 1, 10] {
        let mock = MockAdapter::new();
        let stats = mock.stats.clone();
        let adapter: Arc<dyn SqlAdapter> = Arc::new(mock);

        let results = apply(
            adapter,
            statements(&["a", "b", "c"]),
            options(max_workers, true),
            CancellationToken::new(),
        )
        .await;

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(results.iter().all(|r| r.rows_affected() == NOT_EXECUTED));
        assert_eq!(stats.calls(), 0);
    }
}

#[tokio::test]
async fn test_empty_input_yields_no_results() {
    let adapter: Arc<dyn SqlAdapter> = Arc::new(MockAdapter::new());
    let results = apply(adapter, Vec::new(), options(5, false), CancellationToken::new()).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_single_failure_is_isolated() {
    let mock = MockAdapter::new().failing_on("b");
    let stats = mock.stats.clone();
    let adapter: Arc<dyn SqlAdapter> = Arc::new(mock);

    let results = apply(
        adapter,
        statements(&["a", "b", "c", "d"]),
        options(2, false),
        CancellationToken::new(),
    )
    .await;

    assert_eq!(results.len(), 4);
    assert_eq!(stats.calls(), 4);

    let failed: Vec<_> = results.iter().filter(|r| !r.is_ok()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].table(), "b");
    assert_eq!(failed[0].rows_affected(), NOT_EXECUTED);
    assert!(matches!(failed[0].error(), Some(ExecutionError::Exec { table, .. }) if table == "b"));

    for ok in results.iter().filter(|r| r.is_ok()) {
        assert_eq!(ok.rows_affected(), 0);
    }
}

#[tokio::test]
async fn test_unrepresentable_row_count_is_a_failure() {
    let adapter: Arc<dyn SqlAdapter> = Arc::new(MockAdapter::new().overflowing_on("big"));

    let results = apply(
        adapter,
        statements(&["big", "small"]),
        options(1, false),
        CancellationToken::new(),
    )
    .await;

    let big = results.iter().find(|r| r.table() == "big").unwrap();
    assert!(matches!(big.error(), Some(ExecutionError::RowsAffected { .. })));
    let small = results.iter().find(|r| r.table() == "small").unwrap();
    assert!(small.is_ok());
}

#[tokio::test]
async fn test_concurrency_stays_within_bound() {
    let mock = MockAdapter::new().with_delay(Duration::from_millis(20));
    let stats = mock.stats.clone();
    let adapter: Arc<dyn SqlAdapter> = Arc::new(mock);

    let results = apply(
        adapter,
        statements(&["a", "b", "c", "d", "e", "f"]),
        options(2, false),
        CancellationToken::new(),
    )
    .await;

    assert_eq!(results.len(), 6);
    assert_eq!(stats.calls(), 6);
    assert!(stats.max_in_flight() <= 2);
}

#[tokio::test]
async fn test_unbounded_workers_run_in_parallel() {
    let mock = MockAdapter::new().with_delay(Duration::from_millis(100));
    let stats = mock.stats.clone();
    let adapter: Arc<dyn SqlAdapter> = Arc::new(mock);

    let results = apply(
        adapter,
        statements(&["a", "b", "c", "d"]),
        options(0, false),
        CancellationToken::new(),
    )
    .await;

    assert_eq!(results.len(), 4);
    assert!(stats.max_in_flight() > 1);
    assert!(stats.max_in_flight() <= 4);
}

#[tokio::test]
async fn test_every_statement_is_executed_once() {
    let mock = MockAdapter::new();
    let stats = mock.stats.clone();
    let adapter: Arc<dyn SqlAdapter> = Arc::new(mock);
    let stmts = statements(&["a", "b", "c"]);
    let expected: Vec<String> = stmts.iter().map(|s| s.sql().to_string()).collect();

    apply(adapter, stmts, options(3, false), CancellationToken::new()).await;

    let mut executed = stats.executed.lock().unwrap().clone();
    executed.sort();
    assert_eq!(executed, expected);
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let mock = MockAdapter::new();
    let stats = mock.stats.clone();
    let adapter: Arc<dyn SqlAdapter> = Arc::new(mock);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let results = apply(adapter, statements(&["a", "b", "c"]), options(2, false), cancel).await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_cancelled()));
    assert_eq!(stats.calls(), 0);
}

#[tokio::test]
async fn test_cancel_interrupts_in_flight_statements() {
    let adapter: Arc<dyn SqlAdapter> =
        Arc::new(MockAdapter::new().with_delay(Duration::from_secs(30)));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let results = tokio::time::timeout(
        Duration::from_secs(5),
        apply(adapter, statements(&["a", "b", "c", "d"]), options(2, false), cancel),
    )
    .await
    .expect("apply did not stop after cancellation");

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.is_cancelled()));
}

#[tokio::test]
async fn test_run_plans_and_sizes_pool() {
    let mock = MockAdapter::new().with_columns(vec![
        int_column("orders", "id"),
        int_column("items", "id"),
    ]);
    let stats = mock.stats.clone();

    let criteria = SelectionCriteria::new("shop")
        .with_tables("orders,items")
        .with_columns("id")
        .with_auto_increment(Intent::Add);

    let results = run(&criteria, mock, options(5, false), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(stats.pool_size(), 2);
    assert_eq!(stats.calls(), 2);

    let orders = results.iter().find(|r| r.table() == "orders").unwrap();
    assert!(orders.statement().sql().starts_with("ALTER TABLE `shop`.`orders`"));
    assert!(orders.statement().sql().contains("AUTO_INCREMENT"));
}

#[tokio::test]
async fn test_run_dry_run_leaves_pool_alone() {
    let mock = MockAdapter::new().with_columns(vec![int_column("orders", "id")]);
    let stats = mock.stats.clone();

    let criteria = SelectionCriteria::new("shop")
        .with_columns("id")
        .with_auto_increment(Intent::Add);

    let results = run(&criteria, mock, options(5, true), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rows_affected(), NOT_EXECUTED);
    assert_eq!(stats.pool_size(), 0);
    assert_eq!(stats.calls(), 0);
}

#[tokio::test]
async fn test_run_rejects_invalid_selection() {
    let mock = MockAdapter::new();
    let stats = mock.stats.clone();

    let criteria = SelectionCriteria::new("shop");
    let err = run(&criteria, mock, options(5, false), CancellationToken::new()).await;

    assert!(matches!(err, Err(crate::error::RuntimeError::Plan(_))));
    assert_eq!(stats.calls(), 0);
}
