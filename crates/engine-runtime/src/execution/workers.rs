use crate::{
    error::ExecutionError,
    execution::result::AlterResult,
};
use connectors::sql::base::adapter::SqlAdapter;
use model::alter::statement::AlterStatement;
use std::{collections::HashSet, sync::Arc};
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Statement queue shared by all workers.
type StatementQueue = Arc<Mutex<mpsc::Receiver<AlterStatement>>>;

/// `0` means one worker per statement; there are never more workers than statements.
pub fn worker_count(max_workers: usize, statements: usize) -> usize {
    if max_workers == 0 {
        statements
    } else {
        max_workers.min(statements)
    }
}

/// Runs `statements` on a fixed pool of workers and collects one result per statement.
///
/// Completion order is not preserved.
pub async fn spawn(
    adapter: Arc<dyn SqlAdapter>,
    statements: Vec<AlterStatement>,
    max_workers: usize,
    cancel: CancellationToken,
) -> Vec<AlterResult> {
    let total = statements.len();
    let workers = worker_count(max_workers, total);
    if workers == 0 {
        return Vec::new();
    }

    info!("Kicking off {} workers for {} statements", workers, total);

    let (stmt_tx, stmt_rx) = mpsc::channel::<AlterStatement>(workers);
    let (result_tx, mut result_rx) = mpsc::channel::<AlterResult>(workers);
    let queue: StatementQueue = Arc::new(Mutex::new(stmt_rx));

    let mut pool = JoinSet::new();
    for id in 0..workers {
        pool.spawn(run_worker(
            id,
            adapter.clone(),
            queue.clone(),
            result_tx.clone(),
            cancel.clone(),
        ));
    }
    // only workers hold senders now, so the channel closes once they are all gone
    drop(result_tx);

    let pending = statements.clone();
    let dispatcher = tokio::spawn(async move {
        for statement in statements {
            if stmt_tx.send(statement).await.is_err() {
                error!("All workers exited before the queue was drained");
                break;
            }
        }
    });

    let mut results = Vec::with_capacity(total);
    while let Some(result) = result_rx.recv().await {
        match result.error() {
            Some(err) => error!("Error running query on table {}: {}", result.table(), err),
            None => info!(
                "Table {} complete, {} rows",
                result.table(),
                result.rows_affected()
            ),
        }
        results.push(result);
    }

    if let Err(err) = dispatcher.await {
        error!("Statement dispatcher failed: {}", err);
    }
    while let Some(joined) = pool.join_next().await {
        if let Err(err) = joined {
            error!("Worker task failed: {}", err);
        }
    }

    if results.len() < total {
        backfill_missing(&mut results, pending);
    }

    results
}

// A panicking worker loses the statement it held; report it instead of dropping it.
fn backfill_missing(results: &mut Vec<AlterResult>, pending: Vec<AlterStatement>) {
    let seen: HashSet<(String, String)> = results
        .iter()
        .map(|r| (r.statement().schema().to_string(), r.table().to_string()))
        .collect();

    for statement in pending {
        let key = (statement.schema().to_string(), statement.table().to_string());
        if !seen.contains(&key) {
            warn!("No result reported for table {}", statement.table());
            let reason = format!("no result reported for table '{}'", statement.table());
            results.push(AlterResult::failed(statement, ExecutionError::Worker(reason)));
        }
    }
}

async fn run_worker(
    id: usize,
    adapter: Arc<dyn SqlAdapter>,
    queue: StatementQueue,
    results: mpsc::Sender<AlterResult>,
    cancel: CancellationToken,
) {
    loop {
        let next = {
            let mut rx = queue.lock().await;
            rx.recv().await
        };
        let Some(statement) = next else {
            break;
        };

        let result = if cancel.is_cancelled() {
            let table = statement.table().to_string();
            AlterResult::failed(statement, ExecutionError::Cancelled { table })
        } else {
            execute(adapter.as_ref(), statement, &cancel).await
        };

        if results.send(result).await.is_err() {
            warn!("Worker {} could not report a result, result sink closed", id);
            break;
        }
    }
}

/// Executes one statement, turning every failure into a result.
pub async fn execute(
    adapter: &dyn SqlAdapter,
    statement: AlterStatement,
    cancel: &CancellationToken,
) -> AlterResult {
    info!("Working on {}", statement.table());

    let outcome = tokio::select! {
        _ = cancel.cancelled() => None,
        res = adapter.exec(statement.sql()) => Some(res),
    };

    info!("Finished {}", statement.table());

    let table = statement.table().to_string();
    match outcome {
        None => {
            warn!("Alter of {} abandoned after cancellation", table);
            AlterResult::failed(statement, ExecutionError::Cancelled { table })
        }
        Some(Err(source)) => AlterResult::failed(statement, ExecutionError::Exec { table, source }),
        Some(Ok(res)) => match res.rows_affected() {
            Ok(rows) => AlterResult::applied(statement, rows),
            Err(source) => {
                AlterResult::failed(statement, ExecutionError::RowsAffected { table, source })
            }
        },
    }
}
