use crate::{
    error::RuntimeError,
    execution::{
        result::AlterResult,
        workers::{self, worker_count},
    },
};
use connectors::sql::base::adapter::SqlAdapter;
use model::{alter::statement::AlterStatement, core::selection::SelectionCriteria};
use planner::plan::{AlterPlanBuilder, ColumnCatalog};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct ApplyOptions {
    /// Upper bound on concurrent statements; `0` means one per statement.
    pub max_workers: usize,
    /// When set, nothing is sent to the server.
    pub dry_run: bool,
}

/// Applies every statement and returns exactly one result per statement.
///
/// A failing statement never stops the others.
pub async fn apply(
    adapter: Arc<dyn SqlAdapter>,
    statements: Vec<AlterStatement>,
    options: ApplyOptions,
    cancel: CancellationToken,
) -> Vec<AlterResult> {
    if options.dry_run {
        info!("Write mode is disabled, {} statements not executed", statements.len());
        return statements.into_iter().map(AlterResult::skipped).collect();
    }

    workers::spawn(adapter, statements, options.max_workers, cancel).await
}

/// Builds the plan for `criteria`, sizes the pool and applies it.
pub async fn run<A>(
    criteria: &SelectionCriteria,
    adapter: A,
    options: ApplyOptions,
    cancel: CancellationToken,
) -> Result<Vec<AlterResult>, RuntimeError>
where
    A: SqlAdapter + ColumnCatalog + 'static,
{
    AlterExecutor::new(criteria, options, cancel)
        .execute(adapter)
        .await
}

struct AlterExecutor<'a> {
    criteria: &'a SelectionCriteria,
    options: ApplyOptions,
    cancel: CancellationToken,
}

impl<'a> AlterExecutor<'a> {
    fn new(criteria: &'a SelectionCriteria, options: ApplyOptions, cancel: CancellationToken) -> Self {
        Self {
            criteria,
            options,
            cancel,
        }
    }

    async fn execute<A>(self, mut adapter: A) -> Result<Vec<AlterResult>, RuntimeError>
    where
        A: SqlAdapter + ColumnCatalog + 'static,
    {
        let statements = AlterPlanBuilder::new(self.criteria).build(&adapter).await?;

        if statements.is_empty() {
            info!("Nothing to do");
            return Ok(Vec::new());
        }

        let workers = worker_count(self.options.max_workers, statements.len());
        if !self.options.dry_run && adapter.max_connections() != workers {
            adapter.set_max_connections(workers).await?;
        }

        let adapter: Arc<dyn SqlAdapter> = Arc::new(adapter);
        let options = ApplyOptions {
            max_workers: workers,
            ..self.options
        };

        Ok(apply(adapter, statements, options, self.cancel).await)
    }
}
