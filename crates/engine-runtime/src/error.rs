use connectors::sql::base::error::{ConnectorError, DbError};
use planner::error::PlanError;
use thiserror::Error;

/// Top-level errors for a planning + apply run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The plan could not be built; nothing was altered.
    #[error("Failed to build execution plan: {0}")]
    Plan(#[from] PlanError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),
}

/// Failure of a single statement. Never aborts sibling statements.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Failed to alter table '{table}': {source}")]
    Exec {
        table: String,
        #[source]
        source: DbError,
    },

    #[error("Failed to read affected rows for table '{table}': {source}")]
    RowsAffected {
        table: String,
        #[source]
        source: DbError,
    },

    #[error("Alter of table '{table}' was cancelled")]
    Cancelled { table: String },

    #[error("Worker error: {0}")]
    Worker(String),
}
