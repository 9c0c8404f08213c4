use crate::sql::base::error::{ConnectorError, DbError};
use async_trait::async_trait;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    affected_rows: u64,
}

impl ExecResult {
    pub fn new(affected_rows: u64) -> Self {
        Self { affected_rows }
    }

    pub fn rows_affected(&self) -> Result<i64, DbError> {
        i64::try_from(self.affected_rows).map_err(|_| {
            DbError::RowsAffected(format!(
                "{} does not fit into a signed 64-bit count",
                self.affected_rows
            ))
        })
    }
}

/// The connection boundary the engine depends on.
///
/// Implementations own a connection pool that is safe to share between workers.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    async fn connect(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    async fn ping(&self) -> Result<(), DbError>;

    async fn exec(&self, sql: &str) -> Result<ExecResult, DbError>;

    /// Rebuilds the pool with at most `max` open connections.
    async fn set_max_connections(&mut self, max: usize) -> Result<(), DbError>;

    fn max_connections(&self) -> usize;
}
