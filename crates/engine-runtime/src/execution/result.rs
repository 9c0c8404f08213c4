use crate::error::ExecutionError;
use model::alter::statement::AlterStatement;

/// Rows-affected value for statements that were not executed or failed.
pub const NOT_EXECUTED: i64 = -1;

/// Outcome of applying one statement. Exactly one exists per applied statement.
#[derive(Debug)]
pub struct AlterResult {
    statement: AlterStatement,
    rows_affected: i64,
    error: Option<ExecutionError>,
}

impl AlterResult {
    pub fn applied(statement: AlterStatement, rows_affected: i64) -> Self {
        Self {
            statement,
            rows_affected,
            error: None,
        }
    }

    /// Dry-run result: nothing was sent to the server.
    pub fn skipped(statement: AlterStatement) -> Self {
        Self {
            statement,
            rows_affected: NOT_EXECUTED,
            error: None,
        }
    }

    pub fn failed(statement: AlterStatement, error: ExecutionError) -> Self {
        Self {
            statement,
            rows_affected: NOT_EXECUTED,
            error: Some(error),
        }
    }

    pub fn table(&self) -> &str {
        self.statement.table()
    }

    pub fn statement(&self) -> &AlterStatement {
        &self.statement
    }

    pub fn rows_affected(&self) -> i64 {
        self.rows_affected
    }

    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, Some(ExecutionError::Cancelled { .. }))
    }

    pub fn plan_description(&self) -> &str {
        self.statement.sql()
    }
}
