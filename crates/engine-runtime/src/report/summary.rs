use crate::execution::result::{AlterResult, NOT_EXECUTED};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Applied,
    Failed,
    Cancelled,
    DryRun,
}

#[derive(Serialize, Debug, Clone)]
pub struct TableOutcome {
    pub schema: String,
    pub table: String,
    pub status: TableStatus,
    pub rows_affected: i64,
    pub error: Option<String>,
    pub statement: String,
}

impl From<&AlterResult> for TableOutcome {
    fn from(result: &AlterResult) -> Self {
        let status = match result.error() {
            Some(_) if result.is_cancelled() => TableStatus::Cancelled,
            Some(_) => TableStatus::Failed,
            None if result.rows_affected() == NOT_EXECUTED => TableStatus::DryRun,
            None => TableStatus::Applied,
        };

        Self {
            schema: result.statement().schema().to_string(),
            table: result.table().to_string(),
            status,
            rows_affected: result.rows_affected(),
            error: result.error().map(|e| e.to_string()),
            statement: result.plan_description().to_string(),
        }
    }
}

/// Per-table outcomes of one run, sorted by table name.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ApplyReport {
    pub total: usize,
    pub applied: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub dry_run: usize,
    pub tables: Vec<TableOutcome>,
}

impl ApplyReport {
    pub fn from_results(results: &[AlterResult]) -> Self {
        let mut tables: Vec<TableOutcome> = results.iter().map(TableOutcome::from).collect();
        tables.sort_by(|a, b| (&a.schema, &a.table).cmp(&(&b.schema, &b.table)));

        let count = |status: TableStatus| tables.iter().filter(|t| t.status == status).count();

        Self {
            total: tables.len(),
            applied: count(TableStatus::Applied),
            failed: count(TableStatus::Failed),
            cancelled: count(TableStatus::Cancelled),
            dry_run: count(TableStatus::DryRun),
            tables,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.cancelled > 0
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.is_empty() {
            out.push_str("Nothing to do.\n");
            return out;
        }

        for t in &self.tables {
            let _ = writeln!(out, "-- {}.{}", t.schema, t.table);
            let _ = writeln!(out, "{};", t.statement);
            match (&t.status, &t.error) {
                (TableStatus::DryRun, _) => {
                    let _ = writeln!(out, "-- not executed (dry run)");
                }
                (TableStatus::Applied, _) => {
                    let _ = writeln!(out, "-- applied, {} rows", t.rows_affected);
                }
                (_, Some(err)) => {
                    let _ = writeln!(out, "-- {err}");
                }
                (_, None) => {}
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "{:<12} {}\n{:<12} {}\n{:<12} {}\n{:<12} {}\n{:<12} {}",
            "Total", self.total,
            "Applied", self.applied,
            "Failed", self.failed,
            "Cancelled", self.cancelled,
            "Dry run", self.dry_run,
        );
        out
    }
}
