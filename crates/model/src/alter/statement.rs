use serde::{Deserialize, Serialize};
use std::fmt;

pub const CLAUSE_SEPARATOR: &str = ",\n    ";

/// One consolidated `ALTER TABLE` for a single table; the unit of execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterStatement {
    schema: String,
    table: String,
    body: String,
    sql: String,
}

impl AlterStatement {
    /// `target` is the already-quoted `schema`.`table` reference.
    pub fn new(schema: &str, table: &str, target: &str, clauses: &[String]) -> Self {
        let body = clauses.join(CLAUSE_SEPARATOR);
        let sql = format!("ALTER TABLE {target}\n    {body}");
        Self {
            schema: schema.to_string(),
            table: table.to_string(),
            body,
            sql,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The comma-joined clause list, without the `ALTER TABLE` prefix.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Exactly the text that gets executed.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn serialize(&self) -> String {
        self.sql.clone()
    }
}

impl fmt::Display for AlterStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
