use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseKind {
    /// `CHANGE `col` `col` …`
    Column,
    /// `CONVERT TO CHARACTER SET … COLLATE …`
    Table,
}

/// A single fragment of an ALTER statement, tagged with the table it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeClause {
    pub schema: String,
    pub table: String,
    pub kind: ClauseKind,
    pub body: String,
}

impl ChangeClause {
    pub fn column(schema: &str, table: &str, body: String) -> Self {
        Self {
            schema: schema.to_string(),
            table: table.to_string(),
            kind: ClauseKind::Column,
            body,
        }
    }

    pub fn table(schema: &str, table: &str, body: String) -> Self {
        Self {
            schema: schema.to_string(),
            table: table.to_string(),
            kind: ClauseKind::Table,
            body,
        }
    }
}
