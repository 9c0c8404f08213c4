use crate::query::dialect::Dialect;
use model::alter::{
    clause::{ChangeClause, ClauseKind},
    statement::AlterStatement,
};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Default)]
struct TableClauses {
    columns: Vec<String>,
    table: Vec<String>,
}

/// Groups clauses by table into exactly one statement per table.
///
/// Statements come out in table-name order. Within a statement, column
/// clauses keep their input order and table-level clauses follow them.
pub fn consolidate(dialect: &dyn Dialect, clauses: Vec<ChangeClause>) -> Vec<AlterStatement> {
    let clause_count = clauses.len();
    let mut grouped: BTreeMap<(String, String), TableClauses> = BTreeMap::new();

    for clause in clauses {
        let group = grouped
            .entry((clause.schema, clause.table))
            .or_default();
        match clause.kind {
            ClauseKind::Column => group.columns.push(clause.body),
            ClauseKind::Table => group.table.push(clause.body),
        }
    }

    let statements: Vec<AlterStatement> = grouped
        .into_iter()
        .map(|((schema, table), mut group)| {
            group.columns.append(&mut group.table);
            let target = dialect.qualified_table(&schema, &table);
            AlterStatement::new(&schema, &table, &target, &group.columns)
        })
        .collect();

    info!(
        "Consolidated {} individual clauses into {} grouped table alters",
        clause_count,
        statements.len()
    );

    statements
}
