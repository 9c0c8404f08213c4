use crate::{
    error::PlanError,
    plan::{
        catalog::ColumnCatalog,
        clause::{column_clause, table_clause},
        consolidate::consolidate,
    },
    query::{
        catalog::CatalogQuery,
        dialect::{Dialect, MySql},
    },
};
use model::{
    alter::{clause::ChangeClause, statement::AlterStatement},
    catalog::column::ColumnDescriptor,
    core::selection::SelectionCriteria,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Turns a selection into consolidated `ALTER TABLE` statements.
pub struct AlterPlanBuilder<'a> {
    criteria: &'a SelectionCriteria,
    dialect: &'a dyn Dialect,
}

impl<'a> AlterPlanBuilder<'a> {
    pub fn new(criteria: &'a SelectionCriteria) -> Self {
        Self {
            criteria,
            dialect: &MySql,
        }
    }

    pub fn with_dialect(mut self, dialect: &'a dyn Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Validates, reads the catalog and derives the plan.
    ///
    /// An empty plan is a successful no-op. On error no statements are returned.
    pub async fn build(&self, catalog: &dyn ColumnCatalog) -> Result<Vec<AlterStatement>, PlanError> {
        self.criteria.validate()?;
        let query = CatalogQuery::with_dialect(self.criteria, self.dialect)?;

        if !self.criteria.has_column_filter() && self.criteria.charset_change().is_none() {
            warn!("Only tables were selected and no character set change was requested, nothing to do");
            return Ok(Vec::new());
        }

        info!(
            "Reading column catalog for schema '{}' ({} parameters)",
            self.criteria.schema,
            query.params.len()
        );
        debug!("Catalog query: {}", query.sql);

        let columns = catalog.read_columns(&query).await?;
        info!("Catalog returned {} matching columns", columns.len());

        if columns.is_empty() {
            info!("No columns matched the selection, nothing to do");
            return Ok(Vec::new());
        }

        Ok(self.plan_columns(&columns))
    }

    /// The pure part of [`build`](Self::build): clause derivation and consolidation.
    pub fn plan_columns(&self, columns: &[ColumnDescriptor]) -> Vec<AlterStatement> {
        let tables_only = !self.criteria.has_column_filter();
        let mut tables = BTreeSet::new();
        let mut clauses = Vec::with_capacity(columns.len());

        for column in columns {
            tables.insert((column.schema.as_str(), column.table.as_str()));

            if tables_only {
                continue;
            }

            let body = column_clause(self.dialect, column, self.criteria);
            debug!("{}.{}: {}", column.table, column.column, body);
            clauses.push(ChangeClause::column(&column.schema, &column.table, body));
        }

        if let Some((charset, collation)) = self.criteria.charset_change() {
            for (schema, table) in tables {
                clauses.push(ChangeClause::table(
                    schema,
                    table,
                    table_clause(charset, collation),
                ));
            }
        }

        consolidate(self.dialect, clauses)
    }
}
