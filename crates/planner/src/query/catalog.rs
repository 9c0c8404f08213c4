//! Generation of the single `information_schema.COLUMNS` query that
//! discovers the columns a selection refers to.

use crate::{
    query::dialect::{Dialect, MySql},
    symbols::{Symbol, parse_symbol_list},
};
use model::{
    core::{intent::Intent, selection::SelectionCriteria},
    errors::ValidationError,
};

const COLUMN_CATALOG_SQL: &str = include_str!("sql/column_catalog.sql");
const ORDER_BY: &str = "ORDER BY TABLE_NAME, ORDINAL_POSITION";

/// Result-set column names produced by the catalog query.
pub mod columns {
    pub const TABLE_SCHEMA: &str = "table_schema";
    pub const TABLE_NAME: &str = "table_name";
    pub const COLUMN_NAME: &str = "column_name";
    pub const COLUMN_TYPE: &str = "column_type";
    pub const IS_NULLABLE: &str = "is_nullable";
    pub const CHARACTER_SET_NAME: &str = "character_set_name";
    pub const COLLATION_NAME: &str = "collation_name";
    pub const HAS_DEFAULT: &str = "has_default";
    pub const COLUMN_DEFAULT: &str = "column_default";
    pub const QUOTED_DEFAULT: &str = "quoted_default";
    pub const EXTRA: &str = "extra";
}

/// A parameterized catalog query: SQL text plus positional string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl CatalogQuery {
    pub fn for_selection(criteria: &SelectionCriteria) -> Result<Self, ValidationError> {
        Self::with_dialect(criteria, &MySql)
    }

    pub fn with_dialect(
        criteria: &SelectionCriteria,
        dialect: &dyn Dialect,
    ) -> Result<Self, ValidationError> {
        let mut w = WhereBuilder::new(dialect);

        let p = w.param(criteria.schema.trim());
        w.push(format!("TABLE_SCHEMA = {p}"));

        if let Some(tables) = &criteria.tables {
            table_predicate(&mut w, &criteria.schema, tables)?;
        }

        if let Some(columns) = &criteria.columns {
            column_predicate(&mut w, columns)?;
        }

        match criteria.auto_increment {
            Intent::Add => w.push("EXTRA = ''".into()),
            Intent::Remove => w.push("EXTRA = 'auto_increment'".into()),
            Intent::None => {}
        }

        match criteria.nullable {
            Intent::Add => w.push("IS_NULLABLE = 'NO'".into()),
            Intent::Remove => w.push("IS_NULLABLE = 'YES'".into()),
            Intent::None => {}
        }

        if let Some(column_type) = &criteria.type_filter {
            let p = w.param(&format!("{}%", escape_like(column_type)));
            w.push(format!("COLUMN_TYPE LIKE {p}"));
        }

        Ok(w.finish())
    }
}

fn table_predicate(
    w: &mut WhereBuilder<'_>,
    schema: &str,
    tables: &str,
) -> Result<(), ValidationError> {
    let mut alternatives = Vec::new();

    for symbol in parse_symbol_list(tables, '.')? {
        let table = match symbol {
            Symbol::Bare(table) => table,
            // `schema.table` only restricts to that table; it never crosses schemas
            Symbol::Qualified { qualifier, name } if qualifier == schema.trim() => name,
            Symbol::Qualified { qualifier, name } => {
                return Err(ValidationError::MalformedSelection(format!(
                    "table '{qualifier}.{name}' is outside schema '{schema}'"
                )));
            }
        };
        let p = w.param(&table);
        alternatives.push(format!("TABLE_NAME = {p}"));
    }

    if alternatives.is_empty() {
        return Err(ValidationError::MalformedSelection(format!(
            "table list '{tables}' names nothing"
        )));
    }
    w.push(format!("({})", alternatives.join(" OR ")));

    Ok(())
}

fn column_predicate(w: &mut WhereBuilder<'_>, columns: &str) -> Result<(), ValidationError> {
    let mut alternatives = Vec::new();

    for symbol in parse_symbol_list(columns, '.')? {
        match symbol {
            Symbol::Qualified { qualifier, name } => {
                let t = w.param(&qualifier);
                let c = w.param(&name);
                alternatives.push(format!("(TABLE_NAME = {t} AND COLUMN_NAME = {c})"));
            }
            Symbol::Bare(name) if name.contains('%') => {
                // only `%` is a wildcard; a literal `_` is common in column names
                let p = w.param(&escape_wildcard_pattern(&name));
                alternatives.push(format!("COLUMN_NAME LIKE {p}"));
            }
            Symbol::Bare(name) => {
                let p = w.param(&name);
                alternatives.push(format!("COLUMN_NAME = {p}"));
            }
        }
    }

    if alternatives.is_empty() {
        return Err(ValidationError::MalformedSelection(format!(
            "column list '{columns}' names nothing"
        )));
    }
    w.push(format!("({})", alternatives.join(" OR ")));

    Ok(())
}

/// Escapes everything in a column pattern except the `%` wildcard.
fn escape_wildcard_pattern(value: &str) -> String {
    value.replace('\\', "\\\\").replace('_', "\\_")
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Accumulates AND-ed predicates and their bound parameters.
struct WhereBuilder<'a> {
    dialect: &'a dyn Dialect,
    predicates: Vec<String>,
    params: Vec<String>,
}

impl<'a> WhereBuilder<'a> {
    fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            predicates: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Registers a parameter and returns its placeholder.
    fn param(&mut self, value: &str) -> String {
        self.params.push(value.to_string());
        self.dialect.get_placeholder(self.params.len() - 1)
    }

    fn push(&mut self, predicate: String) {
        self.predicates.push(predicate);
    }

    fn finish(self) -> CatalogQuery {
        let sql = format!(
            "{}    {}\n{}",
            COLUMN_CATALOG_SQL,
            self.predicates.join("\n    AND "),
            ORDER_BY
        );
        CatalogQuery {
            sql,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn where_part(query: &CatalogQuery) -> &str {
        let start = query.sql.find("WHERE").unwrap();
        &query.sql[start..]
    }

    #[test]
    fn test_schema_and_bare_column() {
        let criteria = SelectionCriteria::new("shop").with_columns("id");
        let query = CatalogQuery::for_selection(&criteria).unwrap();

        assert_eq!(
            where_part(&query),
            "WHERE\n    TABLE_SCHEMA = ?\n    AND (COLUMN_NAME = ?)\nORDER BY TABLE_NAME, ORDINAL_POSITION"
        );
        assert_eq!(query.params, vec!["shop", "id"]);
    }

    #[test]
    fn test_tables_are_or_combined() {
        let criteria = SelectionCriteria::new("shop").with_tables("orders,users");
        let query = CatalogQuery::for_selection(&criteria).unwrap();

        assert!(query.sql.contains("(TABLE_NAME = ? OR TABLE_NAME = ?)"));
        assert_eq!(query.params, vec!["shop", "orders", "users"]);
    }

    #[test]
    fn test_table_qualified_with_own_schema() {
        let criteria = SelectionCriteria::new("shop").with_tables("shop.orders");
        let query = CatalogQuery::for_selection(&criteria).unwrap();
        assert_eq!(query.params, vec!["shop", "orders"]);
    }

    #[test]
    fn test_table_qualified_with_other_schema_is_rejected() {
        let criteria = SelectionCriteria::new("shop").with_tables("billing.orders");
        assert!(matches!(
            CatalogQuery::for_selection(&criteria),
            Err(ValidationError::MalformedSelection(_))
        ));
    }

    #[test]
    fn test_qualified_and_wildcard_columns() {
        let criteria = SelectionCriteria::new("shop").with_columns("orders.id,%_at");
        let query = CatalogQuery::for_selection(&criteria).unwrap();

        assert!(
            query
                .sql
                .contains("((TABLE_NAME = ? AND COLUMN_NAME = ?) OR COLUMN_NAME LIKE ?)")
        );
        assert_eq!(query.params, vec!["shop", "orders", "id", "%\\_at"]);
    }

    #[test]
    fn test_wildcard_escapes_backslash() {
        let criteria = SelectionCriteria::new("shop").with_columns(r"a\b%");
        let query = CatalogQuery::for_selection(&criteria).unwrap();
        assert_eq!(query.params, vec!["shop", r"a\\b%"]);
    }

    #[test]
    fn test_list_without_names_is_rejected() {
        let criteria = SelectionCriteria {
            columns: Some(" , ".into()),
            ..SelectionCriteria::new("shop")
        };
        assert!(matches!(
            CatalogQuery::for_selection(&criteria),
            Err(ValidationError::MalformedSelection(_))
        ));

        let criteria = SelectionCriteria {
            tables: Some(",".into()),
            ..SelectionCriteria::new("shop")
        };
        assert!(matches!(
            CatalogQuery::for_selection(&criteria),
            Err(ValidationError::MalformedSelection(_))
        ));
    }

    #[test]
    fn test_three_part_column_is_rejected() {
        let criteria = SelectionCriteria::new("shop").with_columns("shop.orders.id");
        assert_eq!(
            CatalogQuery::for_selection(&criteria),
            Err(ValidationError::MalformedSymbol("shop.orders.id".into()))
        );
    }

    #[test]
    fn test_intent_predicates() {
        let criteria = SelectionCriteria::new("shop")
            .with_columns("id")
            .with_auto_increment(Intent::Add)
            .with_nullable(Intent::Remove);
        let query = CatalogQuery::for_selection(&criteria).unwrap();
        assert!(query.sql.contains("AND EXTRA = ''"));
        assert!(query.sql.contains("AND IS_NULLABLE = 'YES'"));

        let criteria = SelectionCriteria::new("shop")
            .with_columns("id")
            .with_auto_increment(Intent::Remove)
            .with_nullable(Intent::Add);
        let query = CatalogQuery::for_selection(&criteria).unwrap();
        assert!(query.sql.contains("AND EXTRA = 'auto_increment'"));
        assert!(query.sql.contains("AND IS_NULLABLE = 'NO'"));

        let criteria = SelectionCriteria::new("shop").with_columns("id");
        let query = CatalogQuery::for_selection(&criteria).unwrap();
        assert!(!query.sql.contains("EXTRA ="));
        assert!(!query.sql.contains("IS_NULLABLE ="));
    }

    #[test]
    fn test_type_filter_is_positive_prefix_match() {
        let criteria = SelectionCriteria::new("shop")
            .with_columns("id")
            .with_type_filter("int");
        let query = CatalogQuery::for_selection(&criteria).unwrap();

        assert!(query.sql.contains("AND COLUMN_TYPE LIKE ?"));
        assert!(!query.sql.contains("NOT LIKE"));
        assert_eq!(query.params.last().map(String::as_str), Some("int%"));
    }

    #[test]
    fn test_values_never_inlined() {
        let criteria = SelectionCriteria::new("shop").with_columns("x' OR '1'='1");
        let query = CatalogQuery::for_selection(&criteria).unwrap();
        assert!(!query.sql.contains("OR '1'"));
        assert_eq!(query.params.len(), 2);
    }
}
