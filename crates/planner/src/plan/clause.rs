//! Derivation of the per-column and per-table clause text.

use crate::query::dialect::Dialect;
use model::{
    catalog::column::{ColumnDescriptor, is_string_type},
    core::{intent::Intent, selection::SelectionCriteria},
};

/// `CHANGE `col` `col` TYPE [CHARACTER SET x] [COLLATE y] [NOT] NULL [DEFAULT v] [ON UPDATE v] [AUTO_INCREMENT]`
///
/// Everything not explicitly changed by the criteria is reproduced from the
/// catalog, so an already-matching column yields the same clause every time.
pub fn column_clause(
    dialect: &dyn Dialect,
    column: &ColumnDescriptor,
    criteria: &SelectionCriteria,
) -> String {
    let name = dialect.quote_identifier(&column.column);
    let mut parts = vec![format!("CHANGE {name} {name}")];

    let mut resolved_type = criteria
        .new_type
        .clone()
        .unwrap_or_else(|| column.column_type.clone());

    if column.unsigned && !resolved_type.to_ascii_lowercase().contains("unsigned") {
        resolved_type.push_str(" UNSIGNED");
    }

    let string_type = is_string_type(&resolved_type);
    parts.push(resolved_type);

    if string_type {
        if let Some(charset) = &column.character_set {
            parts.push(format!("CHARACTER SET {charset}"));
        }
        if let Some(collation) = &column.collation {
            parts.push(format!("COLLATE {collation}"));
        }
    }

    parts.push(nullability(criteria.nullable, column.nullable).to_string());

    if let Some(default) = &column.default {
        parts.push(format!("DEFAULT {default}"));
    }

    if let Some(on_update) = &column.on_update {
        parts.push(format!("ON UPDATE {on_update}"));
    }

    if keeps_auto_increment(criteria.auto_increment, column.auto_increment) {
        parts.push("AUTO_INCREMENT".to_string());
    }

    parts.join(" ")
}

/// `CONVERT TO CHARACTER SET x COLLATE y`
pub fn table_clause(charset: &str, collation: &str) -> String {
    format!("CONVERT TO CHARACTER SET {charset} COLLATE {collation}")
}

fn nullability(intent: Intent, nullable: bool) -> &'static str {
    match intent {
        Intent::Remove => "NOT NULL",
        Intent::Add => "NULL",
        Intent::None if nullable => "NULL",
        Intent::None => "NOT NULL",
    }
}

fn keeps_auto_increment(intent: Intent, auto_increment: bool) -> bool {
    match intent {
        Intent::Add => true,
        Intent::Remove => false,
        Intent::None => auto_increment,
    }
}
