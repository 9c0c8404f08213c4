use crate::sql::base::error::DbError;
use model::catalog::column::RawColumnRow;
use mysql_async::{Row as MySqlRow, Value as MySqlValue, prelude::FromValue};
use planner::query::catalog::columns;

/// A result row whose values can be looked up by column name.
pub trait NamedValues {
    /// `None` when the result set has no such column.
    fn value(&self, column: &str) -> Option<MySqlValue>;
}

impl NamedValues for MySqlRow {
    fn value(&self, column: &str) -> Option<MySqlValue> {
        self.get_opt::<MySqlValue, _>(column).and_then(Result::ok)
    }
}

/// Reads one `information_schema.COLUMNS` result row.
pub fn raw_column_row<R: NamedValues>(row: &R) -> Result<RawColumnRow, DbError> {
    Ok(RawColumnRow {
        schema: required(row, columns::TABLE_SCHEMA)?,
        table: required(row, columns::TABLE_NAME)?,
        column: required(row, columns::COLUMN_NAME)?,
        column_type: required(row, columns::COLUMN_TYPE)?,
        is_nullable: required(row, columns::IS_NULLABLE)?,
        character_set: optional(row, columns::CHARACTER_SET_NAME)?,
        collation: optional(row, columns::COLLATION_NAME)?,
        has_default: optional::<i64, _>(row, columns::HAS_DEFAULT)?.unwrap_or(0) != 0,
        column_default: optional(row, columns::COLUMN_DEFAULT)?,
        quoted_default: optional(row, columns::QUOTED_DEFAULT)?,
        extra: optional(row, columns::EXTRA)?.unwrap_or_default(),
    })
}

fn optional<T: FromValue, R: NamedValues>(row: &R, column: &str) -> Result<Option<T>, DbError> {
    let value = row.value(column).ok_or_else(|| DbError::Decode {
        column: column.to_string(),
        message: "column missing from result set".to_string(),
    })?;

    Option::<T>::from_value_opt(value).map_err(|err| DbError::Decode {
        column: column.to_string(),
        message: err.to_string(),
    })
}

fn required<R: NamedValues>(row: &R, column: &str) -> Result<String, DbError> {
    optional::<String, _>(row, column)?.ok_or_else(|| DbError::Decode {
        column: column.to_string(),
        message: "unexpected NULL".to_string(),
    })
}
