use crate::{core::intent::Intent, errors::ValidationError};
use serde::{Deserialize, Serialize};

/// What to alter and how. Built once from caller input and read-only afterwards.
///
/// `tables` and `columns` hold the raw comma-separated lists; they are split
/// into symbols by the planner. Empty strings are normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    pub schema: String,
    pub tables: Option<String>,
    pub columns: Option<String>,
    /// Positive filter: only columns whose declared type starts with this.
    pub type_filter: Option<String>,
    pub new_type: Option<String>,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    pub auto_increment: Intent,
    pub nullable: Intent,
}

impl SelectionCriteria {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            ..Default::default()
        }
    }

    pub fn with_tables(mut self, tables: impl Into<String>) -> Self {
        self.tables = non_empty_list(tables.into());
        self
    }

    pub fn with_columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = non_empty_list(columns.into());
        self
    }

    pub fn with_type_filter(mut self, column_type: impl Into<String>) -> Self {
        self.type_filter = non_empty(column_type.into());
        self
    }

    pub fn with_new_type(mut self, column_type: impl Into<String>) -> Self {
        self.new_type = non_empty(column_type.into());
        self
    }

    pub fn with_character_set(mut self, charset: impl Into<String>) -> Self {
        self.character_set = non_empty(charset.into());
        self
    }

    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = non_empty(collation.into());
        self
    }

    pub fn with_auto_increment(mut self, intent: Intent) -> Self {
        self.auto_increment = intent;
        self
    }

    pub fn with_nullable(mut self, intent: Intent) -> Self {
        self.nullable = intent;
        self
    }

    /// Checks everything that can be checked without touching the database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema.trim().is_empty() {
            return Err(ValidationError::EmptySchema);
        }

        ensure_names("table", self.tables.as_deref())?;
        ensure_names("column", self.columns.as_deref())?;

        if self.tables.is_none() && self.columns.is_none() {
            return Err(ValidationError::NoTarget);
        }

        // without a column filter every column of the selected tables would match
        if !self.has_column_filter() {
            let change = if self.new_type.is_some() {
                Some("new type")
            } else if !self.auto_increment.is_none() {
                Some("auto_increment change")
            } else if !self.nullable.is_none() {
                Some("nullability change")
            } else {
                None
            };
            if let Some(change) = change {
                return Err(ValidationError::UnfilteredColumnChange { change });
            }
        }

        match (&self.character_set, &self.collation) {
            (Some(_), None) => {
                return Err(ValidationError::IncompletePair {
                    missing: "collation",
                });
            }
            (None, Some(_)) => {
                return Err(ValidationError::IncompletePair {
                    missing: "character set",
                });
            }
            (Some(charset), Some(collation)) => {
                ensure_bare_word("character set", charset)?;
                ensure_bare_word("collation", collation)?;
            }
            (None, None) => {}
        }

        if let Some(new_type) = &self.new_type {
            ensure_type_fragment(new_type)?;
        }

        Ok(())
    }

    /// The requested table-level conversion, if both halves are present.
    pub fn charset_change(&self) -> Option<(&str, &str)> {
        match (&self.character_set, &self.collation) {
            (Some(charset), Some(collation)) => Some((charset.as_str(), collation.as_str())),
            _ => None,
        }
    }

    /// True when a column list or a type filter narrows the selection to
    /// individual columns. Otherwise only whole tables are selected.
    pub fn has_column_filter(&self) -> bool {
        self.columns.is_some() || self.type_filter.is_some()
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// A list of nothing but commas names nothing; `None` is the only "absent".
fn non_empty_list(value: String) -> Option<String> {
    non_empty(value).filter(|list| has_names(list))
}

fn has_names(list: &str) -> bool {
    list.split(',').any(|entry| !entry.trim().is_empty())
}

fn ensure_names(what: &str, list: Option<&str>) -> Result<(), ValidationError> {
    match list {
        Some(list) if !has_names(list) => Err(ValidationError::MalformedSelection(format!(
            "{what} list '{list}' names nothing"
        ))),
        _ => Ok(()),
    }
}

fn ensure_bare_word(what: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(ValidationError::UnsafeFragment {
            what,
            value: value.to_string(),
        })
    }
}

// Types cannot be bound or quoted, so at least keep statement terminators
// and comments out of them.
fn ensure_type_fragment(value: &str) -> Result<(), ValidationError> {
    let forbidden = [";", "`", "--", "/*", "#"];
    if forbidden.iter().any(|f| value.contains(f)) {
        Err(ValidationError::UnsafeFragment {
            what: "column type",
            value: value.to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_table_or_column() {
        let criteria = SelectionCriteria::new("shop");
        assert_eq!(criteria.validate(), Err(ValidationError::NoTarget));

        let criteria = SelectionCriteria::new("shop").with_tables("  ").with_columns("");
        assert_eq!(criteria.validate(), Err(ValidationError::NoTarget));
    }

    #[test]
    fn test_requires_schema() {
        let criteria = SelectionCriteria::new(" ").with_columns("id");
        assert_eq!(criteria.validate(), Err(ValidationError::EmptySchema));
    }

    #[test]
    fn test_rejects_partial_charset_pair() {
        let charset_only = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_character_set("utf8mb4");
        assert_eq!(
            charset_only.validate(),
            Err(ValidationError::IncompletePair {
                missing: "collation"
            })
        );

        let collation_only = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_collation("utf8mb4_general_ci");
        assert_eq!(
            collation_only.validate(),
            Err(ValidationError::IncompletePair {
                missing: "character set"
            })
        );
    }

    #[test]
    fn test_accepts_full_charset_pair() {
        let criteria = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_character_set("utf8mb4")
            .with_collation("utf8mb4_general_ci");
        assert!(criteria.validate().is_ok());
        assert_eq!(
            criteria.charset_change(),
            Some(("utf8mb4", "utf8mb4_general_ci"))
        );
    }

    #[test]
    fn test_rejects_unsafe_fragments() {
        let criteria = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_character_set("utf8mb4; DROP TABLE x")
            .with_collation("utf8mb4_general_ci");
        assert!(matches!(
            criteria.validate(),
            Err(ValidationError::UnsafeFragment { what: "character set", .. })
        ));

        let criteria = SelectionCriteria::new("shop")
            .with_columns("id")
            .with_new_type("bigint; DROP TABLE users");
        assert!(matches!(
            criteria.validate(),
            Err(ValidationError::UnsafeFragment { what: "column type", .. })
        ));

        let criteria = SelectionCriteria::new("shop")
            .with_columns("status")
            .with_new_type("enum('a','b')");
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_comma_only_lists_are_absent() {
        let criteria = SelectionCriteria::new("shop")
            .with_columns(",")
            .with_new_type("bigint");
        assert_eq!(criteria.columns, None);
        assert_eq!(criteria.validate(), Err(ValidationError::NoTarget));

        let criteria = SelectionCriteria::new("shop")
            .with_tables(" , ")
            .with_character_set("utf8mb4")
            .with_collation("utf8mb4_bin");
        assert_eq!(criteria.tables, None);
        assert_eq!(criteria.validate(), Err(ValidationError::NoTarget));

        let criteria = SelectionCriteria::new("shop").with_tables("orders,,");
        assert_eq!(criteria.tables.as_deref(), Some("orders,,"));
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_comma_only_field_is_rejected() {
        let criteria = SelectionCriteria {
            tables: Some(",,".into()),
            ..SelectionCriteria::new("shop")
        };
        assert!(matches!(
            criteria.validate(),
            Err(ValidationError::MalformedSelection(_))
        ));
    }

    #[test]
    fn test_column_change_needs_filter() {
        let criteria = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_new_type("bigint");
        assert_eq!(
            criteria.validate(),
            Err(ValidationError::UnfilteredColumnChange { change: "new type" })
        );

        let criteria = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_auto_increment(Intent::Add);
        assert!(matches!(
            criteria.validate(),
            Err(ValidationError::UnfilteredColumnChange { .. })
        ));

        let criteria = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_type_filter("int")
            .with_new_type("bigint");
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_column_filter() {
        let criteria = SelectionCriteria::new("shop").with_tables("orders");
        assert!(!criteria.has_column_filter());

        let criteria = SelectionCriteria::new("shop")
            .with_tables("orders")
            .with_type_filter("varchar");
        assert!(criteria.has_column_filter());

        let criteria = SelectionCriteria::new("shop").with_columns("orders.id");
        assert!(criteria.has_column_filter());
    }
}
