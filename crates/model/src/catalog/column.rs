use serde::{Deserialize, Serialize};

/// Raw values of one `information_schema.COLUMNS` row, as the driver returns them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawColumnRow {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub column_type: String,
    pub is_nullable: String,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    pub has_default: bool,
    /// `COLUMN_DEFAULT` as stored; an expression for generated defaults.
    pub column_default: Option<String>,
    /// `QUOTE(COLUMN_DEFAULT)`; only meaningful when `has_default` is set.
    pub quoted_default: Option<String>,
    pub extra: String,
}

/// One discovered column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub column_type: String,
    pub nullable: bool,
    pub unsigned: bool,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    /// Ready-to-use `DEFAULT` operand: a quoted literal or an expression.
    pub default: Option<String>,
    /// Operand of an `ON UPDATE` attribute, e.g. `CURRENT_TIMESTAMP(3)`.
    pub on_update: Option<String>,
    pub auto_increment: bool,
}

impl ColumnDescriptor {
    pub fn from_raw(raw: RawColumnRow) -> Self {
        let unsigned = raw.column_type.to_ascii_lowercase().contains("unsigned");
        let default = default_operand(&raw);
        let on_update = on_update_operand(&raw.extra);

        Self {
            schema: raw.schema,
            table: raw.table,
            column: raw.column,
            nullable: raw.is_nullable == "YES",
            unsigned,
            column_type: raw.column_type,
            character_set: raw.character_set.filter(|s| !s.is_empty()),
            collation: raw.collation.filter(|s| !s.is_empty()),
            default,
            on_update,
            auto_increment: raw.extra.contains("auto_increment"),
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

// Expression defaults must not be re-quoted: `'CURRENT_TIMESTAMP'` is a string.
fn default_operand(raw: &RawColumnRow) -> Option<String> {
    if !raw.has_default {
        return None;
    }

    let expression = raw.column_default.as_deref().filter(|value| {
        raw.extra.contains("DEFAULT_GENERATED")
            || (is_temporal_type(&raw.column_type) && is_current_timestamp(value))
    });

    match expression {
        Some(expr) if is_current_timestamp(expr) => Some(expr.trim().to_string()),
        Some(expr) => Some(format!("({})", expr.trim())),
        None => raw.quoted_default.clone(),
    }
}

fn on_update_operand(extra: &str) -> Option<String> {
    const MARKER: &str = "on update ";
    let start = extra.to_ascii_lowercase().find(MARKER)? + MARKER.len();
    let operand = extra[start..].trim();
    (!operand.is_empty()).then(|| operand.to_string())
}

fn is_current_timestamp(value: &str) -> bool {
    let upper = value.trim().to_ascii_uppercase();
    ["CURRENT_TIMESTAMP", "NOW(", "LOCALTIMESTAMP", "LOCALTIME"]
        .iter()
        .any(|prefix| upper.starts_with(prefix))
}

fn is_temporal_type(column_type: &str) -> bool {
    let lower = column_type.trim().to_ascii_lowercase();
    lower.starts_with("timestamp") || lower.starts_with("datetime")
}

/// True for the CHAR/VARCHAR/TEXT family, whose charset and collation must be carried along.
pub fn is_string_type(column_type: &str) -> bool {
    let upper = column_type.to_ascii_uppercase();
    upper.contains("CHAR") || upper.contains("TEXT")
}
