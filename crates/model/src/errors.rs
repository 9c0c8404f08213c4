use thiserror::Error;

/// Problems with the caller's selection, detected before any query runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no schema given")]
    EmptySchema,

    #[error("no table or column specified, need at least one")]
    NoTarget,

    #[error("character set and collation must be specified together (missing {missing})")]
    IncompletePair { missing: &'static str },

    #[error("cannot both add and remove {property}")]
    ConflictingIntent { property: &'static str },

    #[error("symbol '{0}' has more than two qualifier parts")]
    MalformedSymbol(String),

    #[error("malformed selection: {0}")]
    MalformedSelection(String),

    #[error("{change} needs a column list or a type filter")]
    UnfilteredColumnChange { change: &'static str },

    #[error("refusing to interpolate {what} '{value}' into DDL")]
    UnsafeFragment { what: &'static str, value: String },
}
