use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired direction of change for a toggleable column property.
///
/// The same intent applies to every selected column; there is no
/// per-column override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Leave the property as discovered.
    #[default]
    None,
    /// Force-enable the property.
    Add,
    /// Force-disable the property.
    Remove,
}

impl Intent {
    /// Builds an intent from a pair of mutually exclusive `--add-*` / `--remove-*` flags.
    pub fn from_flags(add: bool, remove: bool, property: &'static str) -> Result<Self, ValidationError> {
        match (add, remove) {
            (true, true) => Err(ValidationError::ConflictingIntent { property }),
            (true, false) => Ok(Intent::Add),
            (false, true) => Ok(Intent::Remove),
            (false, false) => Ok(Intent::None),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Intent::None)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::None => write!(f, "none"),
            Intent::Add => write!(f, "add"),
            Intent::Remove => write!(f, "remove"),
        }
    }
}
