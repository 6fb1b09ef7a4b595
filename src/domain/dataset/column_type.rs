// ============================================================
// COLUMN TYPE ENUM
// ============================================================
// Inferred once per column at parse time, reused by every view

use serde::{Deserialize, Serialize};

/// Type inferred for a column from its non-null values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Every value parses as an integer or a float
    Numeric,

    /// Free-form or mixed values
    Text,

    /// Every value is a boolean literal (`true`, `False`, `TRUE`, ...)
    Boolean,

    /// Every value is an ISO-8601 date or date-time
    Temporal,

    /// No non-null values to infer from
    Unknown,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "Numeric"),
            ColumnType::Text => write!(f, "Text"),
            ColumnType::Boolean => write!(f, "Boolean"),
            ColumnType::Temporal => write!(f, "Temporal"),
            ColumnType::Unknown => write!(f, "Unknown"),
        }
    }
}
