// ============================================================
// CELL VALUES
// ============================================================

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A single typed value in a column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Temporal(NaiveDateTime),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric value of the cell, if it holds one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => write!(f, "NaN"),
            Cell::Int(value) => write!(f, "{}", value),
            Cell::Float(value) => write!(f, "{}", format_float(*value)),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
            Cell::Temporal(value) if value.time() == NaiveTime::MIN => {
                write!(f, "{}", value.format("%Y-%m-%d"))
            }
            Cell::Temporal(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            Cell::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Whole floats keep a trailing `.0` so they read as floats
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
