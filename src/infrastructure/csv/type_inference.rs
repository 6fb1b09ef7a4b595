// ============================================================
// TYPE INFERENCE
// ============================================================
// Infer a column type from raw field text and convert fields to cells

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::dataset::{Cell, Column, ColumnType};

/// Field values read as missing
static NULL_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

/// Cheap shape check before handing a value to chrono
static ISO_DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Column builder that infers a [`ColumnType`] from raw field text
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInferrer;

impl TypeInferrer {
    pub fn new() -> Self {
        Self
    }

    /// Check if a raw field value is one of the missing-value tokens
    pub fn is_null_token(value: &str) -> bool {
        NULL_TOKENS.contains(value)
    }

    /// Infer the type shared by every non-null value
    pub fn infer_type(&self, values: &[String]) -> ColumnType {
        let present: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|value| !Self::is_null_token(value))
            .collect();

        if present.is_empty() {
            return ColumnType::Unknown;
        }

        if present.iter().all(|value| parse_bool(value).is_some()) {
            ColumnType::Boolean
        } else if present.iter().all(|value| parse_number(value).is_some()) {
            ColumnType::Numeric
        } else if present.iter().all(|value| parse_temporal(value).is_some()) {
            ColumnType::Temporal
        } else {
            ColumnType::Text
        }
    }

    /// Build a typed column from the raw values read for one header
    pub fn build_column(&self, name: &str, values: Vec<String>) -> Column {
        let column_type = self.infer_type(&values);

        let mut cells: Vec<Cell> = values
            .into_iter()
            .map(|value| to_cell(value, column_type))
            .collect();
        let has_nulls = cells.iter().any(Cell::is_null);

        // Missing values force float storage for integer columns
        if column_type == ColumnType::Numeric && has_nulls {
            for cell in &mut cells {
                if let Cell::Int(value) = *cell {
                    *cell = Cell::Float(value as f64);
                }
            }
        }

        Column::new(name, column_type, cells)
    }
}

fn to_cell(value: String, column_type: ColumnType) -> Cell {
    if TypeInferrer::is_null_token(&value) {
        return Cell::Null;
    }

    let converted = match column_type {
        ColumnType::Boolean => parse_bool(&value).map(Cell::Bool),
        ColumnType::Numeric => parse_number(&value),
        ColumnType::Temporal => parse_temporal(&value).map(Cell::Temporal),
        ColumnType::Text | ColumnType::Unknown => None,
    };

    converted.unwrap_or(Cell::Text(value))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<Cell> {
    let trimmed = value.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Cell::Int(int));
    }
    // `f64` accepts any casing of "nan"; a NaN is a missing value, not a number
    trimmed
        .parse::<f64>()
        .ok()
        .map(|float| if float.is_nan() { Cell::Null } else { Cell::Float(float) })
}

fn parse_temporal(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if !ISO_DATE_PREFIX.is_match(trimmed) {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}
