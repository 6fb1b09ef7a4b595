// ============================================================
// DATASET TABLE
// ============================================================
// Column-oriented table; every column holds exactly `row_count` cells

use super::{Cell, ColumnType};
use std::ops::Range;

/// Bytes attributed to the implicit 0..N row index
const RANGE_INDEX_BYTES: usize = 132;

/// Bytes per cell for fixed-width storage
const WIDE_CELL_BYTES: usize = 8;
const BOOL_CELL_BYTES: usize = 1;

/// A named column and its typed cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            column_type,
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn non_null_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_null()).count()
    }

    /// Non-null numeric values in row order
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_f64).collect()
    }

    /// Storage label shown in the structure summary
    pub fn dtype_label(&self) -> &'static str {
        match self.column_type {
            ColumnType::Numeric => {
                if self.cells.iter().all(|cell| matches!(cell, Cell::Int(_))) {
                    "int64"
                } else {
                    "float64"
                }
            }
            ColumnType::Boolean if !self.is_object_storage() => "bool",
            ColumnType::Temporal => "datetime64[ns]",
            ColumnType::Boolean | ColumnType::Text | ColumnType::Unknown => "object",
        }
    }

    /// Held as boxed values: text, untyped, or booleans with gaps
    pub fn is_object_storage(&self) -> bool {
        match self.column_type {
            ColumnType::Text | ColumnType::Unknown => true,
            ColumnType::Boolean => self.cells.iter().any(Cell::is_null),
            ColumnType::Numeric | ColumnType::Temporal => false,
        }
    }

    /// Shallow footprint: fixed-width slots only, string payloads not counted
    fn shallow_bytes(&self) -> usize {
        let per_cell = match self.column_type {
            ColumnType::Boolean if !self.is_object_storage() => BOOL_CELL_BYTES,
            _ => WIDE_CELL_BYTES,
        };
        per_cell * self.cells.len()
    }
}

/// Estimated in-memory footprint of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub bytes: usize,

    /// True when boxed payloads are excluded, making `bytes` a lower bound
    pub lower_bound: bool,
}

/// Tabular dataset parsed from a single upload
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from columns of equal length
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        debug_assert!(columns.iter().all(|column| column.len() == row_count));

        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    /// Rows in `range` (clamped to the dataset), cells cloned in column order
    pub fn rows(&self, range: Range<usize>) -> Vec<Vec<Cell>> {
        let end = range.end.min(self.row_count);
        let start = range.start.min(end);

        (start..end)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| column.cells[row].clone())
                    .collect()
            })
            .collect()
    }

    pub fn memory_usage(&self) -> MemoryUsage {
        let bytes = RANGE_INDEX_BYTES
            + self
                .columns
                .iter()
                .map(Column::shallow_bytes)
                .sum::<usize>();
        let lower_bound = self
            .columns
            .iter()
            .any(Column::is_object_storage);

        MemoryUsage { bytes, lower_bound }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::new(
                "a",
                ColumnType::Numeric,
                vec![Cell::Int(1), Cell::Int(3), Cell::Int(5)],
            ),
            Column::new(
                "b",
                ColumnType::Text,
                vec![
                    Cell::Text("x".to_string()),
                    Cell::Null,
                    Cell::Text("z".to_string()),
                ],
            ),
        ])
    }

    #[test]
    fn test_counts() {
        let dataset = sample();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.columns()[1].non_null_count(), 2);
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_rows_are_clamped() {
        let dataset = sample();
        assert_eq!(dataset.rows(0..2).len(), 2);
        assert_eq!(dataset.rows(0..50).len(), 3);
        assert!(dataset.rows(7..9).is_empty());
        assert_eq!(
            dataset.rows(1..2)[0],
            vec![Cell::Int(3), Cell::Null]
        );
    }

    #[test]
    fn test_dtype_labels() {
        let ints = Column::new("i", ColumnType::Numeric, vec![Cell::Int(1)]);
        let floats = Column::new("f", ColumnType::Numeric, vec![Cell::Float(1.0), Cell::Null]);
        let flags = Column::new("b", ColumnType::Boolean, vec![Cell::Bool(true)]);
        let empty = Column::new("u", ColumnType::Unknown, vec![Cell::Null]);

        assert_eq!(ints.dtype_label(), "int64");
        assert_eq!(floats.dtype_label(), "float64");
        assert_eq!(flags.dtype_label(), "bool");
        assert_eq!(empty.dtype_label(), "object");
    }

    #[test]
    fn test_boolean_with_nulls_is_object() {
        let gappy = Column::new(
            "b",
            ColumnType::Boolean,
            vec![Cell::Bool(true), Cell::Null, Cell::Bool(false)],
        );
        assert_eq!(gappy.dtype_label(), "object");
        assert!(gappy.is_object_storage());

        let usage = Dataset::new(vec![gappy]).memory_usage();
        assert_eq!(
            usage,
            MemoryUsage {
                bytes: 132 + 24,
                lower_bound: true
            }
        );

        let flags = Dataset::new(vec![Column::new(
            "b",
            ColumnType::Boolean,
            vec![Cell::Bool(true), Cell::Bool(false)],
        )]);
        assert_eq!(
            flags.memory_usage(),
            MemoryUsage {
                bytes: 134,
                lower_bound: false
            }
        );
    }

    #[test]
    fn test_memory_usage() {
        let usage = sample().memory_usage();
        assert_eq!(usage.bytes, 132 + 24 + 24);
        assert!(usage.lower_bound);

        let numeric_only = Dataset::new(vec![Column::new(
            "n",
            ColumnType::Numeric,
            vec![Cell::Int(1), Cell::Int(2)],
        )]);
        assert_eq!(
            numeric_only.memory_usage(),
            MemoryUsage {
                bytes: 148,
                lower_bound: false
            }
        );
    }
}
