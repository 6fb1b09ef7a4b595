// ============================================================
// PRESENTER USE CASE
// ============================================================
// Independent, read-only views over a parsed dataset

use std::collections::BTreeMap;

use super::statistics;
use crate::domain::dataset::{Dataset, MemoryUsage};
use crate::domain::views::{
    ColumnSummary, DatasetReport, DescriptiveStatistics, StructureSummary, TableView,
};

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

pub struct Presenter {
    preview_rows: usize,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_ROWS)
    }
}

impl Presenter {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    /// Compute every view; the full table only when requested
    pub fn present(&self, dataset: &Dataset, show_full_table: bool) -> DatasetReport {
        DatasetReport {
            preview_limit: self.preview_rows,
            preview: self.preview(dataset),
            structure: self.structure(dataset),
            statistics: self.statistics(dataset),
            full_table: show_full_table.then(|| self.full_table(dataset)),
        }
    }

    /// First rows of the dataset, all columns in original order
    pub fn preview(&self, dataset: &Dataset) -> TableView {
        TableView {
            columns: dataset.column_names(),
            rows: dataset.rows(0..self.preview_rows),
        }
    }

    pub fn structure(&self, dataset: &Dataset) -> StructureSummary {
        let columns: Vec<ColumnSummary> = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(position, column)| ColumnSummary {
                position,
                name: column.name.clone(),
                column_type: column.column_type,
                dtype: column.dtype_label().to_string(),
                non_null_count: column.non_null_count(),
            })
            .collect();

        let memory = dataset.memory_usage();
        let info_text = render_info_text(dataset.row_count(), &columns, memory);

        StructureSummary {
            row_count: dataset.row_count(),
            columns,
            memory_usage_bytes: memory.bytes,
            memory_usage_is_lower_bound: memory.lower_bound,
            info_text,
        }
    }

    pub fn statistics(&self, dataset: &Dataset) -> DescriptiveStatistics {
        statistics::describe(dataset)
    }

    pub fn full_table(&self, dataset: &Dataset) -> TableView {
        TableView {
            columns: dataset.column_names(),
            rows: dataset.rows(0..dataset.row_count()),
        }
    }
}

/// Text block in the style of `DataFrame.info()`
fn render_info_text(row_count: usize, columns: &[ColumnSummary], memory: MemoryUsage) -> String {
    let mut lines = Vec::new();

    if row_count == 0 {
        lines.push("RangeIndex: 0 entries".to_string());
    } else {
        lines.push(format!(
            "RangeIndex: {} entries, 0 to {}",
            row_count,
            row_count - 1
        ));
    }
    lines.push(format!("Data columns (total {} columns):", columns.len()));

    let counts: Vec<String> = columns
        .iter()
        .map(|column| format!("{} non-null", column.non_null_count))
        .collect();
    let name_width = columns
        .iter()
        .map(|column| column.name.chars().count())
        .chain(std::iter::once("Column".len()))
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(String::len)
        .chain(std::iter::once("Non-Null Count".len()))
        .max()
        .unwrap_or(0);

    lines.push(format!(
        " {:<3} {:<name_width$}  {:<count_width$}  {}",
        "#", "Column", "Non-Null Count", "Dtype"
    ));
    lines.push(format!(
        "{:<4} {:<name_width$}  {:<count_width$}  {}",
        "---",
        "-".repeat("Column".len()),
        "-".repeat("Non-Null Count".len()),
        "-----"
    ));
    for (column, count) in columns.iter().zip(&counts) {
        lines.push(format!(
            " {:<3} {:<name_width$}  {:<count_width$}  {}",
            column.position, column.name, count, column.dtype
        ));
    }

    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for column in columns {
        *tally.entry(column.dtype.as_str()).or_insert(0) += 1;
    }
    let dtypes = tally
        .iter()
        .map(|(dtype, count)| format!("{}({})", dtype, count))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("dtypes: {}", dtypes));
    lines.push(format!("memory usage: {}", format_memory(memory)));

    lines.join("\n")
}

fn format_memory(memory: MemoryUsage) -> String {
    let qualifier = if memory.lower_bound { "+" } else { "" };
    let mut size = memory.bytes as f64;

    for unit in ["bytes", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{:.1}{} {}", size, qualifier, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1}{} PB", size, qualifier)
}
