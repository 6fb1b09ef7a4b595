// ============================================================
// RENDER MODEL
// ============================================================
// Read-only projections of a dataset, plus the per-interaction outcome

use serde::Serialize;

use super::dataset::{Cell, ColumnType};

/// Rows and column headers for a table view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One entry of the structure summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub position: usize,
    pub name: String,
    pub column_type: ColumnType,
    pub dtype: String,
    pub non_null_count: usize,
}

/// Column/type overview of the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureSummary {
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub memory_usage_bytes: usize,
    pub memory_usage_is_lower_bound: bool,

    /// Pre-formatted text block of the summary
    pub info_text: String,
}

/// describe()-style statistics for a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,

    /// Sample standard deviation; undefined below two values
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// describe()-style summary for a non-numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DescriptiveStatistics {
    /// Numeric columns only
    Numeric { columns: Vec<NumericSummary> },

    /// Used when the dataset has no numeric column at all
    Categorical { columns: Vec<CategoricalSummary> },
}

impl DescriptiveStatistics {
    pub fn column_names(&self) -> Vec<&str> {
        match self {
            DescriptiveStatistics::Numeric { columns } => {
                columns.iter().map(|c| c.column.as_str()).collect()
            }
            DescriptiveStatistics::Categorical { columns } => {
                columns.iter().map(|c| c.column.as_str()).collect()
            }
        }
    }

    /// Statistic label followed by one formatted value per column
    pub fn labeled_rows(&self) -> Vec<(&'static str, Vec<String>)> {
        match self {
            DescriptiveStatistics::Numeric { columns } => vec![
                stat_row("count", columns, |c| format_stat(c.count as f64)),
                stat_row("mean", columns, |c| format_stat(c.mean)),
                stat_row("std", columns, |c| {
                    c.std.map(format_stat).unwrap_or_else(|| "NaN".to_string())
                }),
                stat_row("min", columns, |c| format_stat(c.min)),
                stat_row("25%", columns, |c| format_stat(c.p25)),
                stat_row("50%", columns, |c| format_stat(c.p50)),
                stat_row("75%", columns, |c| format_stat(c.p75)),
                stat_row("max", columns, |c| format_stat(c.max)),
            ],
            DescriptiveStatistics::Categorical { columns } => vec![
                stat_row("count", columns, |c| c.count.to_string()),
                stat_row("unique", columns, |c| c.unique.to_string()),
                stat_row("top", columns, |c| {
                    c.top.clone().unwrap_or_else(|| "NaN".to_string())
                }),
                stat_row("freq", columns, |c| c.freq.to_string()),
            ],
        }
    }
}

fn stat_row<T>(
    label: &'static str,
    columns: &[T],
    pick: impl Fn(&T) -> String,
) -> (&'static str, Vec<String>) {
    (label, columns.iter().map(pick).collect())
}

fn format_stat(value: f64) -> String {
    format!("{:.6}", value)
}

/// Every view computed for a successfully parsed upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    /// Configured preview length; the preview may hold fewer rows
    pub preview_limit: usize,
    pub preview: TableView,
    pub structure: StructureSummary,
    pub statistics: DescriptiveStatistics,

    /// Present only when the user asked for the full table
    pub full_table: Option<TableView>,
}

/// Failure text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedMessage {
    pub message: String,
    pub hint: String,
}

/// Outcome of one interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderModel {
    NoFileProvided {
        prompt: String,
    },
    FileProvidedAndValid {
        file_name: String,
        success: String,
        show_full_table: bool,
        report: DatasetReport,
    },
    FileProvidedAndInvalid {
        file_name: Option<String>,
        error: DisplayedMessage,
    },
}
