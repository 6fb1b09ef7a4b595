// ============================================================
// DESCRIPTIVE STATISTICS
// ============================================================
// describe()-style summaries over dataset columns

use std::collections::HashMap;

use crate::domain::dataset::{Column, Dataset};
use crate::domain::views::{CategoricalSummary, DescriptiveStatistics, NumericSummary};

/// Summarize numeric columns; fall back to categorical summaries of every column when
/// the dataset has no numeric column.
pub fn describe(dataset: &Dataset) -> DescriptiveStatistics {
    let numeric: Vec<NumericSummary> = dataset
        .columns()
        .iter()
        .filter(|column| column.column_type.is_numeric())
        .filter_map(summarize_numeric)
        .collect();

    if !numeric.is_empty() {
        return DescriptiveStatistics::Numeric { columns: numeric };
    }

    DescriptiveStatistics::Categorical {
        columns: dataset.columns().iter().map(summarize_categorical).collect(),
    }
}

/// Returns `None` when the column holds no numeric values
pub fn summarize_numeric(column: &Column) -> Option<NumericSummary> {
    let mut values = column.numeric_values();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    Some(NumericSummary {
        column: column.name.clone(),
        count,
        mean,
        std: sample_std(&values, mean),
        min: values[0],
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.5),
        p75: quantile(&values, 0.75),
        max: values[count - 1],
    })
}

pub fn summarize_categorical(column: &Column) -> CategoricalSummary {
    // value -> (frequency, first row seen)
    let mut frequencies: HashMap<String, (usize, usize)> = HashMap::new();
    let mut count = 0usize;

    for (row, cell) in column.cells.iter().enumerate() {
        if cell.is_null() {
            continue;
        }
        count += 1;
        frequencies
            .entry(cell.to_string())
            .and_modify(|(freq, _)| *freq += 1)
            .or_insert((1, row));
    }

    // Most frequent wins; ties go to the value seen first
    let top = frequencies
        .iter()
        .max_by(|(_, (freq_a, first_a)), (_, (freq_b, first_b))| {
            freq_a.cmp(freq_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (freq, _))| (value.clone(), *freq));

    CategoricalSummary {
        column: column.name.clone(),
        count,
        unique: frequencies.len(),
        freq: top.as_ref().map(|(_, freq)| *freq).unwrap_or(0),
        top: top.map(|(value, _)| value),
    }
}

/// Linear interpolation between closest ranks over sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let fraction = position - lower as f64;
    let value = sorted[lower] + (sorted[upper] - sorted[lower]) * fraction;

    // Opposite infinities interpolate to NaN; take the nearer neighbour instead
    if value.is_nan() {
        return if fraction < 0.5 { sorted[lower] } else { sorted[upper] };
    }
    value
}

/// Standard deviation with one delta degree of freedom
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
