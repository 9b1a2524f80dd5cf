// Descriptive statistics over a numeric array.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Full-precision summary of one numeric array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (N denominator).
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    /// Largest values, descending.
    pub top: Vec<f64>,
    /// Smallest values, ascending.
    pub bottom: Vec<f64>,
}

/// Same shape as `DescriptiveStats`, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedStats {
    pub count: usize,
    pub sum: i64,
    pub mean: i64,
    pub median: i64,
    pub stddev: i64,
    pub min: i64,
    pub max: i64,
    pub top: Vec<i64>,
    pub bottom: Vec<i64>,
}

impl DescriptiveStats {
    /// Summarize `values`, keeping `outliers` entries in the top/bottom lists.
    ///
    /// An empty slice gives all-zero statistics and empty lists.
    pub fn from_values(values: &[f64], outliers: usize) -> Self {
        if values.is_empty() {
            return DescriptiveStats {
                count: 0,
                sum: 0.0,
                mean: 0.0,
                median: 0.0,
                stddev: 0.0,
                min: 0.0,
                max: 0.0,
                top: Vec::new(),
                bottom: Vec::new(),
            };
        }

        let mut ascending = values.to_vec();
        ascending.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let n = values.len() as f64;
        let sum: f64 = values.iter().sum();
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        DescriptiveStats {
            count: values.len(),
            sum,
            mean,
            median: median_sorted(&ascending),
            stddev: variance.sqrt(),
            min: ascending[0],
            max: ascending[ascending.len() - 1],
            top: ascending.iter().rev().take(outliers).copied().collect(),
            bottom: ascending.iter().take(outliers).copied().collect(),
        }
    }

    pub fn rounded(&self) -> RoundedStats {
        RoundedStats {
            count: self.count,
            sum: round_display(self.sum),
            mean: round_display(self.mean),
            median: round_display(self.median),
            stddev: round_display(self.stddev),
            min: round_display(self.min),
            max: round_display(self.max),
            top: self.top.iter().map(|v| round_display(*v)).collect(),
            bottom: self.bottom.iter().map(|v| round_display(*v)).collect(),
        }
    }
}

/// Median of an ascending, non-empty slice; even lengths average the two
/// central values.
fn median_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Round to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2).
pub fn round_display(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
