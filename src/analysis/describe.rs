//! Describe-style summary statistics
//!
//! Computes count, mean, sample standard deviation, minimum, quartiles and
//! maximum over a numeric column. Missing values are excluded. Quartiles use
//! linear interpolation between the closest ranks.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Summary statistics of a single column
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl Describe {
    /// Summarise a column, skipping missing values
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut present: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        present.sort_by(f64::total_cmp);

        let count = present.len();
        if count == 0 {
            return Self::empty();
        }

        let n = count as f64;
        let mean = present.iter().sum::<f64>() / n;
        let std = if count > 1 {
            let sum_sq: f64 = present.iter().map(|v| (v - mean).powi(2)).sum();
            Some((sum_sq / (n - 1.0)).sqrt())
        } else {
            None
        };

        Self {
            count,
            mean: Some(mean),
            std,
            min: present.first().copied(),
            q25: quantile(&present, 0.25),
            median: quantile(&present, 0.5),
            q75: quantile(&present, 0.75),
            max: present.last().copied(),
        }
    }

    fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        }
    }

    /// Statistics in output order, keyed by their conventional names
    pub fn entries(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }

    /// Label this summary with the column it was computed over
    pub fn for_column(self, column: &'static str) -> ColumnSummary {
        ColumnSummary {
            column,
            describe: self,
        }
    }
}

/// Linear interpolation quantile over sorted values
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Statistics of one named column.
///
/// Serializes as `{<stat>: {<column>: value}}`, stats in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: &'static str,
    pub describe: Describe,
}

impl Serialize for ColumnSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.describe.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (stat, value) in entries {
            let mut by_column = BTreeMap::new();
            by_column.insert(self.column, value);
            map.serialize_entry(stat, &by_column)?;
        }
        map.end()
    }
}
