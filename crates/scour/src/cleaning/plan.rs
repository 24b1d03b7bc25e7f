//! Derive a cleaning plan from validation findings.

use indexmap::IndexMap;
use tracing::debug;

use crate::dataset::Dataset;
use crate::validation::IssueReport;

use super::cleaner::Cleaner;
use super::strategy::{FillStrategy, Keep};

/// Fill value for non-numeric columns in a derived plan.
pub const DEFAULT_TEXT_FILL: &str = "Unknown";

/// An ordered set of cleaning steps: duplicates, then fills, then outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningPlan {
    /// Duplicate policy; `None` skips deduplication.
    pub keep: Option<Keep>,
    /// Fill strategy per column.
    pub fill: IndexMap<String, FillStrategy>,
    /// Columns to strip outliers from.
    pub outlier_columns: Vec<String>,
    pub outlier_threshold: f64,
}

impl Default for CleaningPlan {
    fn default() -> Self {
        Self {
            keep: Some(Keep::First),
            fill: IndexMap::new(),
            outlier_columns: Vec::new(),
            outlier_threshold: 3.0,
        }
    }
}

impl CleaningPlan {
    /// Build the automatic plan for a validated dataset.
    ///
    /// Numeric columns with missing values are filled with their median, all
    /// others with a literal "Unknown". Every column with outliers has them
    /// removed.
    pub fn from_issues(issues: &IssueReport, dataset: &Dataset) -> Self {
        let fill = issues
            .missing_values
            .keys()
            .map(|column| {
                let numeric = dataset
                    .column(column)
                    .is_some_and(|c| c.dtype.is_numeric());
                let strategy = if numeric {
                    FillStrategy::Median
                } else {
                    FillStrategy::literal(DEFAULT_TEXT_FILL)
                };
                (column.clone(), strategy)
            })
            .collect();

        Self {
            fill,
            outlier_columns: issues.outliers.keys().cloned().collect(),
            ..Self::default()
        }
    }

    /// Replace (or add) the fill strategy for a column.
    pub fn with_fill(mut self, column: impl Into<String>, strategy: FillStrategy) -> Self {
        self.fill.insert(column.into(), strategy);
        self
    }

    pub fn with_keep(mut self, keep: Option<Keep>) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    /// Run the plan against a cleaner.
    pub fn apply(&self, cleaner: &mut Cleaner) {
        debug!(
            fills = self.fill.len(),
            outlier_columns = self.outlier_columns.len(),
            "applying cleaning plan"
        );

        if let Some(keep) = self.keep {
            cleaner.remove_duplicates(keep);
        }
        if !self.fill.is_empty() {
            cleaner.fill_missing_values(&self.fill);
        }
        for column in &self.outlier_columns {
            cleaner.remove_outliers(column, self.outlier_threshold);
        }
    }
}
