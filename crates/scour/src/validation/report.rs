//! Issue report and summary produced by the validator.

use indexmap::IndexMap;
use serde::Serialize;

use crate::dataset::{Dataset, RowSnapshot, Value};

/// Problems found with one column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnNameIssue {
    pub column: String,
    pub problems: Vec<String>,
}

/// Missing-value count for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissingValues {
    pub count: usize,
    /// Share of all rows, rounded to two decimals.
    pub percentage: f64,
}

/// Outliers found in one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outliers {
    pub count: usize,
    /// Flagged values in row order.
    pub values: Vec<Value>,
    /// Row labels of the flagged values.
    pub indices: Vec<usize>,
}

/// A value that failed a format check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatError {
    /// Row label.
    pub index: usize,
    /// The value's string form.
    pub value: String,
}

/// A column whose values use inconsistent representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeIssue {
    pub issue: String,
    /// Distinct string forms observed.
    pub values: Vec<String>,
}

/// Everything the validator found in one dataset.
///
/// All six slots are always present; a check that finds nothing leaves its
/// slot empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueReport {
    pub column_name_issues: Vec<ColumnNameIssue>,
    pub missing_values: IndexMap<String, MissingValues>,
    /// Every row that has at least one exact duplicate, in row order.
    pub duplicates: Vec<RowSnapshot>,
    pub outliers: IndexMap<String, Outliers>,
    pub format_errors: IndexMap<String, Vec<FormatError>>,
    pub type_errors: IndexMap<String, TypeIssue>,
}

impl IssueReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no check found anything.
    pub fn is_clean(&self) -> bool {
        self.column_name_issues.is_empty()
            && self.missing_values.is_empty()
            && self.duplicates.is_empty()
            && self.outliers.is_empty()
            && self.format_errors.is_empty()
            && self.type_errors.is_empty()
    }

    /// Merge format errors for a column into the existing entries.
    pub(crate) fn add_format_errors(&mut self, column: &str, errors: Vec<FormatError>) {
        if errors.is_empty() {
            return;
        }
        self.format_errors
            .entry(column.to_string())
            .or_default()
            .extend(errors);
    }
}

/// Counters derived from an [`IssueReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Columns with at least one missing value.
    pub missing_values: usize,
    /// Rows taking part in an exact duplicate.
    pub duplicate_rows: usize,
    pub columns_with_outliers: usize,
    /// Columns with at least one format error.
    pub format_errors: usize,
    pub column_name_issues: usize,
    pub type_errors: usize,
    pub total_rows: usize,
    pub total_columns: usize,
}

impl Summary {
    /// Derive the counters for a report over a dataset.
    pub fn from_report(issues: &IssueReport, dataset: &Dataset) -> Self {
        Self {
            missing_values: issues.missing_values.len(),
            duplicate_rows: issues.duplicates.len(),
            columns_with_outliers: issues.outliers.len(),
            format_errors: issues.format_errors.len(),
            column_name_issues: issues.column_name_issues.len(),
            type_errors: issues.type_errors.len(),
            total_rows: dataset.row_count(),
            total_columns: dataset.column_count(),
        }
    }

    /// Counters as `(field name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, usize); 8] {
        [
            ("missing_values", self.missing_values),
            ("duplicate_rows", self.duplicate_rows),
            ("columns_with_outliers", self.columns_with_outliers),
            ("format_errors", self.format_errors),
            ("column_name_issues", self.column_name_issues),
            ("type_errors", self.type_errors),
            ("total_rows", self.total_rows),
            ("total_columns", self.total_columns),
        ]
    }
}
