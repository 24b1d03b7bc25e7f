//! The validator: runs every check over a dataset.

use tracing::{debug, info};

use crate::dataset::Dataset;

use super::checks::{
    BooleanConsistencyCheck, Check, ColumnNameCheck, DateFormatCheck, DuplicateCheck,
    EmailFormatCheck, MissingValueCheck, OutlierCheck,
};
use super::report::{IssueReport, Summary};

/// Configuration for validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationConfig {
    /// Z-score above which a numeric value is an outlier.
    pub outlier_threshold: f64,
    /// Numeric columns with a larger share of nulls skip outlier detection.
    pub max_null_fraction: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            outlier_threshold: 3.0,
            max_null_fraction: 0.5,
        }
    }
}

/// Read-only scanner producing an [`IssueReport`] for one dataset.
pub struct Validator<'a> {
    dataset: &'a Dataset,
    config: ValidationConfig,
    issues: IssueReport,
}

impl<'a> Validator<'a> {
    /// Create a validator with default configuration.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_config(dataset, ValidationConfig::default())
    }

    /// Create a validator with custom configuration.
    pub fn with_config(dataset: &'a Dataset, config: ValidationConfig) -> Self {
        Self {
            dataset,
            config,
            issues: IssueReport::new(),
        }
    }

    /// The checks `validate_all` runs, in order.
    fn checks(&self) -> Vec<Box<dyn Check>> {
        vec![
            Box::new(ColumnNameCheck),
            Box::new(MissingValueCheck),
            Box::new(DuplicateCheck),
            Box::new(self.outlier_check(self.config.outlier_threshold)),
            Box::new(EmailFormatCheck),
            Box::new(DateFormatCheck),
            Box::new(BooleanConsistencyCheck),
        ]
    }

    fn outlier_check(&self, threshold: f64) -> OutlierCheck {
        OutlierCheck {
            threshold,
            max_null_fraction: self.config.max_null_fraction,
        }
    }

    fn run(&mut self, check: &dyn Check) {
        debug!(check = check.name(), "running check");
        check.run(self.dataset, &mut self.issues);
    }

    /// Run every check against a fresh report and return a snapshot of it.
    ///
    /// Repeated calls over the same dataset return identical reports.
    pub fn validate_all(&mut self) -> IssueReport {
        self.issues = IssueReport::new();
        for check in self.checks() {
            self.run(check.as_ref());
        }

        let summary = self.summary();
        info!(
            rows = summary.total_rows,
            columns = summary.total_columns,
            duplicate_rows = summary.duplicate_rows,
            missing = summary.missing_values,
            "validation complete"
        );

        self.issues.clone()
    }

    /// Flag problematic column names.
    pub fn check_column_names(&mut self) -> &mut Self {
        self.run(&ColumnNameCheck);
        self
    }

    /// Count missing values per column.
    pub fn check_missing_values(&mut self) -> &mut Self {
        self.run(&MissingValueCheck);
        self
    }

    /// Find rows duplicated across all columns.
    pub fn check_duplicates(&mut self) -> &mut Self {
        self.run(&DuplicateCheck);
        self
    }

    /// Find z-score outliers in numeric columns.
    pub fn check_numeric_outliers(&mut self, threshold: f64) -> &mut Self {
        let check = self.outlier_check(threshold);
        self.run(&check);
        self
    }

    /// Validate email syntax in columns named like "email".
    pub fn check_email_format(&mut self) -> &mut Self {
        self.run(&EmailFormatCheck);
        self
    }

    /// Validate dates in columns named like "date".
    pub fn check_date_format(&mut self) -> &mut Self {
        self.run(&DateFormatCheck);
        self
    }

    /// Flag text columns mixing boolean spellings.
    pub fn check_boolean_consistency(&mut self) -> &mut Self {
        self.run(&BooleanConsistencyCheck);
        self
    }

    /// The report accumulated so far.
    pub fn issues(&self) -> &IssueReport {
        &self.issues
    }

    /// Counters derived from the current report.
    pub fn summary(&self) -> Summary {
        Summary::from_report(&self.issues, self.dataset)
    }
}
