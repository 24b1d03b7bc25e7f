//! Validation engine for detecting data quality issues.

mod checks;
mod report;
mod validator;

pub use checks::{
    BooleanConsistencyCheck, Check, ColumnNameCheck, DateFormatCheck, DuplicateCheck,
    EmailFormatCheck, INCONSISTENT_BOOLEAN, MissingValueCheck, OutlierCheck,
};
pub use report::{
    ColumnNameIssue, FormatError, IssueReport, MissingValues, Outliers, Summary, TypeIssue,
};
pub use validator::{ValidationConfig, Validator};
