//! Individual data quality checks.

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dataset::{BOOLEAN_LITERALS, Dataset, DType, Value, ValueKey, parse_datetime};
use crate::stats::{ZScore, percentage};

use super::report::{
    ColumnNameIssue, FormatError, IssueReport, MissingValues, Outliers, TypeIssue,
};

static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid special character pattern"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Issue label for a text column holding mixed boolean spellings.
pub const INCONSISTENT_BOOLEAN: &str = "Inconsistent boolean format";

/// A single read-only check that records its findings into a report.
pub trait Check {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Scan the dataset and add findings to the report.
    fn run(&self, dataset: &Dataset, issues: &mut IssueReport);
}

/// Flags column names that are awkward for downstream tools.
pub struct ColumnNameCheck;

impl ColumnNameCheck {
    /// Problems with a single column name, in a fixed order.
    pub fn problems(name: &str) -> Vec<String> {
        let mut problems = Vec::new();

        if name.contains(' ') {
            problems.push("contains spaces".to_string());
        }

        if SPECIAL_CHARS.is_match(&name.replace(' ', "")) {
            problems.push("contains special characters".to_string());
        }

        if name != name.to_lowercase() && name != name.to_uppercase() && name != title_case(name) {
            problems.push("inconsistent casing".to_string());
        }

        problems
    }
}

impl Check for ColumnNameCheck {
    fn name(&self) -> &'static str {
        "column_names"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        let found: Vec<ColumnNameIssue> = dataset
            .columns()
            .iter()
            .filter_map(|column| {
                let problems = Self::problems(&column.name);
                (!problems.is_empty()).then(|| ColumnNameIssue {
                    column: column.name.clone(),
                    problems,
                })
            })
            .collect();

        if !found.is_empty() {
            issues.column_name_issues = found;
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

/// Counts nulls per column.
pub struct MissingValueCheck;

impl Check for MissingValueCheck {
    fn name(&self) -> &'static str {
        "missing_values"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        let total = dataset.row_count();

        for (col, column) in dataset.columns().iter().enumerate() {
            let count = dataset.null_count(col);
            if count > 0 {
                issues.missing_values.insert(
                    column.name.clone(),
                    MissingValues {
                        count,
                        percentage: percentage(count, total),
                    },
                );
            }
        }
    }
}

/// Finds rows identical to another row across every column.
pub struct DuplicateCheck;

impl DuplicateCheck {
    /// Positions of every row that has at least one exact duplicate.
    pub fn duplicate_positions(dataset: &Dataset) -> Vec<usize> {
        let mut groups: IndexMap<Vec<ValueKey>, Vec<usize>> = IndexMap::new();
        for (pos, row) in dataset.rows().iter().enumerate() {
            let key = row.iter().map(Value::key).collect();
            groups.entry(key).or_default().push(pos);
        }

        let mut positions: Vec<usize> = groups
            .into_values()
            .filter(|rows| rows.len() > 1)
            .flatten()
            .collect();
        positions.sort_unstable();
        positions
    }
}

impl Check for DuplicateCheck {
    fn name(&self) -> &'static str {
        "duplicates"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        let positions = Self::duplicate_positions(dataset);
        if !positions.is_empty() {
            issues.duplicates = positions
                .into_iter()
                .map(|pos| dataset.row_snapshot(pos))
                .collect();
        }
    }
}

/// Flags numeric values far from their column mean.
pub struct OutlierCheck {
    /// Z-score above which a value is an outlier.
    pub threshold: f64,
    /// Columns with a larger share of nulls are skipped.
    pub max_null_fraction: f64,
}

impl Default for OutlierCheck {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            max_null_fraction: 0.5,
        }
    }
}

impl Check for OutlierCheck {
    fn name(&self) -> &'static str {
        "outliers"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        let total = dataset.row_count();

        for (col, column) in dataset.columns().iter().enumerate() {
            if !column.dtype.is_numeric() {
                continue;
            }

            let nulls = dataset.null_count(col);
            if nulls as f64 > total as f64 * self.max_null_fraction {
                debug!(column = %column.name, nulls, "skipping sparse column");
                continue;
            }

            let Some(z) = ZScore::fit(&dataset.numeric_values(col)) else {
                debug!(column = %column.name, "skipping column without spread");
                continue;
            };

            let mut values = Vec::new();
            let mut indices = Vec::new();
            for (label, value) in dataset.labeled_values(col) {
                if let Some(x) = value.as_f64() {
                    if z.is_outlier(x, self.threshold) {
                        values.push(value.clone());
                        indices.push(label);
                    }
                }
            }

            if !values.is_empty() {
                issues.outliers.insert(
                    column.name.clone(),
                    Outliers {
                        count: values.len(),
                        values,
                        indices,
                    },
                );
            }
        }
    }
}

/// Checks address syntax in columns named like "email".
pub struct EmailFormatCheck;

impl EmailFormatCheck {
    /// Returns true if the text is a well-formed email address.
    pub fn is_valid(text: &str) -> bool {
        EMAIL.is_match(text)
    }
}

impl Check for EmailFormatCheck {
    fn name(&self) -> &'static str {
        "email_format"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        for (col, column) in dataset.columns().iter().enumerate() {
            if !column.name.to_lowercase().contains("email") {
                continue;
            }

            let errors: Vec<FormatError> = dataset
                .labeled_values(col)
                .filter(|(_, value)| !value.is_null())
                .map(|(index, value)| (index, value.to_string()))
                .filter(|(_, text)| !Self::is_valid(text))
                .map(|(index, value)| FormatError { index, value })
                .collect();

            issues.add_format_errors(&column.name, errors);
        }
    }
}

/// Checks that values in columns named like "date" are real calendar dates.
pub struct DateFormatCheck;

impl DateFormatCheck {
    /// Returns true if the value can be read as a date/time.
    ///
    /// Numbers are accepted as epoch offsets; booleans never are.
    pub fn is_valid(value: &Value) -> bool {
        match value {
            Value::DateTime(_) | Value::Integer(_) | Value::Float(_) => true,
            Value::Str(text) => parse_datetime(text).is_some(),
            Value::Bool(_) | Value::Null => false,
        }
    }
}

impl Check for DateFormatCheck {
    fn name(&self) -> &'static str {
        "date_format"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        for (col, column) in dataset.columns().iter().enumerate() {
            if !column.name.to_lowercase().contains("date") {
                continue;
            }

            let errors: Vec<FormatError> = dataset
                .labeled_values(col)
                .filter(|(_, value)| !value.is_null() && !Self::is_valid(value))
                .map(|(index, value)| FormatError {
                    index,
                    value: value.to_string(),
                })
                .collect();

            issues.add_format_errors(&column.name, errors);
        }
    }
}

/// Flags text columns that spell booleans in more than one way.
pub struct BooleanConsistencyCheck;

impl BooleanConsistencyCheck {
    /// Distinct string forms of the non-null values, in first-seen order.
    pub fn distinct_forms(dataset: &Dataset, col: usize) -> IndexSet<String> {
        dataset
            .column_values(col)
            .filter(|v| !v.is_null())
            .map(Value::to_string)
            .collect()
    }
}

impl Check for BooleanConsistencyCheck {
    fn name(&self) -> &'static str {
        "boolean_consistency"
    }

    fn run(&self, dataset: &Dataset, issues: &mut IssueReport) {
        for (col, column) in dataset.columns().iter().enumerate() {
            if column.dtype != DType::Text {
                continue;
            }

            let forms = Self::distinct_forms(dataset, col);
            let all_boolean = forms.iter().all(|f| BOOLEAN_LITERALS.contains(&f.as_str()));

            if all_boolean && forms.len() >= 2 {
                issues.type_errors.insert(
                    column.name.clone(),
                    TypeIssue {
                        issue: INCONSISTENT_BOOLEAN.to_string(),
                        values: forms.into_iter().collect(),
                    },
                );
            }
        }
    }
}
