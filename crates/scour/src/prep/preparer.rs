//! Reshape a dataset for visualization tools.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::dataset::{DType, Dataset, Value, boolean_literal, parse_datetime};

use super::metadata::MetadataTable;
use super::roles::RoleGuide;

/// Share of all rows that must parse as numbers before a text column is
/// converted.
pub const NUMERIC_COERCION_RATIO: f64 = 0.8;

/// Normalizes names and types of a working copy of a dataset.
#[derive(Debug, Clone)]
pub struct Preparer {
    dataset: Dataset,
    log: Vec<String>,
}

impl Preparer {
    /// Create a preparer over a copy of the dataset.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            dataset: dataset.clone(),
            log: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Log of operations performed, in order.
    pub fn prep_log(&self) -> &[String] {
        &self.log
    }

    pub fn into_parts(self) -> (Dataset, Vec<String>) {
        (self.dataset, self.log)
    }

    /// Rename every column to `Title_Case_With_Underscores`.
    ///
    /// Names that end up empty become `Column_<n>` and clashing names get a
    /// numeric suffix, so names stay unique.
    pub fn normalize_column_names(&mut self) -> &mut Self {
        let mut taken = HashSet::new();
        let names: Vec<String> = self
            .dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let mut base = normalize_name(&column.name);
                if base.is_empty() {
                    base = format!("Column_{}", i + 1);
                }
                let mut name = base.clone();
                let mut suffix = 2;
                while !taken.insert(name.clone()) {
                    name = format!("{}_{}", base, suffix);
                    suffix += 1;
                }
                name
            })
            .collect();

        let count = names.len();
        self.dataset.rename_columns(names);
        self.log.push(format!("Standardized {} column names", count));
        self
    }

    /// Coerce text columns to dates, booleans or numbers where they fit.
    ///
    /// Each attempt looks at the column's type as left by the previous one.
    pub fn enforce_data_types(&mut self) -> &mut Self {
        let mut changes = Vec::new();

        for col in 0..self.dataset.column_count() {
            let name = self.dataset.columns()[col].name.clone();

            if self.dtype(col) == DType::Text && name.to_lowercase().contains("date") {
                let original = self.dtype(col);
                if self.coerce_dates(col) {
                    changes.push(transition(&name, original, self.dtype(col)));
                }
            }

            if self.dtype(col) == DType::Text {
                let original = self.dtype(col);
                if self.coerce_booleans(col) {
                    changes.push(transition(&name, original, self.dtype(col)));
                }
            }

            if self.dtype(col) == DType::Text {
                let original = self.dtype(col);
                if self.coerce_numbers(col) {
                    changes.push(transition(&name, original, self.dtype(col)));
                }
            }
        }

        debug!(conversions = changes.len(), "enforced data types");
        if !changes.is_empty() {
            self.log
                .push(format!("Converted {} column types", changes.len()));
            self.log
                .extend(changes.into_iter().map(|c| format!("  - {}", c)));
        }
        self
    }

    /// Bucket columns by suggested visualization role.
    pub fn classify_columns(&self) -> RoleGuide {
        RoleGuide::classify(&self.dataset)
    }

    /// Describe every column of the working copy.
    pub fn build_metadata(&self) -> MetadataTable {
        MetadataTable::build(&self.dataset, &self.classify_columns())
    }

    fn dtype(&self, col: usize) -> DType {
        self.dataset.columns()[col].dtype
    }

    /// Converts when at least one value parses; the rest become null.
    fn coerce_dates(&mut self, col: usize) -> bool {
        let parsed: Vec<Value> = self
            .dataset
            .column_values(col)
            .map(|v| match v {
                Value::DateTime(dt) => Value::DateTime(*dt),
                Value::Str(s) => parse_datetime(s).map(Value::DateTime).unwrap_or_default(),
                _ => Value::Null,
            })
            .collect();

        if parsed.iter().all(Value::is_null) {
            return false;
        }
        self.dataset.replace_column(col, parsed, DType::DateTime);
        true
    }

    fn coerce_booleans(&mut self, col: usize) -> bool {
        let forms: BTreeSet<String> = self
            .dataset
            .column_values(col)
            .filter(|v| !v.is_null())
            .map(Value::to_string)
            .collect();
        if !forms.iter().all(|f| boolean_literal(f).is_some()) {
            return false;
        }

        let mapped: Vec<Value> = self
            .dataset
            .column_values(col)
            .map(|v| {
                if v.is_null() {
                    Value::Null
                } else {
                    boolean_literal(&v.to_string()).map(Value::Bool).unwrap_or_default()
                }
            })
            .collect();
        self.dataset.replace_column(col, mapped, DType::Boolean);
        true
    }

    fn coerce_numbers(&mut self, col: usize) -> bool {
        let rows = self.dataset.row_count();
        if rows == 0 {
            return false;
        }

        let parsed: Vec<Value> = self
            .dataset
            .column_values(col)
            .map(parse_number)
            .collect();
        let converted = parsed.iter().filter(|v| !v.is_null()).count();
        if converted as f64 / rows as f64 <= NUMERIC_COERCION_RATIO {
            return false;
        }

        let all_integers = parsed.iter().all(|v| matches!(v, Value::Integer(_)));
        let (values, dtype) = if all_integers {
            (parsed, DType::Integer)
        } else {
            let floats = parsed
                .into_iter()
                .map(|v| v.as_f64().map(Value::Float).unwrap_or_default())
                .collect();
            (floats, DType::Float)
        };
        self.dataset.replace_column(col, values, dtype);
        true
    }
}

fn transition(column: &str, from: DType, to: DType) -> String {
    format!("{}: {} → {}", column, from, to)
}

fn parse_number(value: &Value) -> Value {
    match value {
        Value::Integer(_) | Value::Float(_) => value.clone(),
        Value::Str(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Value::Integer(i)
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| !f.is_nan())
                    .map(Value::Float)
                    .unwrap_or_default()
            }
        }
        _ => Value::Null,
    }
}

/// Normalize one column name.
pub fn normalize_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    replaced
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("order id"), "Order_Id");
        assert_eq!(normalize_name("customer-email"), "Customer_Email");
        assert_eq!(normalize_name("  weird__col--name  "), "Weird_Col_Name");
        assert_eq!(normalize_name("AGE"), "Age");
        assert_eq!(normalize_name("___"), "");
    }

    #[test]
    fn test_normalize_column_names_logs_every_column() {
        let ds = Dataset::from_columns(vec![
            ("order id", vec![1.into()]),
            ("Status", vec!["ok".into()]),
        ]);
        let mut prep = Preparer::new(&ds);
        prep.normalize_column_names();

        assert_eq!(prep.dataset().column_names(), vec!["Order_Id", "Status"]);
        assert_eq!(prep.prep_log(), &["Standardized 2 column names"]);
        assert_eq!(ds.column_names(), vec!["order id", "Status"]);
    }

    #[test]
    fn test_normalize_column_names_keeps_names_unique() {
        let ds = Dataset::from_columns(vec![
            ("order id", vec![1.into()]),
            ("order-id", vec![2.into()]),
            ("%%", vec![3.into()]),
        ]);
        let mut prep = Preparer::new(&ds);
        prep.normalize_column_names();

        assert_eq!(
            prep.dataset().column_names(),
            vec!["Order_Id", "Order_Id_2", "Column_3"]
        );
    }

    #[test]
    fn test_enforce_month_year_dates() {
        let ds = Dataset::from_columns(vec![(
            "order date",
            vec!["Jan 2024".into(), "February 2024".into()],
        )]);
        let mut prep = Preparer::new(&ds);
        prep.enforce_data_types();

        let first = |m| {
            Value::from(
                chrono::NaiveDate::from_ymd_opt(2024, m, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            )
        };
        assert_eq!(prep.dataset().get(0, 0), Some(&first(1)));
        assert_eq!(prep.dataset().get(1, 0), Some(&first(2)));
    }

    #[test]
    fn test_enforce_date_column() {
        let ds = Dataset::from_columns(vec![(
            "order date",
            vec!["2024-01-15".into(), "2024-13-45".into(), Value::Null],
        )]);
        let mut prep = Preparer::new(&ds);
        prep.enforce_data_types();

        assert_eq!(prep.dataset().columns()[0].dtype, DType::DateTime);
        assert!(prep.dataset().get(1, 0).unwrap().is_null());
        assert_eq!(
            prep.prep_log(),
            &["Converted 1 column types", "  - order date: string → datetime"]
        );
    }

    #[test]
    fn test_enforce_boolean_column() {
        let ds = Dataset::from_columns(vec![(
            "shipped",
            vec!["yes".into(), "No".into(), "1".into(), Value::Null],
        )]);
        let mut prep = Preparer::new(&ds);
        prep.enforce_data_types();

        let values: Vec<&Value> = prep.dataset().column_values(0).collect();
        assert_eq!(
            values,
            vec![
                &Value::Bool(true),
                &Value::Bool(false),
                &Value::Bool(true),
                &Value::Null
            ]
        );
        assert_eq!(prep.dataset().columns()[0].dtype, DType::Boolean);
    }

    #[test]
    fn test_enforce_numeric_needs_more_than_eighty_percent() {
        let mostly: Vec<Value> = ["1", "2", "3", "4", "5", "x"]
            .iter()
            .map(|s| Value::from(*s))
            .collect();
        let borderline: Vec<Value> = ["1.5", "2", "3", "4", "x"]
            .iter()
            .map(|s| Value::from(*s))
            .collect();
        let ds = Dataset::from_columns(vec![("mostly", mostly), ("borderline", borderline)]);

        let mut prep = Preparer::new(&ds);
        prep.enforce_data_types();

        // 5/6 parse, and the unparsable value forces float storage
        assert_eq!(prep.dataset().columns()[0].dtype, DType::Float);
        assert!(prep.dataset().get(5, 0).unwrap().is_null());
        // 4/6 rows (one padded null) is not enough
        assert_eq!(prep.dataset().columns()[1].dtype, DType::Text);
        assert_eq!(
            prep.prep_log(),
            &["Converted 1 column types", "  - mostly: string → float"]
        );
    }

    #[test]
    fn test_enforce_integer_column() {
        let ds = Dataset::from_columns(vec![(
            "code",
            vec!["10".into(), "20".into(), "30".into()],
        )]);
        let mut prep = Preparer::new(&ds);
        prep.enforce_data_types();
        assert_eq!(prep.dataset().columns()[0].dtype, DType::Integer);
        assert_eq!(prep.dataset().get(0, 0), Some(&Value::Integer(10)));
    }

    #[test]
    fn test_enforce_leaves_typed_columns_alone() {
        let ds = Dataset::from_columns(vec![
            ("amount", vec![1.5.into(), 2.into()]),
            ("name", vec!["alice".into(), "bob".into()]),
        ]);
        let mut prep = Preparer::new(&ds);
        prep.enforce_data_types();
        assert!(prep.prep_log().is_empty());
    }

    #[test]
    fn test_build_metadata_uses_current_state() {
        let ds = Dataset::from_columns(vec![
            ("order date", vec!["2024-01-01".into(), "2024-01-02".into()]),
            ("qty", vec!["1".into(), "2".into()]),
        ]);
        let mut prep = Preparer::new(&ds);
        prep.normalize_column_names().enforce_data_types();

        let guide = prep.classify_columns();
        assert_eq!(guide.dates, vec!["Order_Date"]);
        assert_eq!(guide.measures, vec!["Qty"]);

        let table = prep.build_metadata();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].data_type, "datetime");
    }
}
