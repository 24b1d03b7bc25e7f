//! Visualization roles for columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::{DType, Dataset};

/// Distinct/row ratio above which a numeric column is a measure.
pub const MEASURE_CARDINALITY_RATIO: f64 = 0.5;

/// How a column should be used when building charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Categorical or low-cardinality field.
    Dimension,
    /// Continuous, high-cardinality numeric field.
    Measure,
    /// Date-time field.
    Date,
    #[default]
    Unknown,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Dimension => write!(f, "Dimension"),
            ColumnRole::Measure => write!(f, "Measure"),
            ColumnRole::Date => write!(f, "Date"),
            ColumnRole::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Column names bucketed by suggested role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGuide {
    pub dimensions: Vec<String>,
    pub measures: Vec<String>,
    pub dates: Vec<String>,
}

impl RoleGuide {
    /// Classify every column of a dataset.
    ///
    /// An empty dataset yields empty buckets.
    pub fn classify(dataset: &Dataset) -> Self {
        let mut guide = Self::default();
        let rows = dataset.row_count();
        if rows == 0 {
            return guide;
        }

        for (col, column) in dataset.columns().iter().enumerate() {
            let bucket = match column.dtype {
                DType::DateTime => &mut guide.dates,
                DType::Integer | DType::Float => {
                    let ratio = dataset.distinct_count(col) as f64 / rows as f64;
                    if ratio > MEASURE_CARDINALITY_RATIO {
                        &mut guide.measures
                    } else {
                        &mut guide.dimensions
                    }
                }
                DType::Boolean | DType::Text => &mut guide.dimensions,
            };
            bucket.push(column.name.clone());
        }
        guide
    }

    /// The role assigned to a column.
    pub fn role_of(&self, column: &str) -> ColumnRole {
        let contains = |bucket: &[String]| bucket.iter().any(|c| c == column);
        if contains(&self.dimensions) {
            ColumnRole::Dimension
        } else if contains(&self.measures) {
            ColumnRole::Measure
        } else if contains(&self.dates) {
            ColumnRole::Date
        } else {
            ColumnRole::Unknown
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.measures.is_empty() && self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Value, parse_datetime};

    fn date(text: &str) -> Value {
        parse_datetime(text).map(Value::DateTime).unwrap_or_default()
    }

    #[test]
    fn test_classify_four_rows() {
        let ds = Dataset::from_columns(vec![
            (
                "day",
                vec![
                    date("2024-01-01"),
                    date("2024-01-02"),
                    date("2024-01-03"),
                    date("2024-01-04"),
                ],
            ),
            ("category", vec!["A".into(), "B".into(), "A".into(), "B".into()]),
            ("amount", vec![1.into(), 2.into(), 3.into(), 4.into()]),
        ]);

        let guide = RoleGuide::classify(&ds);
        assert_eq!(guide.dates, vec!["day"]);
        assert_eq!(guide.dimensions, vec!["category"]);
        assert_eq!(guide.measures, vec!["amount"]);
    }

    #[test]
    fn test_low_cardinality_numeric_is_dimension() {
        let ds = Dataset::from_columns(vec![(
            "rating",
            vec![1.into(), 2.into(), 1.into(), 2.into()],
        )]);
        let guide = RoleGuide::classify(&ds);
        assert_eq!(guide.dimensions, vec!["rating"]);
        assert_eq!(guide.role_of("rating"), ColumnRole::Dimension);
    }

    #[test]
    fn test_zero_rows_gives_empty_buckets() {
        let ds = Dataset::new(["a", "b"]);
        assert!(RoleGuide::classify(&ds).is_empty());
    }

    #[test]
    fn test_role_of_unknown_column() {
        assert_eq!(RoleGuide::default().role_of("x"), ColumnRole::Unknown);
    }
}
