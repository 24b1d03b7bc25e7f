//! The cleaner: repairs a private working copy of a dataset.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::dataset::{Dataset, Value, ValueKey};
use crate::stats::{StreamingStats, ZScore, median};

use super::strategy::{FillStrategy, Keep};

/// Fill value used by [`FillStrategy::Mode`] when a column has no values.
pub const UNKNOWN_MODE: &str = "Unknown";

/// Mutates a working copy of a dataset and records what it did.
///
/// Every operation re-reads the current state of the copy, so the order in
/// which operations run changes their results.
#[derive(Debug, Clone)]
pub struct Cleaner {
    dataset: Dataset,
    log: Vec<String>,
}

impl Cleaner {
    /// Create a cleaner over a copy of the dataset.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            dataset: dataset.clone(),
            log: Vec::new(),
        }
    }

    /// The current working copy.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Log of operations performed, in order.
    pub fn cleaning_log(&self) -> &[String] {
        &self.log
    }

    /// Consume the cleaner, returning the working copy and its log.
    pub fn into_parts(self) -> (Dataset, Vec<String>) {
        (self.dataset, self.log)
    }

    /// Drop rows equal to an earlier (or later) row across every column.
    pub fn remove_duplicates(&mut self, keep: Keep) -> &mut Self {
        let keys: Vec<Vec<ValueKey>> = self
            .dataset
            .rows()
            .iter()
            .map(|row| row.iter().map(Value::key).collect())
            .collect();

        let mut seen = HashSet::new();
        let mut survivors = vec![false; keys.len()];
        match keep {
            Keep::First => {
                for (pos, key) in keys.iter().enumerate() {
                    survivors[pos] = seen.insert(key);
                }
            }
            Keep::Last => {
                for (pos, key) in keys.iter().enumerate().rev() {
                    survivors[pos] = seen.insert(key);
                }
            }
        }

        let before = self.dataset.row_count();
        self.dataset.retain_rows(|pos| survivors[pos]);
        let removed = before - self.dataset.row_count();

        debug!(removed, %keep, "removed duplicates");
        if removed > 0 {
            self.log.push(format!("Removed {} duplicate rows", removed));
        }
        self
    }

    /// Fill missing values column by column.
    ///
    /// Unknown columns and columns without missing values are skipped.
    pub fn fill_missing_values(&mut self, strategy: &IndexMap<String, FillStrategy>) -> &mut Self {
        for (column, method) in strategy {
            let Some(col) = self.dataset.column_index(column) else {
                warn!(column = %column, "fill strategy names an unknown column");
                continue;
            };

            let missing = self.dataset.null_count(col);
            if missing == 0 {
                continue;
            }

            match method {
                FillStrategy::Mean => {
                    let values = self.dataset.numeric_values(col);
                    let Some(mean) = StreamingStats::from_values(values).mean() else {
                        warn!(column = %column, "no numeric values to average");
                        continue;
                    };
                    self.fill_nulls(col, Value::Float(mean));
                    self.log.push(format!(
                        "Filled {} missing values in '{}' with mean: {:.2}",
                        missing, column, mean
                    ));
                }
                FillStrategy::Median => {
                    let Some(mid) = median(&self.dataset.numeric_values(col)) else {
                        warn!(column = %column, "no numeric values for a median");
                        continue;
                    };
                    self.fill_nulls(col, Value::Float(mid));
                    self.log.push(format!(
                        "Filled {} missing values in '{}' with median: {:.2}",
                        missing, column, mid
                    ));
                }
                FillStrategy::Mode => {
                    let mode = self.mode(col).unwrap_or_else(|| Value::from(UNKNOWN_MODE));
                    self.fill_nulls(col, mode.clone());
                    self.log.push(format!(
                        "Filled {} missing values in '{}' with mode: {}",
                        missing, column, mode
                    ));
                }
                FillStrategy::Drop => {
                    let before = self.dataset.row_count();
                    let nulls: Vec<bool> =
                        self.dataset.column_values(col).map(Value::is_null).collect();
                    self.dataset.retain_rows(|pos| !nulls[pos]);
                    let removed = before - self.dataset.row_count();
                    self.log
                        .push(format!("Dropped {} rows with missing '{}'", removed, column));
                }
                FillStrategy::Literal(value) => {
                    self.fill_nulls(col, value.clone());
                    self.log.push(format!(
                        "Filled {} missing values in '{}' with '{}'",
                        missing, column, value
                    ));
                }
            }
            debug!(column = %column, strategy = %method, missing, "filled column");
        }
        self
    }

    /// Drop rows whose value in `column` lies more than `threshold` standard
    /// deviations from the column mean.
    ///
    /// Does nothing if the column is absent, not numeric, or has no spread.
    /// Rows with a null in the column are kept.
    pub fn remove_outliers(&mut self, column: &str, threshold: f64) -> &mut Self {
        let Some(col) = self.dataset.column_index(column) else {
            return self;
        };
        if !self.dataset.columns()[col].dtype.is_numeric() {
            debug!(column, "not numeric, skipping outlier removal");
            return self;
        }
        let Some(z) = ZScore::fit(&self.dataset.numeric_values(col)) else {
            return self;
        };

        let flagged: Vec<bool> = self
            .dataset
            .column_values(col)
            .map(|v| v.as_f64().is_some_and(|x| z.is_outlier(x, threshold)))
            .collect();

        let before = self.dataset.row_count();
        self.dataset.retain_rows(|pos| !flagged[pos]);
        let removed = before - self.dataset.row_count();

        if removed > 0 {
            self.log
                .push(format!("Removed {} outliers from '{}'", removed, column));
        }
        self
    }

    /// Overwrite `column` at the given row labels with `fix_value`.
    ///
    /// Labels no longer present in the working copy are skipped.
    pub fn fix_invalid_values(
        &mut self,
        column: &str,
        indices: &[usize],
        fix_value: impl Into<Value>,
    ) -> &mut Self {
        let Some(col) = self.dataset.column_index(column) else {
            warn!(column, "cannot fix values in an unknown column");
            return self;
        };
        let fix_value = fix_value.into();

        let mut count = 0;
        for &label in indices {
            if let Some(pos) = self.dataset.position_of_label(label) {
                self.dataset.set(pos, col, fix_value.clone());
                count += 1;
            }
        }

        if count > 0 {
            self.dataset.refresh_dtype(col);
            self.log
                .push(format!("Fixed {} invalid values in '{}'", count, column));
        }
        self
    }

    fn fill_nulls(&mut self, col: usize, value: Value) {
        let positions: Vec<usize> = self
            .dataset
            .column_values(col)
            .enumerate()
            .filter(|(_, v)| v.is_null())
            .map(|(pos, _)| pos)
            .collect();

        for pos in positions {
            self.dataset.set(pos, col, value.clone());
        }
        self.dataset.refresh_dtype(col);
    }

    /// Most frequent non-null value; ties go to the smallest value.
    fn mode(&self, col: usize) -> Option<Value> {
        let mut counts: IndexMap<ValueKey, (&Value, usize)> = IndexMap::new();
        for value in self.dataset.column_values(col).filter(|v| !v.is_null()) {
            counts.entry(value.key()).or_insert((value, 0)).1 += 1;
        }

        counts
            .into_values()
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.compare(a)))
            .map(|(value, _)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DType;

    fn strategy(entries: &[(&str, FillStrategy)]) -> IndexMap<String, FillStrategy> {
        entries
            .iter()
            .map(|(c, s)| (c.to_string(), s.clone()))
            .collect()
    }

    fn with_dupes() -> Dataset {
        Dataset::from_columns(vec![
            ("A", vec![1.into(), 2.into(), 2.into(), 3.into(), 2.into()]),
            ("B", vec!["a".into(), "b".into(), "b".into(), "c".into(), "b".into()]),
        ])
    }

    #[test]
    fn test_original_is_untouched() {
        let ds = with_dupes();
        let mut cleaner = Cleaner::new(&ds);
        cleaner.remove_duplicates(Keep::First);
        assert_eq!(ds.row_count(), 5);
        assert_eq!(cleaner.dataset().row_count(), 3);
    }

    #[test]
    fn test_remove_duplicates_keep_first() {
        let mut cleaner = Cleaner::new(&with_dupes());
        cleaner.remove_duplicates(Keep::First);
        assert_eq!(cleaner.dataset().index(), &[0, 1, 3]);
        assert_eq!(cleaner.cleaning_log(), &["Removed 2 duplicate rows"]);
    }

    #[test]
    fn test_remove_duplicates_keep_last() {
        let mut cleaner = Cleaner::new(&with_dupes());
        cleaner.remove_duplicates(Keep::Last);
        assert_eq!(cleaner.dataset().index(), &[0, 3, 4]);
    }

    #[test]
    fn test_remove_duplicates_is_idempotent() {
        let mut cleaner = Cleaner::new(&with_dupes());
        cleaner.remove_duplicates(Keep::First);
        let once = cleaner.dataset().index().to_vec();
        cleaner.remove_duplicates(Keep::First);

        assert_eq!(cleaner.dataset().index(), once.as_slice());
        assert_eq!(cleaner.cleaning_log().len(), 1);
    }

    #[test]
    fn test_fill_mean_logs_rounded_value() {
        let ds = Dataset::from_columns(vec![(
            "A",
            vec![1.into(), 2.into(), Value::Null, 4.into()],
        )]);
        let mut cleaner = Cleaner::new(&ds);
        cleaner.fill_missing_values(&strategy(&[("A", FillStrategy::Mean)]));

        assert_eq!(
            cleaner.cleaning_log(),
            &["Filled 1 missing values in 'A' with mean: 2.33"]
        );
        let filled = cleaner.dataset().get(2, 0).unwrap().as_f64().unwrap();
        assert!((filled - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(cleaner.dataset().columns()[0].dtype, DType::Float);
    }

    #[test]
    fn test_fill_median() {
        let ds = Dataset::from_columns(vec![(
            "A",
            vec![1.into(), 10.into(), Value::Null, 4.into()],
        )]);
        let mut cleaner = Cleaner::new(&ds);
        cleaner.fill_missing_values(&strategy(&[("A", FillStrategy::Median)]));

        assert_eq!(cleaner.dataset().get(2, 0), Some(&Value::from(4.0)));
        assert_eq!(
            cleaner.cleaning_log(),
            &["Filled 1 missing values in 'A' with median: 4.00"]
        );
    }

    #[test]
    fn test_fill_mode_and_unknown_fallback() {
        let ds = Dataset::from_columns(vec![
            ("city", vec!["b".into(), "a".into(), "a".into(), "b".into(), Value::Null]),
            ("empty", vec![Value::Null; 5]),
        ]);
        let mut cleaner = Cleaner::new(&ds);
        cleaner.fill_missing_values(&strategy(&[
            ("city", FillStrategy::Mode),
            ("empty", FillStrategy::Mode),
        ]));

        // Tie between "a" and "b" goes to the smaller value
        assert_eq!(cleaner.dataset().get(4, 0), Some(&Value::from("a")));
        assert_eq!(cleaner.dataset().get(0, 1), Some(&Value::from(UNKNOWN_MODE)));
        assert_eq!(
            cleaner.cleaning_log(),
            &[
                "Filled 1 missing values in 'city' with mode: a",
                "Filled 5 missing values in 'empty' with mode: Unknown",
            ]
        );
    }

    #[test]
    fn test_fill_drop_and_literal() {
        let ds = Dataset::from_columns(vec![
            ("email", vec!["x@y.com".into(), Value::Null, "z@y.com".into()]),
            ("name", vec![Value::Null, "b".into(), Value::Null]),
        ]);
        let mut cleaner = Cleaner::new(&ds);
        cleaner.fill_missing_values(&strategy(&[
            ("email", FillStrategy::Drop),
            ("name", FillStrategy::literal("Unknown")),
            ("missing_column", FillStrategy::Mean),
        ]));

        assert_eq!(cleaner.dataset().index(), &[0, 2]);
        assert_eq!(cleaner.dataset().get(0, 1), Some(&Value::from("Unknown")));
        assert_eq!(
            cleaner.cleaning_log(),
            &[
                "Dropped 1 rows with missing 'email'",
                "Filled 2 missing values in 'name' with 'Unknown'",
            ]
        );
    }

    #[test]
    fn test_fill_skips_complete_columns() {
        let ds = Dataset::from_columns(vec![("A", vec![1.into(), 2.into()])]);
        let mut cleaner = Cleaner::new(&ds);
        cleaner.fill_missing_values(&strategy(&[("A", FillStrategy::Drop)]));
        assert!(cleaner.cleaning_log().is_empty());
    }

    #[test]
    fn test_remove_outliers() {
        let mut values: Vec<Value> = vec![10.into(); 12];
        values.push(1000.into());
        values.push(Value::Null);
        let ds = Dataset::from_columns(vec![("amount", values)]);

        let mut cleaner = Cleaner::new(&ds);
        cleaner.remove_outliers("amount", 3.0);

        assert_eq!(cleaner.dataset().row_count(), 13);
        assert!(cleaner.dataset().position_of_label(12).is_none());
        assert!(cleaner.dataset().position_of_label(13).is_some());
        assert_eq!(cleaner.cleaning_log(), &["Removed 1 outliers from 'amount'"]);
    }

    #[test]
    fn test_remove_outliers_noop_cases() {
        let ds = Dataset::from_columns(vec![
            ("flat", vec![5.into(), 5.into(), 5.into()]),
            ("name", vec!["a".into(), "b".into(), "c".into()]),
        ]);
        let mut cleaner = Cleaner::new(&ds);
        cleaner
            .remove_outliers("flat", 0.5)
            .remove_outliers("name", 0.5)
            .remove_outliers("absent", 0.5);

        assert_eq!(cleaner.dataset().row_count(), 3);
        assert!(cleaner.cleaning_log().is_empty());
    }

    #[test]
    fn test_fix_invalid_values_skips_removed_rows() {
        let mut cleaner = Cleaner::new(&with_dupes());
        cleaner
            .remove_duplicates(Keep::First)
            .fix_invalid_values("B", &[1, 2, 3], "fixed");

        assert_eq!(cleaner.dataset().get_by_label(1, "B"), Some(&Value::from("fixed")));
        assert_eq!(cleaner.dataset().get_by_label(3, "B"), Some(&Value::from("fixed")));
        assert_eq!(
            cleaner.cleaning_log().last().map(String::as_str),
            Some("Fixed 2 invalid values in 'B'")
        );
    }

    #[test]
    fn test_fix_invalid_values_unknown_column() {
        let mut cleaner = Cleaner::new(&with_dupes());
        cleaner.fix_invalid_values("Z", &[0], 1);
        assert!(cleaner.cleaning_log().is_empty());
    }

    #[test]
    fn test_order_of_operations_matters() {
        let ds = Dataset::from_columns(vec![
            ("id", vec![1.into(), 1.into(), 1.into(), 2.into(), 3.into()]),
            ("v", vec![1.into(), 1.into(), 1.into(), 4.into(), Value::Null]),
        ]);
        let plan = strategy(&[("v", FillStrategy::Mean)]);

        let mut dedup_first = Cleaner::new(&ds);
        dedup_first.remove_duplicates(Keep::First).fill_missing_values(&plan);

        let mut fill_first = Cleaner::new(&ds);
        fill_first.fill_missing_values(&plan).remove_duplicates(Keep::First);

        assert_eq!(dedup_first.dataset().get_by_label(4, "v"), Some(&Value::from(2.5)));
        assert_eq!(fill_first.dataset().get_by_label(4, "v"), Some(&Value::from(1.75)));
    }
}
