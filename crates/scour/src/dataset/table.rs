//! The in-memory tabular dataset.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{DType, Value};

/// A snapshot of one row, keyed by column name in column order.
pub type RowSnapshot = IndexMap<String, Value>;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within the dataset.
    pub name: String,
    /// Current storage type.
    pub dtype: DType,
}

/// Ordered rows of named, ordered columns.
///
/// Every row has exactly one value per column. Each row also carries a label,
/// assigned `0..n` at construction, which stays attached to the row when
/// other rows are dropped. Row indices reported by the validator and accepted
/// by the cleaner are labels.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
    index: Vec<usize>,
}

impl Dataset {
    /// Create an empty dataset with the given column names.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let columns = names
            .into_iter()
            .map(|name| Column {
                name: name.into(),
                dtype: DType::Text,
            })
            .collect();

        Self {
            columns,
            rows: Vec::new(),
            index: Vec::new(),
        }
    }

    /// Build a dataset from named columns of values.
    ///
    /// Shorter columns are padded with nulls. Column types are inferred.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Self {
        let row_count = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let mut dataset = Self::new(Vec::<String>::new());
        let mut data: Vec<Vec<Value>> = Vec::with_capacity(columns.len());

        for (name, mut values) in columns {
            values.resize(row_count, Value::Null);
            dataset.columns.push(Column {
                name: name.into(),
                dtype: DType::infer(&values),
            });
            data.push(values);
        }

        let mut iters: Vec<_> = data.into_iter().map(|c| c.into_iter()).collect();
        for label in 0..row_count {
            let row = iters
                .iter_mut()
                .map(|it| it.next().unwrap_or_default())
                .collect();
            dataset.rows.push(row);
            dataset.index.push(label);
        }

        dataset
    }

    /// Build a dataset from rows of values. Column types are inferred.
    pub fn from_rows<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        let mut dataset = Self::new(names);
        for row in rows {
            dataset.push_row(row);
        }
        dataset.infer_types();
        dataset
    }

    /// Append a row, padding or truncating it to the column count.
    ///
    /// Column types are not updated; call [`Dataset::infer_types`] once all
    /// rows are in.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        let label = self.index.last().map(|l| l + 1).unwrap_or(0);
        self.rows.push(row);
        self.index.push(label);
    }

    /// Re-infer every column's type from its current values.
    pub fn infer_types(&mut self) {
        for col in 0..self.columns.len() {
            self.refresh_dtype(col);
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Row labels in row order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Get a specific cell by row position and column position.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get a cell by row label and column name.
    pub fn get_by_label(&self, label: usize, column: &str) -> Option<&Value> {
        let row = self.position_of_label(label)?;
        let col = self.column_index(column)?;
        self.get(row, col)
    }

    /// Values of one column in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[col])
    }

    /// Values of one column paired with their row labels.
    pub fn labeled_values(&self, col: usize) -> impl Iterator<Item = (usize, &Value)> {
        self.index.iter().copied().zip(self.column_values(col))
    }

    /// Non-null numeric values of a column, in row order.
    pub fn numeric_values(&self, col: usize) -> Vec<f64> {
        self.column_values(col).filter_map(Value::as_f64).collect()
    }

    /// Row position currently holding a label.
    pub fn position_of_label(&self, label: usize) -> Option<usize> {
        self.index.iter().position(|&l| l == label)
    }

    /// Number of null values in a column.
    pub fn null_count(&self, col: usize) -> usize {
        self.column_values(col).filter(|v| v.is_null()).count()
    }

    /// Number of distinct non-null values in a column.
    pub fn distinct_count(&self, col: usize) -> usize {
        self.column_values(col)
            .filter(|v| !v.is_null())
            .map(Value::key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// A full snapshot of the row at a position.
    pub fn row_snapshot(&self, row: usize) -> RowSnapshot {
        self.columns
            .iter()
            .zip(&self.rows[row])
            .map(|(c, v)| (c.name.clone(), v.clone()))
            .collect()
    }

    /// Keep only the rows for which `keep(position)` returns true.
    ///
    /// Labels stay attached to their rows.
    pub(crate) fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mask: Vec<bool> = (0..self.rows.len()).map(&mut keep).collect();
        let mut flags = mask.iter();
        self.rows.retain(|_| *flags.next().unwrap_or(&true));
        let mut flags = mask.iter();
        self.index.retain(|_| *flags.next().unwrap_or(&true));
    }

    /// Overwrite one cell. The column type is not recomputed.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Value) {
        self.rows[row][col] = value;
    }

    /// Replace a whole column and its type tag.
    pub(crate) fn replace_column(&mut self, col: usize, values: Vec<Value>, dtype: DType) {
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
        self.columns[col].dtype = dtype;
    }

    /// Recompute one column's type tag from its values.
    pub(crate) fn refresh_dtype(&mut self, col: usize) {
        let dtype = DType::infer(self.column_values(col));
        self.columns[col].dtype = dtype;
    }

    /// Rename every column at once.
    pub(crate) fn rename_columns(&mut self, names: Vec<String>) {
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
    }
}
