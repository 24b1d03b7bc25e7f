//! Per-column metadata for downstream tools.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::dataset::{Dataset, Value};
use crate::error::{Result, ScourError};
use crate::stats::percentage;

use super::roles::{ColumnRole, RoleGuide};

const SAMPLE_COUNT: usize = 3;
const SAMPLE_WIDTH: usize = 50;
const NOT_APPLICABLE: &str = "N/A";

/// Header row of the metadata CSV.
pub const METADATA_HEADERS: [&str; 9] = [
    "Column_Name",
    "Data_Type",
    "Null_Count",
    "Null_Percentage",
    "Unique_Values",
    "Sample_Values",
    "Min_Value",
    "Max_Value",
    "Suggested_Role",
];

/// Description of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: String,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_values: usize,
    /// Up to three non-null values, each cut to 50 characters.
    pub sample_values: String,
    /// Only set for numeric columns with at least one value.
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub suggested_role: ColumnRole,
}

impl ColumnMetadata {
    fn describe(dataset: &Dataset, col: usize, guide: &RoleGuide) -> Self {
        let column = &dataset.columns()[col];
        let null_count = dataset.null_count(col);

        let sample_values = dataset
            .column_values(col)
            .filter(|v| !v.is_null())
            .take(SAMPLE_COUNT)
            .map(|v| v.to_string().chars().take(SAMPLE_WIDTH).collect::<String>())
            .collect::<Vec<_>>()
            .join(", ");

        let (min, max) = if column.dtype.is_numeric() {
            let values = || dataset.column_values(col).filter(|v| !v.is_null());
            (
                values().min_by(|a, b| a.compare(b)).cloned(),
                values().max_by(|a, b| a.compare(b)).cloned(),
            )
        } else {
            (None, None)
        };

        Self {
            name: column.name.clone(),
            data_type: column.dtype.label().to_string(),
            null_count,
            null_percentage: percentage(null_count, dataset.row_count()),
            unique_values: dataset.distinct_count(col),
            sample_values,
            min,
            max,
            suggested_role: guide.role_of(&column.name),
        }
    }

    fn record(&self) -> [String; 9] {
        let bound = |v: &Option<Value>| {
            v.as_ref()
                .map(Value::to_string)
                .unwrap_or_else(|| NOT_APPLICABLE.to_string())
        };
        [
            self.name.clone(),
            self.data_type.clone(),
            self.null_count.to_string(),
            format!("{:.2}", self.null_percentage),
            self.unique_values.to_string(),
            self.sample_values.clone(),
            bound(&self.min),
            bound(&self.max),
            self.suggested_role.to_string(),
        ]
    }
}

/// One metadata row per column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataTable {
    pub columns: Vec<ColumnMetadata>,
}

impl MetadataTable {
    /// Describe every column, using `guide` for the suggested roles.
    pub fn build(dataset: &Dataset, guide: &RoleGuide) -> Self {
        let columns = (0..dataset.column_count())
            .map(|col| ColumnMetadata::describe(dataset, col, guide))
            .collect();
        Self { columns }
    }

    pub fn get(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Write the table as CSV, creating parent directories as needed.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ScourError::io(parent, e))?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(METADATA_HEADERS)?;
        for column in &self.columns {
            writer.write_record(column.record())?;
        }
        writer.flush().map_err(|e| ScourError::io(path, e))?;
        Ok(())
    }
}
