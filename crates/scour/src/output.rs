//! Writing datasets and artifacts to disk.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Result, ScourError};

/// Create the parent directory of `path` if it does not exist.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScourError::io(parent, e))?;
    }
    Ok(())
}

/// Write a dataset as comma-separated values with a header row.
///
/// Nulls are written as empty cells.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(dataset.column_names())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush().map_err(|e| ScourError::io(path, e))?;

    debug!(path = %path.display(), rows = dataset.row_count(), "wrote csv");
    Ok(())
}

/// Write any serializable artifact as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| ScourError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use crate::input::Parser;

    #[test]
    fn test_write_csv_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("data.csv");
        let ds = Dataset::from_columns(vec![
            ("id", vec![1.into(), 2.into()]),
            ("amount", vec![2.5.into(), Value::Null]),
            ("note", vec!["a, b".into(), "c".into()]),
        ]);

        write_csv(&ds, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "id,amount,note\n1,2.5,\"a, b\"\n2,,c\n");

        let back = Parser::new().parse_str(&text).unwrap();
        assert_eq!(back.column_names(), ds.column_names());
        assert!(back.get(1, 1).unwrap().is_null());
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        write_json(&vec!["a", "b"], &path).unwrap();

        let parsed: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }
}
