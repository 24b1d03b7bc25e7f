//! CSV/TSV parser with delimiter detection and column type inference.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::dataset::{DType, Dataset, Value};
use crate::error::{Result, ScourError};

use super::source::{SourceMetadata, format_name};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell contents read as missing.
pub const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "null", "NULL", "NaN", "nan", "None", "#N/A", "<NA>",
];

const TRUE_TOKENS: &[&str] = &["True", "true", "TRUE"];
const FALSE_TOKENS: &[&str] = &["False", "false", "FALSE"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text into a [`Dataset`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| ScourError::io(path, e))?;
        let size_bytes = file.metadata().map_err(|e| ScourError::io(path, e))?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| ScourError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.delimiter_for(&contents)?;
        let dataset = self.parse_with(&contents, delimiter)?;

        debug!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "parsed file"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name(delimiter).to_string(),
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, source))
    }

    /// Parse in-memory text.
    pub fn parse_str(&self, text: &str) -> Result<Dataset> {
        self.parse_bytes(text.as_bytes())
    }

    /// Parse raw bytes, detecting the delimiter unless configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let delimiter = self.delimiter_for(bytes)?;
        self.parse_with(bytes, delimiter)
    }

    fn delimiter_for(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => Ok(d),
            None => detect_delimiter(bytes),
        }
    }

    fn parse_with(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => unique_headers(record?.iter()),
                None => return Err(ScourError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in records {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }
            rows.push(result?.iter().map(str::to_string).collect());
        }

        let headers = if self.config.has_header {
            headers
        } else {
            let width = rows.first().map(Vec::len).unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(ScourError::EmptyData("No columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(ScourError::EmptyData("No data rows found".to_string()));
        }

        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(col, name)| {
                let cells: Vec<&str> = rows.iter().map(|row| row[col].as_str()).collect();
                (name, convert_column(&cells))
            })
            .collect();

        Ok(Dataset::from_columns(columns))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a cell represents a missing value.
pub fn is_null_token(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell.trim())
}

/// Convert one column of raw cells to values of a single inferred type.
fn convert_column(cells: &[&str]) -> Vec<Value> {
    let present = || cells.iter().filter(|c| !is_null_token(c)).map(|c| c.trim());

    let dtype = if present().next().is_none() {
        DType::Text
    } else if present().all(|c| c.parse::<i64>().is_ok()) {
        DType::Integer
    } else if present().all(|c| c.parse::<f64>().is_ok()) {
        DType::Float
    } else if present().all(|c| TRUE_TOKENS.contains(&c) || FALSE_TOKENS.contains(&c)) {
        DType::Boolean
    } else {
        DType::Text
    };

    cells
        .iter()
        .map(|cell| {
            if is_null_token(cell) {
                return Value::Null;
            }
            let trimmed = cell.trim();
            match dtype {
                DType::Integer => trimmed.parse().map(Value::Integer).unwrap_or_default(),
                DType::Float => trimmed.parse().map(Value::Float).unwrap_or_default(),
                DType::Boolean => Value::Bool(TRUE_TOKENS.contains(&trimmed)),
                DType::DateTime | DType::Text => Value::Str(cell.to_string()),
            }
        })
        .collect()
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn unique_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .map(|name| {
            let mut candidate = name.to_string();
            let mut n = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{}.{}", name, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ScourError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted() {
        let data = b"name;note\n\"a,b\";x\n\"c,d\";y";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_infers_types() {
        let parser = Parser::new();
        let ds = parser
            .parse_str("name,age,score,active,joined\nAlice,30,1.5,True,2024-01-15\nBob,NA,2,false,2024-02-01")
            .unwrap();

        let dtypes: Vec<DType> = ds.columns().iter().map(|c| c.dtype).collect();
        assert_eq!(
            dtypes,
            vec![
                DType::Text,
                DType::Integer,
                DType::Float,
                DType::Boolean,
                DType::Text
            ]
        );
        assert_eq!(ds.get(0, 1), Some(&Value::Integer(30)));
        assert!(ds.get(1, 1).unwrap().is_null());
        assert_eq!(ds.get(1, 3), Some(&Value::Bool(false)));
        assert_eq!(ds.get(0, 4), Some(&Value::from("2024-01-15")));
    }

    #[test]
    fn test_parse_pads_and_truncates_rows() {
        let ds = Parser::new().parse_str("a,b\n1\n2,3,4").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert!(ds.get(0, 1).unwrap().is_null());
        assert_eq!(ds.get(1, 1), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_parse_mixed_boolean_literals_stay_text() {
        let ds = Parser::new().parse_str("flag\nyes\nNo\n1").unwrap();
        assert_eq!(ds.columns()[0].dtype, DType::Text);
    }

    #[test]
    fn test_all_null_column_is_text() {
        let ds = Parser::new().parse_str("a,b\n1,\n2,NA").unwrap();
        assert_eq!(ds.columns()[1].dtype, DType::Text);
        assert_eq!(ds.null_count(1), 2);
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let ds = Parser::new().parse_str("x,x,x\n1,2,3").unwrap();
        assert_eq!(ds.column_names(), vec!["x", "x.1", "x.2"]);
    }

    #[test]
    fn test_no_header() {
        let config = ParserConfig {
            has_header: false,
            ..Default::default()
        };
        let ds = Parser::with_config(config).parse_str("1,2\n3,4").unwrap();
        assert_eq!(ds.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let config = ParserConfig {
            max_rows: Some(1),
            ..Default::default()
        };
        let ds = Parser::with_config(config).parse_str("a\n1\n2\n3").unwrap();
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let err = Parser::new().parse_str("a,b\n").unwrap_err();
        assert!(matches!(err, ScourError::EmptyData(_)));
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(Parser::new().parse_str("").is_err());
    }

    #[test]
    fn test_is_null_token() {
        assert!(is_null_token(""));
        assert!(is_null_token("NA"));
        assert!(is_null_token("N/A"));
        assert!(is_null_token("null"));
        assert!(is_null_token("#N/A"));
        assert!(is_null_token(" NaN "));
        assert!(!is_null_token("value"));
        assert!(!is_null_token("0"));
    }
}
