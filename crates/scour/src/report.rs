//! Plain-text rendering of validation findings and operation logs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Result, ScourError};
use crate::validation::{IssueReport, Summary};

const RULE_WIDTH: usize = 70;
const FORMAT_ERROR_PREVIEW: usize = 5;

/// Everything a text report is built from.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub issues: &'a IssueReport,
    pub summary: &'a Summary,
    pub cleaning_log: &'a [String],
    pub prep_log: &'a [String],
}

/// Render a report. Sections with nothing to say are omitted.
pub fn render_text(input: &ReportInput<'_>) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let issues = input.issues;
    let mut out: Vec<String> = Vec::new();

    let section = |out: &mut Vec<String>, title: &str| {
        out.push(title.to_string());
        out.push(light.clone());
    };

    out.push(heavy.clone());
    out.push("DATA QUALITY REPORT".to_string());
    out.push(heavy.clone());
    out.push(format!(
        "Generated: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push(String::new());

    section(&mut out, "SUMMARY");
    for (key, value) in input.summary.entries() {
        out.push(format!("{}: {}", title_case(key), value));
    }
    out.push(String::new());

    if !issues.column_name_issues.is_empty() {
        section(&mut out, "COLUMN NAME ISSUES");
        for issue in &issues.column_name_issues {
            out.push(format!("Column '{}':", issue.column));
            out.extend(issue.problems.iter().map(|p| format!("  - {}", p)));
        }
        out.push(String::new());
    }

    if !issues.missing_values.is_empty() {
        section(&mut out, "MISSING VALUES");
        for (column, missing) in &issues.missing_values {
            out.push(format!(
                "Column '{}': {} missing ({}%)",
                column, missing.count, missing.percentage
            ));
        }
        out.push(String::new());
    }

    if !issues.duplicates.is_empty() {
        section(&mut out, "DUPLICATE ROWS");
        out.push(format!("Found {} duplicate rows", issues.duplicates.len()));
        out.push(String::new());
    }

    if !issues.outliers.is_empty() {
        section(&mut out, "OUTLIERS DETECTED");
        for (column, outliers) in &issues.outliers {
            out.push(format!("Column '{}': {} outliers", column, outliers.count));
            let values: Vec<String> = outliers.values.iter().map(|v| v.to_string()).collect();
            out.push(format!("  Values: [{}]", values.join(", ")));
        }
        out.push(String::new());
    }

    if !issues.format_errors.is_empty() {
        section(&mut out, "FORMAT ERRORS");
        for (column, errors) in &issues.format_errors {
            out.push(format!("Column '{}': {} format errors", column, errors.len()));
            for error in errors.iter().take(FORMAT_ERROR_PREVIEW) {
                out.push(format!("  Row {}: '{}'", error.index, error.value));
            }
            if errors.len() > FORMAT_ERROR_PREVIEW {
                out.push(format!(
                    "  ... and {} more",
                    errors.len() - FORMAT_ERROR_PREVIEW
                ));
            }
        }
        out.push(String::new());
    }

    if !issues.type_errors.is_empty() {
        section(&mut out, "DATA TYPE ISSUES");
        for (column, issue) in &issues.type_errors {
            out.push(format!("Column '{}': {}", column, issue.issue));
            out.push(format!("  Found values: [{}]", issue.values.join(", ")));
        }
        out.push(String::new());
    }

    for (title, log) in [
        ("CLEANING OPERATIONS", input.cleaning_log),
        ("PREPARATION", input.prep_log),
    ] {
        if !log.is_empty() {
            section(&mut out, title);
            out.extend(log.iter().map(|entry| format!("✓ {}", entry)));
            out.push(String::new());
        }
    }

    out.push(heavy);
    out.join("\n")
}

/// Save a rendered report under `dir` with a timestamped file name.
pub fn save_report(text: &str, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| ScourError::io(dir, e))?;

    let name = format!(
        "validation_report_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(name);
    fs::write(&path, text).map_err(|e| ScourError::io(&path, e))?;
    Ok(path)
}

/// `duplicate_rows` -> `Duplicate Rows`
fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
