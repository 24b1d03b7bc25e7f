//! CLI command implementations.

pub mod clean;
pub mod prepare;
pub mod run;
pub mod sample;
pub mod validate;

use std::path::{Path, PathBuf};

use colored::Colorize;
use scour::{RoleGuide, Summary};

/// `<dir>/<stem>_<suffix>.csv`, where `dir` defaults to the input's directory.
pub(crate) fn derived_path(file: &Path, dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => file.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{}_{}.csv", stem, suffix))
}

pub(crate) fn print_rule() {
    println!("{}", "-".repeat(70).dimmed());
}

pub(crate) fn print_summary(summary: &Summary) {
    println!("{}", "Validation summary:".cyan().bold());

    let count = |n: usize| {
        if n == 0 {
            n.to_string().green()
        } else {
            n.to_string().yellow()
        }
    };
    println!("  • Column name issues: {}", count(summary.column_name_issues));
    println!("  • Missing values in {} columns", count(summary.missing_values));
    println!("  • {} duplicate rows", count(summary.duplicate_rows));
    println!(
        "  • Outliers in {} columns",
        count(summary.columns_with_outliers)
    );
    println!("  • Format errors in {} columns", count(summary.format_errors));
    println!("  • Type errors in {} columns", count(summary.type_errors));
}

pub(crate) fn print_log(title: &str, log: &[String]) {
    if log.is_empty() {
        return;
    }
    println!("{}", title.yellow().bold());
    for entry in log {
        println!("  {} {}", "✓".green(), entry);
    }
}

pub(crate) fn print_roles(guide: &RoleGuide) {
    println!("{}", "Field suggestions:".cyan().bold());
    for (label, columns) in [
        ("Dates", &guide.dates),
        ("Dimensions", &guide.dimensions),
        ("Measures", &guide.measures),
    ] {
        if !columns.is_empty() {
            println!("  {} ({}): {}", label.bold(), columns.len(), columns.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_path_defaults_to_input_dir() {
        let path = derived_path(Path::new("data/sales.csv"), None, "cleaned");
        assert_eq!(path, PathBuf::from("data/sales_cleaned.csv"));
    }

    #[test]
    fn test_derived_path_with_dir() {
        let path = derived_path(Path::new("sales.tsv"), Some(Path::new("out")), "metadata");
        assert_eq!(path, PathBuf::from("out/sales_metadata.csv"));
    }

    #[test]
    fn test_derived_path_bare_file() {
        let path = derived_path(Path::new("sales.csv"), None, "prepared");
        assert_eq!(path, PathBuf::from("sales_prepared.csv"));
    }
}
