//! Validate command - report data quality issues.

use std::path::PathBuf;

use colored::Colorize;
use scour::report::{ReportInput, render_text};
use scour::{Parser, ValidationConfig, Validator};

pub fn run(
    file: PathBuf,
    json_output: bool,
    threshold: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (dataset, source) = Parser::new().parse_file(&file)?;

    let mut config = ValidationConfig::default();
    if let Some(t) = threshold {
        config.outlier_threshold = t;
    }

    let mut validator = Validator::with_config(&dataset, config);
    let issues = validator.validate_all();
    let summary = validator.summary();

    if json_output {
        let output = serde_json::json!({
            "source": source,
            "issues": issues,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} Loaded {} rows and {} columns from {}",
        "✓".green(),
        source.row_count,
        source.column_count,
        source.file.white().bold()
    );
    println!();
    super::print_summary(&summary);
    println!();

    let report = render_text(&ReportInput {
        issues: &issues,
        summary: &summary,
        cleaning_log: &[],
        prep_log: &[],
    });
    println!("{}", report);

    Ok(())
}
