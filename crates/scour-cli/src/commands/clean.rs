//! Clean command - repair a file with the derived cleaning plan.

use std::path::PathBuf;

use colored::Colorize;
use scour::output::write_csv;
use scour::{FillStrategy, Keep, Scour, ScourConfig};
use tracing::debug;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    keep: Keep,
    threshold: f64,
    fill: Vec<(String, FillStrategy)>,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(file = %file.display(), %keep, threshold, overrides = fill.len(), "cleaning");
    let config = ScourConfig {
        prepare: false,
        keep,
        outlier_threshold: threshold,
        fill_overrides: fill.into_iter().collect(),
        ..Default::default()
    };

    let result = Scour::with_config(config).run(&file)?;
    let cleaned = result
        .cleaned
        .as_ref()
        .ok_or("cleaning produced no dataset")?;

    super::print_summary(&result.summary);
    println!();
    super::print_log("Cleaning operations:", &result.cleaning_log);

    let before = result.summary.total_rows;
    let after = cleaned.row_count();
    println!();
    println!(
        "{} Data cleaned: {} rows → {} rows (removed {})",
        "✓".green(),
        before,
        after,
        before - after
    );

    let output_path = output.unwrap_or_else(|| super::derived_path(&file, None, "cleaned"));
    write_csv(cleaned, &output_path)?;
    println!(
        "{} Cleaned data saved to: {}",
        "✓".green(),
        output_path.display()
    );

    Ok(())
}
