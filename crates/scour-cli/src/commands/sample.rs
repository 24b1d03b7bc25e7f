//! Sample command - write the demo dataset.

use std::path::PathBuf;

use colored::Colorize;
use scour::output::write_csv;
use scour::sample::sales_data;

pub fn run(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = sales_data();
    write_csv(&dataset, &output)?;

    println!("{} Created {}", "✓".green(), output.display());
    println!("  Rows: {}", dataset.row_count());
    println!("  Columns: {}", dataset.column_count());
    println!(
        "  Issues included: duplicates, missing values, outliers, format errors, inconsistent naming"
    );
    Ok(())
}
