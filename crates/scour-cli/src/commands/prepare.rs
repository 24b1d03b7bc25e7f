//! Prepare command - normalize names and types for charting tools.

use std::path::PathBuf;

use colored::Colorize;
use scour::output::write_csv;
use scour::{Scour, ScourConfig};

pub fn run(file: PathBuf, output_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScourConfig {
        clean: false,
        ..Default::default()
    };
    let result = Scour::with_config(config).run(&file)?;

    let prepared = result
        .prepared
        .as_ref()
        .ok_or("preparation produced no dataset")?;
    let metadata = result
        .metadata
        .as_ref()
        .ok_or("preparation produced no metadata")?;

    super::print_log("Preparation:", &result.prep_log);
    println!();

    let data_path = super::derived_path(&file, output_dir.as_deref(), "prepared");
    let metadata_path = super::derived_path(&file, output_dir.as_deref(), "metadata");
    write_csv(prepared, &data_path)?;
    metadata.write_csv(&metadata_path)?;

    println!("{} Prepared data saved to: {}", "✓".green(), data_path.display());
    println!("{} Metadata saved to: {}", "✓".green(), metadata_path.display());

    if let Some(roles) = &result.roles {
        println!();
        super::print_roles(roles);
    }

    Ok(())
}
