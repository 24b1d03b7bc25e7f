//! Run command - full pipeline with a saved text report.

use std::path::PathBuf;

use colored::Colorize;
use scour::output::write_csv;
use scour::report::save_report;
use scour::{Scour, ScourConfig};
use tracing::debug;

pub fn run(
    file: PathBuf,
    clean: bool,
    prepare: bool,
    output_dir: Option<PathBuf>,
    report_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScourConfig {
        clean,
        prepare,
        ..Default::default()
    };
    debug!(file = %file.display(), clean, prepare, "running pipeline");
    let result = Scour::with_config(config).run(&file)?;

    if let Some(source) = &result.source {
        println!(
            "{} Loaded {} rows and {} columns from {}",
            "✓".green(),
            source.row_count,
            source.column_count,
            source.file.white().bold()
        );
        println!();
    }

    super::print_rule();
    super::print_summary(&result.summary);

    if let Some(cleaned) = &result.cleaned {
        println!();
        println!(
            "{} Data cleaned: {} rows → {} rows (removed {})",
            "✓".green(),
            result.summary.total_rows,
            cleaned.row_count(),
            result.summary.total_rows - cleaned.row_count()
        );
    }

    let dir = output_dir.as_deref();
    match (&result.prepared, &result.metadata, &result.cleaned) {
        (Some(prepared), Some(metadata), _) => {
            let data_path = super::derived_path(&file, dir, "prepared");
            let metadata_path = super::derived_path(&file, dir, "metadata");
            write_csv(prepared, &data_path)?;
            metadata.write_csv(&metadata_path)?;
            println!("{} Prepared data saved to: {}", "✓".green(), data_path.display());
            println!("{} Metadata saved to: {}", "✓".green(), metadata_path.display());
        }
        (_, _, Some(cleaned)) => {
            let data_path = super::derived_path(&file, dir, "cleaned");
            write_csv(cleaned, &data_path)?;
            println!("{} Cleaned data saved to: {}", "✓".green(), data_path.display());
        }
        _ => {}
    }

    if let Some(roles) = &result.roles {
        println!();
        super::print_rule();
        super::print_roles(roles);
    }

    let report = result.render_report();
    let report_path = save_report(&report, &report_dir)?;

    println!();
    super::print_rule();
    println!("{}", report);
    println!();
    println!("{} Report saved to: {}", "✓".green(), report_path.display());

    Ok(())
}
