//! Example: run the full pipeline on a file, or on the built-in sample.
//!
//! Usage:
//!   cargo run --example pipeline -- [file_path]

use std::env;

use scour::sample::sales_data;
use scour::{PipelineResult, Scour};

fn main() -> scour::Result<()> {
    let scour = Scour::new();

    let result: PipelineResult = match env::args().nth(1) {
        Some(path) => scour.run(path)?,
        None => {
            println!("No file given, using the sample sales data\n");
            scour.process(&sales_data())
        }
    };

    println!("{}", result.render_report());

    if let Some(roles) = &result.roles {
        println!("\nDimensions: {}", roles.dimensions.join(", "));
        println!("Measures:   {}", roles.measures.join(", "));
        println!("Dates:      {}", roles.dates.join(", "));
    }

    if let Some(final_data) = result.final_dataset() {
        println!(
            "\nFinal dataset: {} rows x {} columns",
            final_data.row_count(),
            final_data.column_count()
        );
    }

    Ok(())
}
