//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scour::{FillStrategy, Keep};

/// Scour: validate, clean and prepare tabular data
#[derive(Parser)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report data quality issues in a file
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the issue report and summary as JSON
        #[arg(long)]
        json: bool,

        /// Z-score above which a value is an outlier
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Validate, repair, and save a cleaned copy
    Clean {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file stem>_cleaned.csv next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which duplicate to keep
        #[arg(long, default_value = "first")]
        keep: Keep,

        /// Z-score threshold for outlier removal
        #[arg(long, default_value = "3.0")]
        threshold: f64,

        /// Fill strategy override, e.g. --fill age=mean or --fill city=Unknown
        #[arg(long, value_name = "COLUMN=STRATEGY", value_parser = parse_fill)]
        fill: Vec<(String, FillStrategy)>,
    },

    /// Normalize names and types, and write column metadata
    Prepare {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for the prepared data and metadata (default: input's directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Run the full pipeline and save a text report
    Run {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Skip cleaning
        #[arg(long)]
        no_clean: bool,

        /// Skip presentation prep
        #[arg(long)]
        no_prepare: bool,

        /// Directory for output data files (default: input's directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Directory for the text report
        #[arg(long, default_value = "reports")]
        report_dir: PathBuf,
    },

    /// Write the demo sales dataset
    Sample {
        /// Output path
        #[arg(short, long, default_value = "sample_data/sales_data.csv")]
        output: PathBuf,
    },
}

/// Parse `COLUMN=STRATEGY`.
fn parse_fill(s: &str) -> Result<(String, FillStrategy), String> {
    let (column, token) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected COLUMN=STRATEGY, got '{}'", s))?;
    if column.is_empty() {
        return Err(format!("Missing column name in '{}'", s));
    }
    let strategy = token
        .parse()
        .map_err(|_| format!("Invalid strategy in '{}'", s))?;
    Ok((column.to_string(), strategy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fill() {
        assert_eq!(
            parse_fill("age=median"),
            Ok(("age".to_string(), FillStrategy::Median))
        );
        assert_eq!(
            parse_fill("city=Unknown"),
            Ok(("city".to_string(), FillStrategy::literal("Unknown")))
        );
        assert!(parse_fill("age").is_err());
        assert!(parse_fill("=mean").is_err());
    }

    #[test]
    fn test_parse_clean_args() {
        let cli = Cli::parse_from([
            "scour", "clean", "data.csv", "--keep", "last", "--fill", "age=mean",
        ]);
        match cli.command {
            Commands::Clean { keep, fill, threshold, .. } => {
                assert_eq!(keep, Keep::Last);
                assert_eq!(threshold, 3.0);
                assert_eq!(fill, vec![("age".to_string(), FillStrategy::Mean)]);
            }
            _ => panic!("expected clean"),
        }
    }
}
