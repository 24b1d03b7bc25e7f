//! Scour CLI - validate, clean and prepare tabular data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Validate {
            file,
            json,
            threshold,
        } => commands::validate::run(file, json, threshold),

        Commands::Clean {
            file,
            output,
            keep,
            threshold,
            fill,
        } => commands::clean::run(file, output, keep, threshold, fill),

        Commands::Prepare { file, output_dir } => commands::prepare::run(file, output_dir),

        Commands::Run {
            file,
            no_clean,
            no_prepare,
            output_dir,
            report_dir,
        } => commands::run::run(file, !no_clean, !no_prepare, output_dir, report_dir),

        Commands::Sample { output } => commands::sample::run(output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
