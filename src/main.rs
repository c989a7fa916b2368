use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use profile2csv::{batch, logger};

/// Convert every JSON profile file in a folder to a CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert JSON profile arrays to CSV", long_about = None)]
struct Cli {
    #[arg(default_value = "input_json_files")]
    input_dir: PathBuf,
    #[arg(default_value = "output_csv_files")]
    output_dir: PathBuf,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let report = batch::run(&cli.input_dir, &cli.output_dir)?;

    tracing::info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(())
}
