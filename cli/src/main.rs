//! dormroster CLI - convert a hostel occupancy workbook to JSON.

use clap::Parser;
use colored::*;
use std::fs;
use std::path::PathBuf;

/// Convert a hostel occupancy workbook (.xlsx) into normalized student records
#[derive(Parser)]
#[command(
    name = "dormroster",
    version,
    about = "Convert a hostel occupancy workbook to JSON",
    long_about = "dormroster - hostel occupancy workbook conversion.\n\n\
                  Decodes the two-sheet occupancy export and writes the\n\
                  normalized, sorted student records as a JSON array."
)]
struct Cli {
    /// Input workbook path
    input: PathBuf,

    /// Output JSON path
    #[arg(short, long, default_value = "students.json")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> dormroster::Result<()> {
    let records = dormroster::convert_workbook(&cli.input)?;
    let json = dormroster::records_to_json(&records)?;

    // Nothing is written until the whole workbook has converted cleanly.
    fs::write(&cli.output, json)?;

    println!(
        "{} Wrote {} student records to {}",
        "✓".green().bold(),
        records.len(),
        cli.output.display()
    );
    Ok(())
}
