//! slipnote CLI - slip note to debit note conversion tool

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use slipnote::ConversionService;

#[derive(Parser)]
#[command(name = "slipnote")]
#[command(author = "rhb-tools")]
#[command(version)]
#[command(about = "Convert a reinsurance slip note into a debit note bundle", long_about = None)]
struct Cli {
    /// Input slip note (.docx)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Reference suffix for the client-facing note (variant A)
    #[arg(short = 'a', long, value_name = "SUFFIX")]
    reference_a: String,

    /// Reference suffix for the reinsurer-facing note (variant B)
    #[arg(short = 'b', long, value_name = "SUFFIX")]
    reference_b: String,

    /// Output archive path (derived from the references if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Reference prefix
    #[arg(long, env = "SLIPNOTE_PREFIX", default_value = slipnote::DEFAULT_PREFIX)]
    prefix: String,

    /// Print the extracted fields as JSON instead of writing a bundle
    #[arg(long)]
    fields_json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            if err.is_client_error() {
                eprintln!("{}", "check the uploaded document and reference suffixes".yellow());
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> slipnote::Result<()> {
    let data = fs::read(&cli.input)?;

    if cli.fields_json {
        let fields = slipnote::extract_fields(&data)?;
        println!("{}", serde_json::to_string_pretty(&fields).unwrap_or_default());
        return Ok(());
    }

    let bundle = ConversionService::new()
        .with_prefix(&cli.prefix)
        .convert(&data, &cli.reference_a, &cli.reference_b)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(bundle.file_name()));
    fs::write(&output, &bundle.bytes)?;

    println!(
        "{} {} ({} and {})",
        "wrote".green().bold(),
        output.display(),
        bundle.entries[0],
        bundle.entries[1]
    );
    Ok(())
}
