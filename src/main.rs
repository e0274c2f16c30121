use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use opsmon::{generate_to_path, write_reports, Config, CsvSource, GeneratorOptions};

#[derive(Parser, Debug)]
#[command(name = "opsmon")]
#[command(about = "Batch data-reliability monitor for metric tables")]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every check and write report.json and report.html
    Monitor {
        /// Input CSV with timestamp, source, metric and value columns
        #[arg(short, long)]
        input: PathBuf,

        /// TOML configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Directory for the generated reports
        #[arg(short, long, default_value = "reports")]
        outdir: PathBuf,
    },

    /// Write a synthetic table with known anomalies
    Generate {
        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed
        #[arg(long, default_value = "7")]
        seed: u64,

        /// Number of days per series
        #[arg(long, default_value = "120")]
        periods: usize,

        /// First day of the series (YYYY-MM-DD)
        #[arg(long, default_value = "2025-09-01")]
        start: NaiveDate,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Monitor {
            input,
            config,
            outdir,
        } => monitor(&input, &config, &outdir),
        Command::Generate {
            output,
            seed,
            periods,
            start,
        } => generate(
            &output,
            GeneratorOptions {
                seed,
                periods,
                start,
            },
        ),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn monitor(input: &Path, config: &Path, outdir: &Path) -> Result<()> {
    let config = Config::load(config)
        .with_context(|| format!("Failed to load config from {}", config.display()))?;

    let mut source = CsvSource::new(input);
    let report = opsmon::monitor_source(&mut source, &config)
        .with_context(|| format!("Failed to monitor {}", input.display()))?;

    let paths = write_reports(&report, outdir)
        .with_context(|| format!("Failed to write reports to {}", outdir.display()))?;

    println!("Report written: {}", paths.json.display());
    println!("HTML written: {}", paths.html.display());
    Ok(())
}

fn generate(output: &Path, options: GeneratorOptions) -> Result<()> {
    let rows = generate_to_path(output, &options)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} rows to {}", rows, output.display());
    Ok(())
}
