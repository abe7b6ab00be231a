use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use ward_metrics::reader::{read_stays, write_stays_csv};
use ward_metrics::synth::{SynthConfig, generate_stays};
use ward_metrics::utils::logging::{
    create_spinner, finish_and_clear, finish_progress_bar, log_rejected_rows, print_report,
};
use ward_metrics::{MalformedRowPolicy, MetricsConfig, derive_metrics};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Parser)]
#[command(name = "ward-metrics", version, about = "Hospital ward metrics from patient stays")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive metrics from a CSV or Parquet stay file
    Report {
        /// Input file (.csv, or .parquet/.pq)
        input: PathBuf,
        /// Field delimiter for text input
        #[arg(long, default_value_t = ',')]
        delimiter: char,
        /// Skip malformed rows instead of failing
        #[arg(long)]
        skip_malformed: bool,
        /// Readmission window in days
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        window: Option<i64>,
        /// Compute tables in parallel
        #[arg(long)]
        parallel: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a synthetic stay file
    Synth {
        /// Output CSV path
        output: PathBuf,
        /// Number of patients
        #[arg(long, default_value_t = 200)]
        patients: usize,
        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Report {
            input,
            delimiter,
            skip_malformed,
            window,
            parallel,
            json,
        } => {
            let delimiter = u8::try_from(delimiter)
                .with_context(|| format!("delimiter '{delimiter}' is not a single byte"))?;
            let mut config = MetricsConfig::from_env()
                .with_delimiter(delimiter)
                .with_parallel(parallel);
            if skip_malformed {
                config = config.with_malformed_rows(MalformedRowPolicy::SkipAndReport);
            }
            if let Some(days) = window {
                config = config.with_readmission_window(days);
            }

            let start = Instant::now();
            let spinner = create_spinner(Some("Loading stays..."));
            let loaded = read_stays(&input, &config);
            finish_and_clear(&spinner);
            let loaded = loaded.with_context(|| format!("failed to load {}", input.display()))?;
            log_rejected_rows(&loaded.rejected, &input);
            if !loaded.is_clean() {
                warn!(
                    "Report covers {} stays; {} rows were skipped",
                    loaded.records.len(),
                    loaded.rejected.len()
                );
            }

            let report = derive_metrics(&loaded.records, &config)
                .with_context(|| format!("failed to derive metrics for {}", input.display()))?;

            if json {
                println!("{}", report.to_json()?);
            } else {
                print_report(&report);
            }
            info!("Report completed in {:?}", start.elapsed());
        }
        Command::Synth {
            output,
            patients,
            seed,
        } => {
            let config = SynthConfig {
                seed,
                patients,
                ..SynthConfig::default()
            };
            let spinner = create_spinner(Some("Generating stays..."));
            let stays = generate_stays(&config);
            let written = write_stays_csv(&output, &stays, b',');
            finish_progress_bar(&spinner, Some("Done"));
            written.with_context(|| format!("failed to write {}", output.display()))?;
            info!("Wrote {} synthetic stays to {}", stays.len(), output.display());
        }
    }

    Ok(())
}
