use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info, warn};

use concord_engine::{CompareConfig, ComparisonResult};
use concord_io::{CompareRequest, DatasetId, DatasetStore, ErrorResponse, IoError};

#[derive(Parser)]
#[command(name = "concord")]
#[command(
    about = "Agreement measures (Pearson, Spearman, Kendall, MSE, DTW) between two time series"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shared tuning parameters for the comparison engine.
#[derive(Args, Debug, Clone)]
struct TuningArgs {
    /// Refinement radius of the coarsen-and-refine DTW
    #[arg(long, default_value_t = 1)]
    radius: usize,

    /// Series at or below this length get exact DTW
    #[arg(long, default_value_t = 100)]
    exact_threshold: usize,

    /// Compute the measures one after another instead of in parallel
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

impl TuningArgs {
    fn config(&self) -> CompareConfig {
        CompareConfig::new()
            .with_radius(self.radius)
            .with_exact_threshold(self.exact_threshold)
            .with_parallel(!self.sequential)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Compare the two series of a JSON request ({"seriesA": [..], "seriesB": [..]})
    Compare {
        /// Path to the request file, or "-" for stdin
        #[arg(long, default_value = "-")]
        request: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Compare two columns of uploaded CSV/JSON tables
    Columns {
        /// Table holding the first column
        #[arg(long)]
        data: PathBuf,

        /// Name of the first column
        #[arg(long)]
        column_a: String,

        /// Name of the second column
        #[arg(long)]
        column_b: String,

        /// Table holding the second column (defaults to --data)
        #[arg(long)]
        data_b: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Load tables and list their identifiers, names and columns
    Datasets {
        /// Paths to CSV/JSON tables
        #[arg(long, required = true, num_args = 1..)]
        data: Vec<PathBuf>,
    },

    /// Print the row labels and values of one column
    Series {
        /// Path to a CSV/JSON table
        #[arg(long)]
        data: PathBuf,

        /// Column name
        #[arg(long)]
        column: String,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ColumnsOutput<'a> {
    dataset_a: DatasetId,
    column_a: &'a str,
    dataset_b: DatasetId,
    column_b: &'a str,
    n: usize,
    #[serde(flatten)]
    result: ComparisonResult,
}

/// Open the request source. Decoding failures come back as the inner error
/// so they can be reported as a client error body.
fn read_request(path: &Path) -> Result<Result<CompareRequest, IoError>> {
    if path == Path::new("-") {
        return Ok(CompareRequest::from_reader(io::stdin().lock()));
    }
    let file =
        File::open(path).with_context(|| format!("failed to open request {}", path.display()))?;
    Ok(CompareRequest::from_reader(BufReader::new(file)))
}

/// Print the error body on stdout and map its status to an exit code.
fn report(body: &ErrorResponse, detail: &dyn std::fmt::Display) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(body)?);
    if body.status == 400 {
        warn!(kind = body.kind, "comparison rejected: {detail}");
        Ok(ExitCode::from(1))
    } else {
        error!(kind = body.kind, "comparison failed: {detail}");
        Ok(ExitCode::from(2))
    }
}

fn report_io(err: &IoError) -> Result<ExitCode> {
    report(&ErrorResponse::from(err), err)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Compare { request, tuning } => {
            let request = match read_request(&request)? {
                Ok(request) => request,
                Err(e) => return report_io(&e),
            };
            info!(
                len_a = request.series_a.len(),
                len_b = request.series_b.len(),
                "request decoded"
            );
            match request.compare(&tuning.config()) {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(e) => return report(&ErrorResponse::from(&e), &e),
            }
        }

        Command::Columns {
            data,
            column_a,
            column_b,
            data_b,
            tuning,
        } => {
            let store = DatasetStore::new();
            let (id_a, _) = store
                .add_file(&data)
                .with_context(|| format!("failed to load {}", data.display()))?;
            let id_b = match &data_b {
                Some(path) => {
                    store
                        .add_file(path)
                        .with_context(|| format!("failed to load {}", path.display()))?
                        .0
                }
                None => id_a,
            };

            let columns = store
                .retrieve(&id_a, &column_a)
                .and_then(|a| Ok((a, store.retrieve(&id_b, &column_b)?)));
            let (a, b) = match columns {
                Ok(pair) => pair,
                Err(e) => return report_io(&e),
            };
            match tuning.config().compare(&a, &b) {
                Ok(result) => {
                    let output = ColumnsOutput {
                        dataset_a: id_a,
                        column_a: &column_a,
                        dataset_b: id_b,
                        column_b: &column_b,
                        n: a.len(),
                        result,
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                Err(e) => return report(&ErrorResponse::from(&e), &e),
            }
        }

        Command::Datasets { data } => {
            let store = DatasetStore::new();
            for path in &data {
                store
                    .add_file(path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
            }
            let listing = store.list()?;
            info!(n_datasets = listing.len(), "datasets loaded");
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }

        Command::Series { data, column } => {
            let store = DatasetStore::new();
            let (id, _) = store
                .add_file(&data)
                .with_context(|| format!("failed to load {}", data.display()))?;
            let series = store.series(&id, &column)?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
