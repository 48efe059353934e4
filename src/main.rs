use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use cdtw_engine::{Dtw, NearestNeighbourSearch, TimeSeries};
use cdtw_io::{
    DEFAULT_LENGTH, DEFAULT_NOISE_STD, Dataset, ExperimentName, RadiusSpec, ResultWriter,
    SearchReport, SequenceId, SequenceReader, SyntheticDataset,
};

#[derive(Parser)]
#[command(name = "cdtw")]
#[command(about = "Constrained (Sakoe-Chiba) DTW distance and nearest-neighbour search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for the synthetic demo dataset
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

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

/// Options shared by the search-style subcommands.
#[derive(Args, Debug, Clone)]
struct SearchArgs {
    /// Sakoe-Chiba band radius: an absolute count ("3") or a share of the sequence length ("10%")
    #[arg(long, short, default_value_t = RadiusSpec::default(), allow_hyphen_values = true)]
    radius: RadiusSpec,

    /// Print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Match a noisy phase-shifted cosine against four synthetic sequences
    Demo {
        /// Number of samples per sequence
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,

        /// Standard deviation of the additive Gaussian noise
        #[arg(long, default_value_t = DEFAULT_NOISE_STD)]
        noise: f64,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Find the candidate in a CSV file nearest to a query sequence
    Search {
        /// CSV file of candidate sequences (`id,t0,t1,...`)
        #[arg(long)]
        data: PathBuf,

        /// CSV file holding the query sequence (same layout)
        #[arg(long)]
        query: PathBuf,

        /// ID of the query row (defaults to the first row)
        #[arg(long)]
        query_id: Option<String>,

        /// Experiment name; when set, the report is also written as JSON
        #[arg(long)]
        experiment: Option<String>,

        /// Output directory for the JSON report
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print the constrained DTW distance between two comma-separated sequences
    Distance {
        /// First sequence, e.g. "1,2,2,3"
        #[arg(long, allow_hyphen_values = true)]
        a: String,

        /// Second sequence, same length as the first
        #[arg(long, allow_hyphen_values = true)]
        b: String,

        /// Band radius (absolute or percentage)
        #[arg(long, short, default_value = "0", allow_hyphen_values = true)]
        radius: RadiusSpec,
    },
}

#[derive(Serialize)]
struct DistanceOutput {
    radius: usize,
    length: usize,
    distance: f64,
}

fn parse_sequence(raw: &str) -> Result<TimeSeries> {
    let values = raw
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid number \"{}\"", v.trim()))
        })
        .collect::<Result<Vec<_>>>()?;
    TimeSeries::new(values).context("invalid sequence")
}

/// Run the search, then print (and optionally persist) the report.
fn run_search(
    query_id: &SequenceId,
    query: &TimeSeries,
    candidates: &Dataset,
    args: &SearchArgs,
    writer: Option<&ResultWriter>,
) -> Result<()> {
    let band = args.radius.resolve(query.len());
    info!(spec = %args.radius, radius = band.radius(), sequence_length = query.len(), "band resolved");

    let result = NearestNeighbourSearch::new(Dtw::from_band(band))
        .search(query.as_view(), &candidates.series)
        .context("nearest-neighbour search failed")?;
    info!(best_index = result.best_index, best_distance = %result.best_distance(), "search finished");

    let report = SearchReport::new(query_id, query, candidates, band.radius(), &result);

    if let Some(writer) = writer {
        writer.write_search(&report)?;
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        let mut stdout = std::io::stdout().lock();
        report.render_text(&mut stdout)?;
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
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
        Command::Demo {
            length,
            noise,
            search,
        } => {
            let data = SyntheticDataset::generate(length, noise, cli.seed)
                .context("failed to generate synthetic dataset")?;
            info!(n_candidates = data.candidates.len(), length, "synthetic dataset ready");
            run_search(&data.query_id, &data.query, &data.candidates, &search, None)?;
        }

        Command::Search {
            data,
            query,
            query_id,
            experiment,
            output_dir,
            search,
        } => {
            let candidates = SequenceReader::new(&data)
                .read()
                .context("failed to read candidate CSV")?;
            let queries = SequenceReader::new(&query)
                .read()
                .context("failed to read query CSV")?;
            let (id, series) = queries
                .select(query_id.as_deref())
                .context("failed to select query sequence")?;

            let writer = experiment
                .map(|name| -> Result<ResultWriter> {
                    let name = ExperimentName::new(name)?;
                    Ok(ResultWriter::new(&output_dir, name)?)
                })
                .transpose()?;

            run_search(id, series, &candidates, &search, writer.as_ref())?;
        }

        Command::Distance { a, b, radius } => {
            let a = parse_sequence(&a).context("failed to parse --a")?;
            let b = parse_sequence(&b).context("failed to parse --b")?;
            let band = radius.resolve(a.len());
            let distance = Dtw::from_band(band)
                .distance(a.as_view(), b.as_view())
                .context("distance computation failed")?;

            let output = DistanceOutput {
                radius: band.radius(),
                length: a.len(),
                distance: distance.value(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
