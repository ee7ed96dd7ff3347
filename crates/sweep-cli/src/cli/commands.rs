use super::CliError;
use super::helpers::{resolve_sweep_config, table_format};
use std::path::PathBuf;
use sweep_core::ExecutionMode;
use sweep_core::optics::SlabReflectance;
use sweep_core::partition::{chunk_lengths, partition};
use sweep_core::run_sweep;
use sweep_core::sink::{PlotConfig, check_plot_path, write_plot, write_report, write_table};
use tracing::debug;

#[derive(clap::Args, Default)]
pub(super) struct RunArgs {
    /// JSON sweep config (start, end, count, workers, mode, threads)
    #[arg(long)]
    pub(super) config: Option<PathBuf>,

    /// First frequency of the sweep
    #[arg(long, allow_negative_numbers = true)]
    pub(super) start: Option<f64>,

    /// Last frequency of the sweep (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub(super) end: Option<f64>,

    /// Number of samples, including both endpoints
    #[arg(long)]
    pub(super) count: Option<usize>,

    /// Number of chunks the sweep is split into
    #[arg(long)]
    pub(super) workers: Option<usize>,

    /// Execution strategy: sequential or parallel
    #[arg(long)]
    pub(super) mode: Option<ExecutionMode>,

    /// Worker pool size for parallel mode
    #[arg(long)]
    pub(super) threads: Option<usize>,

    /// Tab-separated output table
    #[arg(long, default_value = "data/PhC_T.txt")]
    pub(super) output: PathBuf,

    /// Skip writing the output table
    #[arg(long)]
    pub(super) no_table: bool,

    /// SVG plot output path
    #[arg(long)]
    pub(super) plot: Option<PathBuf>,

    /// JSON run report output path
    #[arg(long)]
    pub(super) report: Option<PathBuf>,

    /// Header label of the input column
    #[arg(long)]
    pub(super) input_label: Option<String>,

    /// Header label of the output column
    #[arg(long)]
    pub(super) output_label: Option<String>,
}

#[derive(clap::Args)]
pub(super) struct PlanArgs {
    /// Number of samples
    #[arg(long, default_value_t = 351)]
    count: usize,

    /// Number of workers
    #[arg(long)]
    workers: usize,
}

pub(super) fn run_sweep_command(args: RunArgs) -> Result<i32, CliError> {
    let config = resolve_sweep_config(&args)?;
    if let Some(path) = &args.plot {
        check_plot_path(path).map_err(CliError::Sweep)?;
    }
    let evaluator = SlabReflectance::default();
    debug!(?config, "resolved sweep config");

    println!(
        "Running {} sweep of {} samples over [{}, {}] with {} workers...",
        config.mode, config.count, config.start, config.end, config.workers
    );
    let outcome = run_sweep(&config, &evaluator).map_err(CliError::Sweep)?;
    println!(
        "Elapsed time is {:.4} seconds.",
        outcome.report.elapsed_seconds
    );

    if !args.no_table {
        write_table(&args.output, &outcome.results, &table_format(&args))
            .map_err(CliError::Sweep)?;
        println!("Table: {}", args.output.display());
    }
    if let Some(path) = &args.plot {
        write_plot(path, &outcome.results, &PlotConfig::default()).map_err(CliError::Sweep)?;
        println!("Plot: {}", path.display());
    }
    if let Some(path) = &args.report {
        write_report(path, &outcome.report).map_err(CliError::Sweep)?;
        println!("JSON report: {}", path.display());
    }
    Ok(0)
}

pub(super) fn run_plan_command(args: PlanArgs) -> Result<i32, CliError> {
    let chunks = partition(args.count, args.workers).map_err(CliError::Sweep)?;
    println!("worker\tstart\tlength");
    for chunk in &chunks {
        println!("{}\t{}\t{}", chunk.worker, chunk.start, chunk.len);
    }
    let lengths = chunk_lengths(&chunks);
    println!(
        "{} samples across {} workers (largest chunk {}, smallest {}).",
        args.count,
        chunks.len(),
        lengths.iter().max().copied().unwrap_or_default(),
        lengths.iter().min().copied().unwrap_or_default()
    );
    Ok(0)
}
