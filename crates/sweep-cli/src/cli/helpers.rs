use super::CliError;
use super::commands::RunArgs;
use anyhow::Context;
use std::fs;
use std::path::Path;
use sweep_core::SweepConfig;
use sweep_core::sink::TableFormat;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub(super) fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn load_config_file(path: &Path) -> Result<SweepConfig, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read sweep config '{}'", path.display()))?;
    SweepConfig::from_json_str(&content).map_err(CliError::Sweep)
}

/// Defaults, then the config file, then explicit flags.
pub(super) fn resolve_sweep_config(args: &RunArgs) -> Result<SweepConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => SweepConfig::default(),
    };

    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(end) = args.end {
        config.end = end;
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    config.validate().map_err(CliError::Sweep)?;
    Ok(config)
}

pub(super) fn table_format(args: &RunArgs) -> TableFormat {
    let mut format = TableFormat::default();
    if let Some(label) = &args.input_label {
        format.input_label = label.clone();
    }
    if let Some(label) = &args.output_label {
        format.output_label = label.clone();
    }
    format
}
