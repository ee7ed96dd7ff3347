mod commands;
mod helpers;

use clap::Parser;
use sweep_core::SweepError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let sweep_error = error.as_sweep_error();
            eprintln!("{}", sweep_error.diagnostic_line());
            eprintln!("{}", sweep_error.fatal_exit_line());
            sweep_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(&cli.log_level);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "phc-sweep", version, about = "Parallel reflectance sweep for photonic-crystal slabs")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. warn, info, sweep_core=debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Evaluate the sweep and write the table, plot and report
    Run(commands::RunArgs),
    /// Print the chunk layout for a sample count and worker count
    Plan(commands::PlanArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Run(args) => commands::run_sweep_command(args),
        CliCommand::Plan(args) => commands::run_plan_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Sweep(SweepError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_sweep_error(&self) -> SweepError {
        match self {
            Self::Usage(message) => SweepError::config(message.trim_end().to_string()),
            Self::Sweep(error) => error.clone(),
            Self::Internal(error) => SweepError::config(format!("{error:#}")),
        }
    }
}
