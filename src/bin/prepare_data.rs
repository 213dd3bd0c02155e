use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use missense_data_prep::app::Preparer;
use missense_data_prep::config::{DEFAULT_DATA_DIR, PrepareConfig};
use missense_data_prep::error::PrepError;
use missense_data_prep::http::HttpDatasetClient;
use missense_data_prep::output::{JsonOutput, LogSink};

#[derive(Parser, Debug)]
#[command(name = "prepare-data")]
#[command(about = "Download and unpack the AlphaMissense and ESM1b prediction datasets")]
#[command(version)]
struct Cli {
    #[arg(short = 'd', long, default_value = DEFAULT_DATA_DIR, help = "Data directory.")]
    data_dir: PathBuf,

    #[arg(short, long, help = "Force all actions.")]
    force: bool,

    #[arg(long, help = "Print a JSON summary of the run to stdout.")]
    json: bool,

    #[arg(short, long, help = "Log at debug level unless RUST_LOG is set.")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let outcome = tracing::subscriber::with_default(subscriber, || run(cli));
    if let Err(report) = outcome {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<PrepError>() {
            return ExitCode::from(error.exit_code());
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn run(cli: Cli) -> miette::Result<()> {
    let config = PrepareConfig::new(cli.data_dir, cli.force)?;
    let client = HttpDatasetClient::new()?;
    let preparer = Preparer::new(config, client);

    let result = preparer.run(&LogSink)?;
    if cli.json {
        JsonOutput::print_prepare(&result).into_diagnostic()?;
    }
    Ok(())
}
