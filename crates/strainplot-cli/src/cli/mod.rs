mod commands;
mod helpers;

use clap::Parser;
use strainplot_core::domain::PlotError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PROGRAM_NAME: &str = "strainplot";

pub fn run_from_env() -> i32 {
    init_tracing();
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let plot_error = error.as_plot_error();
            eprintln!("{}", plot_error.diagnostic_line());
            eprintln!("{}", plot_error.fatal_exit_line());
            plot_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once(PROGRAM_NAME.to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch_parsed(cli),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// Log lines go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strainplot=info,strainplot_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[derive(Parser)]
#[command(name = "strainplot", about = "Confidence ellipse and strain grid figures")]
struct Cli {
    /// Print a one-line JSON summary to stdout instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Scatter of maximum-I1 locations with 95% confidence ellipses
    Scatter(commands::ScatterArgs),
    /// Per-site I1 maps with principal strain quivers
    Grids(commands::GridsArgs),
    /// Validation plot of the analytic test field
    Testfun(commands::TestfunArgs),
    /// Parse an average-grid file and write it back out
    Roundtrip(commands::RoundtripArgs),
}

fn dispatch_parsed(cli: Cli) -> Result<i32, CliError> {
    let summary = match cli.command {
        CliCommand::Scatter(args) => commands::run_scatter_command(args)?,
        CliCommand::Grids(args) => commands::run_grids_command(args)?,
        CliCommand::Testfun(args) => commands::run_testfun_command(args)?,
        CliCommand::Roundtrip(args) => commands::run_roundtrip_command(args)?,
    };
    helpers::print_summary(&summary, cli.json)?;
    Ok(0)
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Plot(PlotError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_plot_error(&self) -> PlotError {
        match self {
            Self::Usage(message) => PlotError::invalid_input("INPUT.CLI_USAGE", message.trim_end()),
            Self::Plot(error) => error.clone(),
            Self::Internal(error) => PlotError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}
