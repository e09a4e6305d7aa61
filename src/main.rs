mod commands;
mod config;
mod diagnostics;
mod error;
mod filter;
mod resolver;
mod scanner;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::CheckOptions;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "DOCLINKS_LOG";

#[derive(Parser)]
#[command(
    name = "doclinks",
    version,
    about = "Check that relative links in markdown docs point at files that exist"
)]
struct Cli {
    /// Documentation directory, relative to the repository root [default: docs]
    #[arg(long, value_name = "DIR")]
    docs: Option<PathBuf>,
    /// Repository root; failures are reported relative to it
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
    /// Log every skipped target and candidate path to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = CheckOptions {
        docs: cli.docs,
        root: cli.root,
    };

    return match commands::run(&options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    };
}

/// Send `tracing` events to stderr. `DOCLINKS_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_err| return EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    return;
}
