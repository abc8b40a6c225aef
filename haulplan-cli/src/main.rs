//! Entry point for the `haulplan` command-line interface.
#![forbid(unsafe_code)]

use haulplan_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    init_logging();
    match haulplan_cli::run() {
        // Help, version and usage errors carry their own exit codes.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => outcome.map_err(eyre::Report::from),
    }
}

/// Route `log` records to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
