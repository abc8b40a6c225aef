//! Command-line interface for planning multi-stop delivery routes.
//!
//! `haulplan plan <request.json>` reads a JSON plan request, geocodes its
//! locations against a Nominatim-compatible service and prints the resulting
//! route plan as pretty JSON on stdout. Options may also come from
//! configuration files or `HAULPLAN_*` environment variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request-path";
const ARG_PLAN_NOMINATIM_URL: &str = "nominatim-url";
const ARG_PLAN_USER_AGENT: &str = "user-agent";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PLAN_STRICT_GEOCODING: &str = "strict-geocoding";
const ENV_PLAN_REQUEST: &str = "HAULPLAN_CMDS_PLAN_REQUEST_PATH";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration loading,
/// request decoding, geocoding or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "haulplan",
    about = "Sequence delivery stops and plan fuel and rest breaks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route from a JSON request file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
