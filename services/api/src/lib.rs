//! HTTP server and command-line entry points for the JogjaHub portal.

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use jogjahub::error::AppError;

/// Parses the command line and runs the selected command to completion.
pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
