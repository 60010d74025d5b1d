//! Community trust and session-lifecycle policy engine for a tabletop
//! gaming platform.

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

pub mod config;
pub mod error;
pub mod telemetry;
pub mod trust;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
