//! Depot role administration console.

#![forbid(unsafe_code)]

mod backend;
mod command;
mod console_config;
mod report;

use std::env;

use depot_core::AppError;
use tracing::info;

use crate::backend::ConsoleBackend;
use crate::command::ConsoleCommand;
use crate::console_config::{ConsoleConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    let command = ConsoleCommand::parse(env::args().skip(1))?;
    let mut backend = ConsoleBackend::connect(&config)?;

    let output = command.run(&backend.service, config.language).await?;
    println!("{output}");

    let events = backend.drain_roster_events();
    if !events.is_empty() {
        info!(?events, "roster caches invalidated");
    }

    Ok(())
}
