pub mod cli;
pub mod config;
pub mod console;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::config::AppConfig;
use crate::services::{ProcessingService, RunOutcome};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_process(cli: &Cli) -> Result<RunOutcome> {
    let config = resolve_config(cli)?;
    let input = match &cli.input {
        Some(path) => path.clone(),
        None => console::prompt_input_path(&config.ledger.default_input_path)?,
    };

    let service = ProcessingService::new(config);
    service.run(&input)
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.delta_ledger {
        config.ledger.delta_ledger_path = path.clone();
    }
    if let Some(path) = &cli.rating_ledger {
        config.ledger.rating_ledger_path = path.clone();
    }
    Ok(config)
}
