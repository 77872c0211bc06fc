//! kjv-search entry point.
//!
//! Logging goes to stderr so stdout carries only results. With `--json`
//! the log lines are JSON as well.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::Cli;
use kjvs_core::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli);

    let config = AppConfig::load()?;
    tracing::debug!("loaded config: store={:?}", config.store);

    commands::execute(cli.command, &config, cli.json).await
}

fn initialize_logging(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false);

    if cli.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
