//! Pedestrian CLI - query the count backend and build chart specs.

use clap::Parser;
use ped_core::endpoint::{ApiConfig, DEFAULT_API_BASE};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "ped-cli",
    version,
    about = "Hourly pedestrian counts by weather"
)]
struct Cli {
    /// Base URL of the pedestrian backend
    #[arg(long, global = true, env = "PED_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: ped_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.api_base);
    log::debug!("Using backend at {}", config.base_url);
    ped_cmd::run(config, Duration::from_secs(cli.timeout_secs), cli.command).await
}
