use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use stromgedacht_exporter::{
    client::{self, Client},
    http, AppState,
};
use tracing_subscriber::EnvFilter;

/// Prometheus exporter for the StromGedacht grid state API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long = "web.listen-address", default_value = "127.0.0.1:9321")]
    listen_address: SocketAddr,

    /// Base URL of the StromGedacht API
    #[arg(long = "api.url", env = "STROMGEDACHT_API_URL", default_value = client::DEFAULT_BASE_URL)]
    api_url: String,

    /// Timeout for a single upstream request, in seconds
    #[arg(long = "api.timeout", default_value_t = 30)]
    api_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let api = Client::new(&cli.api_url, Duration::from_secs(cli.api_timeout))
        .wrap_err("failed to create API client")?;
    tracing::info!(api_url = %cli.api_url, "using grid api");

    http::server(cli.listen_address, AppState::new(api)).await
}
