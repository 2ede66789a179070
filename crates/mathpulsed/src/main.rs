//! MathPulse Daemon - tutoring API server
//!
//! Serves the tutor, risk, learning path and analytics services over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use mathpulse_common::{HttpInferenceClient, InferenceClient, MathPulseConfig};
use mathpulsed::{run, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mathpulsed")]
#[command(about = "MathPulse tutoring daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (overrides $MATHPULSE_CONFIG and the default locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides [server].bind)
    #[arg(long)]
    bind: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = MathPulseConfig::load(cli.config.as_deref())?;
    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());

    info!("MathPulse Daemon v{} starting", env!("CARGO_PKG_VERSION"));
    if config.inference.api_token.is_none() {
        info!("No inference API token configured, requests are sent anonymously");
    }

    // The blocking HTTP client owns its own runtime; build and drop it outside tokio
    let client: Arc<dyn InferenceClient> = Arc::new(HttpInferenceClient::new(config.inference.clone())?);
    let state = AppState::new(client.clone(), &config);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let result = runtime.block_on(run(state, &bind));
    drop(runtime);
    drop(client);

    result
}
