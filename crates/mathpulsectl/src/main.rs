//! MathPulse Control - command line access to the tutoring services
//!
//! Runs the services in-process; no daemon required.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mathpulsectl::commands;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mathpulsectl")]
#[command(about = "MathPulse - AI math tutor tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (overrides $MATHPULSE_CONFIG and the default locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the tutor a question
    Ask {
        message: String,

        /// JSON file with the conversation so far
        #[arg(long)]
        history: Option<PathBuf>,

        /// Skip the model and answer with the fallback engine only
        #[arg(long)]
        offline: bool,
    },

    /// Predict academic risk for one student (JSON profile)
    Risk { file: PathBuf },

    /// Build a remedial learning path (JSON request)
    Path { file: PathBuf },

    /// Compute the class daily insight (JSON array of students)
    Insight { file: PathBuf },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Ask {
            message,
            history,
            offline,
        } => commands::ask(config, &message, history.as_deref(), offline),
        Commands::Risk { file } => commands::risk(config, &file),
        Commands::Path { file } => commands::path(config, &file),
        Commands::Insight { file } => commands::insight(&file),
        Commands::Config => commands::show_config(config),
    }
}
