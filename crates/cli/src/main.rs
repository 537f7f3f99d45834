use anyhow::{Context, Result};
use arbiter_core::{AppConfig, ConfigLoader, FactSnapshot, Mandate, Position};
use arbiter_kernel::evaluate_cycle;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

mod replay;

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "Mandate arbitration kernel for automated trading", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one kernel cycle from JSON inputs
    Evaluate {
        /// Position record JSON file
        #[arg(long)]
        position: String,
        /// Fact snapshot JSON file
        #[arg(long)]
        snapshot: String,
        /// Mandate set JSON file (array)
        #[arg(long)]
        mandates: String,
        /// Config profile overlay (config/Config.<profile>.toml)
        #[arg(long)]
        profile: Option<String>,
    },
    /// Replay a recorded JSONL cycle stream through a symbol actor
    Replay {
        /// JSONL file of replay records
        #[arg(short, long)]
        file: String,
        /// Config profile overlay
        #[arg(long)]
        profile: Option<String>,
    },
    /// Print the effective risk limits after config merging
    Limits {
        /// Config profile overlay
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Evaluate {
            position,
            snapshot,
            mandates,
            profile,
        } => {
            run_evaluate(&position, &snapshot, &mandates, profile.as_deref())?;
        }
        Commands::Replay { file, profile } => {
            let config = load_config(profile.as_deref())?;
            replay::run_replay(&file, config.risk).await?;
        }
        Commands::Limits { profile } => {
            let config = load_config(profile.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config.risk)?);
        }
    }

    Ok(())
}

fn run_evaluate(
    position_path: &str,
    snapshot_path: &str,
    mandates_path: &str,
    profile: Option<&str>,
) -> Result<()> {
    let config = load_config(profile)?;
    let position: Position = read_json(position_path)?;
    let snapshot: FactSnapshot = read_json(snapshot_path)?;
    let mandates: Vec<Mandate> = read_json(mandates_path)?;

    let result = evaluate_cycle(&position, &snapshot, mandates, &config.risk)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn load_config(profile: Option<&str>) -> Result<AppConfig> {
    match profile {
        Some(profile) => ConfigLoader::load_with_profile(profile),
        None => ConfigLoader::load(),
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {path}"))
}
