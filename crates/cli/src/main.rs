//! parcelwatch CLI - track parcels and keep a watchlist until they arrive.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parcelwatch_core::{detect, ManualInput};
use parcelwatch_engine::RefreshEngine;
use parcelwatch_storage::SqliteStore;
use parcelwatch_tracking::{BinderByteClient, TrackingConfig, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parcelwatch")]
#[command(about = "Track parcels by AWB and watch them until delivered", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tracking provider API key
    #[arg(long, env = "BINDERBYTE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Watchlist database file
    #[arg(long, env = "PARCELWATCH_DB", default_value = "resi_database.db", global = true)]
    database: PathBuf,

    /// Tracking endpoint
    #[arg(long, env = "PARCELWATCH_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PARCELWATCH_TIMEOUT", default_value = "10", global = true)]
    timeout_secs: u64,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Track an AWB with an auto-detected courier: <awb> [name...]
    Track {
        /// Tracking number, optionally followed by a package name
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },
    /// Track with an explicit courier: <courier> <awb> [name...]
    Check {
        /// Courier code, tracking number, optional package name
        #[arg(required = true, num_args = 2..)]
        input: Vec<String>,
    },
    /// Refresh every watched shipment, removing delivered ones
    Refresh,
    /// Show the watchlist without querying the provider
    List,
    /// Show one watched shipment without querying the provider
    Show {
        /// Tracking number
        awb: String,
    },
    /// Print the courier detected for an AWB
    Detect {
        /// Tracking number
        awb: String,
    },
}

fn init_logging() {
    // Reports go to stdout; keep logs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    // Detection is offline; no watchlist needed.
    if let Commands::Detect { awb } = &cli.command {
        return print_courier(awb);
    }

    let store = SqliteStore::open(&cli.database)
        .await
        .with_context(|| format!("failed to open watchlist at {}", cli.database.display()))?;
    debug!("Opened watchlist at {}", cli.database.display());

    let client = BinderByteClient::new(TrackingConfig {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    });
    let engine = RefreshEngine::new(client, store);

    let outcome = run(&cli, &engine).await;
    engine.store().close().await;
    outcome
}

async fn run(cli: &Cli, engine: &RefreshEngine<BinderByteClient, SqliteStore>) -> Result<()> {
    match &cli.command {
        Commands::Track { input } => {
            let report = engine.track_one(&input.join(" "), api_key(cli)?).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Commands::Check { input } => {
            let manual = ManualInput::parse(&input.join(" "))?;
            let report = engine
                .query_and_maybe_save(
                    &manual.courier,
                    &manual.tracking_number,
                    &manual.alias,
                    api_key(cli)?,
                )
                .await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Commands::Refresh => {
            let report = engine.refresh_all(api_key(cli)?).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Commands::List => {
            let shipments = engine.watchlist().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&shipments)?);
            } else if shipments.is_empty() {
                println!("No shipments are being watched.");
            } else {
                println!("Watching ({})", shipments.len());
                for s in shipments {
                    println!("  {} | {} | {}", s.tracking_number, s.courier.to_uppercase(), s.alias);
                }
            }
        }
        Commands::Show { awb } => {
            let shipment = engine
                .watched(awb)
                .await?
                .with_context(|| format!("{} is not being watched", awb.to_uppercase()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&shipment)?);
            } else {
                println!(
                    "{} | {} | {}",
                    shipment.tracking_number,
                    shipment.courier.to_uppercase(),
                    shipment.alias
                );
            }
        }
        Commands::Detect { awb } => print_courier(awb)?,
    }

    Ok(())
}

fn print_courier(awb: &str) -> Result<()> {
    let courier =
        detect(awb).with_context(|| format!("no courier matches '{}'", awb.to_uppercase()))?;
    println!("{}", courier);
    Ok(())
}

fn api_key(cli: &Cli) -> Result<&str> {
    cli.api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .context("missing API key: pass --api-key or set BINDERBYTE_API_KEY")
}
