//! alpb-ingest - tracking export ingest
//!
//! Ingests local export files or object-created notifications, and seeds
//! ballparks. One JSON outcome per file is printed to stdout.

use alpb_ingest::config::{CliOverrides, IngestConfig};
use alpb_ingest::db::{teams, SqliteStore};
use alpb_ingest::models::{IngestOutcome, ObjectNotification};
use alpb_ingest::services::{LocalBucket, ObjectStore, TrackingIngestor};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "alpb-ingest")]
#[command(about = "Ingest ALPB tracking exports into the game database")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/alpb/config.toml, then /etc/alpb/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Directory holding one sub-directory per bucket
    #[arg(long, global = true)]
    storage_root: Option<PathBuf>,

    /// Bucket searched for sibling pitch files
    #[arg(long, global = true)]
    bucket: Option<String>,

    /// Days after the export date searched for a sibling pitch file
    #[arg(long, global = true)]
    lookahead_days: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest local export files
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ingest the objects named in an object-created notification (JSON file)
    Event { notification: PathBuf },
    /// Manage ballparks
    Ballpark {
        #[command(subcommand)]
        action: BallparkCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BallparkCommand {
    /// Add a ballpark (no-op when it already exists)
    Add { name: String },
    /// List ballparks
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = alpb_common::config::load_toml_config(args.config.as_deref())?;
    let config = IngestConfig::resolve(
        CliOverrides {
            database_path: args.database.clone(),
            storage_root: args.storage_root.clone(),
            bucket: args.bucket.clone(),
            sibling_lookahead_days: args.lookahead_days,
        },
        toml_config,
    )?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("alpb-ingest {}", alpb_ingest::build_info());
    info!("Database: {}", config.database_path.display());

    let store = Arc::new(SqliteStore::open(&config.database_path).await?);

    match args.command {
        Command::Ingest { files } => ingest_files(&config, store, &files).await,
        Command::Event { notification } => ingest_notification(&config, store, &notification).await,
        Command::Ballpark { action } => manage_ballparks(&store, action).await,
    }
}

async fn ingest_files(config: &IngestConfig, store: Arc<SqliteStore>, files: &[PathBuf]) -> Result<()> {
    let objects: Arc<dyn ObjectStore> = Arc::new(LocalBucket::new(config.sibling_bucket_root()));
    let ingestor = TrackingIngestor::new(store, objects, config.sibling_lookahead_days);
    let mut unreadable = 0usize;

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            error!("Not a file path: {}", path.display());
            unreadable += 1;
            continue;
        };

        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                unreadable += 1;
                continue;
            }
        };

        let outcome = ingestor.ingest(file_name, &content).await?;
        print_outcome(&outcome)?;
    }

    if unreadable > 0 {
        anyhow::bail!("{} file(s) could not be read", unreadable);
    }
    Ok(())
}

async fn ingest_notification(
    config: &IngestConfig,
    store: Arc<SqliteStore>,
    notification_path: &Path,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(notification_path)
        .await
        .with_context(|| format!("Failed to read {}", notification_path.display()))?;
    let notification = ObjectNotification::from_json(&raw)
        .with_context(|| format!("Invalid notification {}", notification_path.display()))?;

    let objects = notification.objects();
    if objects.is_empty() {
        warn!("Notification names no objects");
    }

    let mut missing = 0usize;

    for object in objects {
        let source = LocalBucket::in_storage_root(&config.storage_root, &object.bucket);

        // Siblings come from the configured bucket, else the notifying one
        let siblings: Arc<dyn ObjectStore> = match &config.bucket {
            Some(_) => Arc::new(LocalBucket::new(config.sibling_bucket_root())),
            None => Arc::new(source.clone()),
        };
        let ingestor =
            TrackingIngestor::new(store.clone(), siblings, config.sibling_lookahead_days);

        let Some(content) = source.get_object(&object.key).await? else {
            error!(bucket = %object.bucket, key = %object.key, "Object not found");
            missing += 1;
            continue;
        };

        let outcome = ingestor.ingest(&object.key, &content).await?;
        print_outcome(&outcome)?;
    }

    if missing > 0 {
        anyhow::bail!("{} object(s) not found", missing);
    }
    Ok(())
}

async fn manage_ballparks(store: &SqliteStore, action: BallparkCommand) -> Result<()> {
    match action {
        BallparkCommand::Add { name } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Ballpark name must not be blank");
            }
            let ballpark_id = teams::insert_ballpark(store.pool(), name).await?;
            info!(ballpark = %name, ballpark_id = %ballpark_id, "Ballpark registered");
            println!("{}\t{}", ballpark_id, name);
        }
        BallparkCommand::List => {
            for ballpark in teams::list_ballparks(store.pool()).await? {
                println!("{}\t{}", ballpark.ballpark_id, ballpark.ballpark_name);
            }
        }
    }
    Ok(())
}

fn print_outcome(outcome: &IngestOutcome) -> Result<()> {
    println!("{}", serde_json::to_string(outcome)?);
    Ok(())
}
