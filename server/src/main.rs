//! PetClinic REST server
//!
//! Serves the clinic API over an in-memory store:
//! 1. Owners, pets and visits as nested JSON aggregates
//! 2. Pet types, specialties and vets as flat resources
//!
//! Usage:
//!   petclinic-server --port 9966 --seed
//!
//! Nothing is persisted; state lives for the lifetime of the process.

use anyhow::{Context, Result};
use clap::Parser;
use petclinic_projection::{DEFAULT_MAX_DOCUMENT_BYTES, Projector, ProjectorConfig};
use petclinic_server::{AppState, build_router};
use petclinic_store::ClinicStore;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "petclinic-server")]
#[command(about = "PetClinic REST API")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP port
    #[arg(short, long, default_value = "9966")]
    port: u16,

    /// Start with the sample clinic data
    #[arg(long)]
    seed: bool,

    /// Reject request bodies larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_DOCUMENT_BYTES)]
    max_document_bytes: usize,

    /// Indent JSON responses
    #[arg(long)]
    pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("PetClinic server starting...");
    let store = if args.seed {
        ClinicStore::with_sample_data().context("Failed to seed sample data")?
    } else {
        ClinicStore::new()
    };
    let projector = Projector::new(
        ProjectorConfig::default()
            .with_max_document_bytes(args.max_document_bytes)
            .with_pretty(args.pretty),
    );

    let app = build_router(AppState::new(store, projector));
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
