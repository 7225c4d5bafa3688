//! Document QA server binary
//!
//! Run with: cargo run -p docqa --bin docqa-server -- --secrets secrets.toml

use std::path::PathBuf;

use clap::Parser;
use docqa::server::DocQaServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "docqa-server", version, about = "Document question answering over Gemini")]
struct Args {
    /// Server configuration file (TOML)
    #[arg(short, long, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Secrets file (TOML); environment variables take precedence
    #[arg(short, long, env = "DOCQA_SECRETS")]
    secrets: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Secrets are loaded first; a missing one stops startup before anything is served
    let server = DocQaServer::from_files(args.config.as_deref(), args.secrets.as_deref())
        .await
        .inspect_err(|e| tracing::error!("Startup failed: {}", e))?;

    let config = server.config();
    tracing::info!("Configuration loaded");
    tracing::info!("  - Storage backend: {:?}", config.storage.backend);
    tracing::info!("  - Model: {}", config.gemini.model);

    println!("\nServer starting...");
    println!("  UI: http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  Ready: http://{}/ready", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/ask              - Upload a document and ask a question");
    println!("  POST /api/upload           - Upload documents");
    println!("  GET  /api/files            - List stored documents");
    println!("  POST /api/query            - Ask about stored documents");
    println!("  POST /api/generate         - Free-form prompt");
    println!("  POST /api/files/delete     - Delete documents");
    println!("  DELETE /api/files/prefix/* - Delete documents under a prefix");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
