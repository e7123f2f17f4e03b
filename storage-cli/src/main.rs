//! tstore CLI: query and modify users and templates in MongoDB. Config from env (.env
//! supported) and optional `--uri` / `--database` flags; prints the response envelope as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use storage::{DocumentStorageProvider, StorageProvider, StorageResponse};
use storage_cli::{init_tracing, load_config, run_command, Cli};
use store_mongodb::MongoDocumentStore;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.uri.clone(), cli.database.clone())
        .context("Load storage config (MONGODB_URI or --uri)")?;
    init_tracing(config.log_file.as_deref())?;

    let provider = DocumentStorageProvider::new(MongoDocumentStore::from_config(&config));
    if let StorageResponse::Failure(message) = provider.connect().await {
        anyhow::bail!("Failed to connect to {}: {}", config.database, message);
    }

    let output = run_command(&provider, &cli.command).await;

    if let StorageResponse::Failure(message) = provider.close().await {
        warn!(error = %message, "Failed to close storage connection");
    }

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}
