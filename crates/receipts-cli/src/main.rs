use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use receipts_cli::{client::DEFAULT_BASE_URL, ReceiptsClient};
use receipts_core::ReceiptId;

#[derive(Debug, Parser)]
#[command(name = "receipts-cli")]
#[command(about = "Submit receipts to a receipts points service and look up their points")]
struct Cli {
    /// Base URL of the receipts service.
    #[arg(long, env = "RECEIPTS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit receipt JSON files, then print the points for each returned id.
    Submit {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the points for a previously returned receipt id.
    Points { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = ReceiptsClient::new(&cli.base_url, cli.timeout_secs)?;

    match cli.command {
        Commands::Submit { files } => submit_files(&client, &files).await,
        Commands::Points { id } => {
            let id = ReceiptId::from(id);
            let points = client.get_points(&id).await?;
            println!("Points for ID {id}: {points}");
            Ok(())
        }
    }
}

/// Submits every file, then looks up points for every id received.
///
/// A file that cannot be read or is rejected by the service is reported and
/// skipped; the remaining files are still processed.
async fn submit_files(client: &ReceiptsClient, files: &[PathBuf]) -> anyhow::Result<()> {
    let mut ids = Vec::with_capacity(files.len());

    for file in files {
        match submit_file(client, file).await {
            Ok(id) => {
                println!("Received ID for file {}: {id}", display_name(file));
                ids.push(id);
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "skipping receipt file");
                eprintln!("Failed to submit {}: {e:#}", file.display());
            }
        }
    }

    for id in &ids {
        match client.get_points(id).await {
            Ok(points) => println!("Points for ID {id}: {points}"),
            Err(e) => eprintln!("Failed to get points for ID {id}: {e}"),
        }
    }

    if ids.len() < files.len() {
        anyhow::bail!("{} of {} receipt files failed", files.len() - ids.len(), files.len());
    }
    Ok(())
}

// File bytes are posted unchanged; the service validates them.
async fn submit_file(client: &ReceiptsClient, file: &Path) -> anyhow::Result<ReceiptId> {
    let raw = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    client
        .process_receipt_json(raw)
        .await
        .with_context(|| format!("submitting {}", file.display()))
}

fn display_name(file: &Path) -> String {
    file.file_name()
        .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned())
}
