use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wishes_client::{
    ingest::{self, IngestConfig},
    loadgen::{self, LoadConfig},
    WishesClient,
};
use wishes_core::NewWish;

#[derive(Parser, Debug)]
#[command(name = "wishes", version, about = "Client tools for the wish service")]
struct Args {
    /// Service base URL.
    #[arg(long, global = true, env = "WISHES_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Fire a fixed batch of concurrent submit/list requests and report throughput.
    Load {
        #[arg(long, default_value_t = 500)]
        requests: usize,
        #[arg(long, default_value_t = 50)]
        concurrency: usize,
        #[arg(long, default_value = "A bicycle")]
        wish: String,
    },
    /// Submit `*.txt` wish files dropped into a directory.
    Ingest {
        #[arg(long, default_value = "./scanned-wishes")]
        scan_dir: PathBuf,
        #[arg(long, default_value = "./processed")]
        processed_dir: PathBuf,
        #[arg(long, default_value = "./error")]
        error_dir: PathBuf,
        #[arg(long, default_value_t = 1000)]
        poll_interval_ms: u64,
        /// Process the directory once and exit.
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    /// Submit a single wish.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        wish: String,
    },
    /// Print every stored wish.
    List,
    /// Print the service health.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let client = WishesClient::new(args.url);

    match args.cmd {
        Cmd::Load {
            requests,
            concurrency,
            wish,
        } => {
            let cfg = LoadConfig {
                requests,
                concurrency,
                wish,
            };
            info!(url = %client.base_url(), requests, concurrency, "starting load run");
            let report = loadgen::run(&client, &cfg).await;
            println!("Successful requests: {}", report.succeeded);
            println!("Failed requests: {}", report.failed);
            println!("Duration: {:.2} seconds", report.elapsed.as_secs_f64());
            println!("API calls per second: {:.2}", report.requests_per_second());
        }
        Cmd::Ingest {
            scan_dir,
            processed_dir,
            error_dir,
            poll_interval_ms,
            once,
        } => {
            let cfg = IngestConfig {
                scan_dir,
                processed_dir,
                error_dir,
            };
            if once {
                let summary = ingest::run_once(&client, &cfg).await?;
                println!("processed: {}, failed: {}", summary.processed, summary.failed);
            } else {
                info!(dir = %cfg.scan_dir.display(), "watching for wish files");
                ingest::watch(&client, &cfg, Duration::from_millis(poll_interval_ms.max(1))).await?;
            }
        }
        Cmd::Submit { name, wish } => {
            let record = client
                .submit(&NewWish::new(name, wish))
                .await
                .context("submitting wish")?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Cmd::List => {
            let records = client.list().await.context("listing wishes")?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Cmd::Health => {
            let health = client.health().await.context("checking health")?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}
