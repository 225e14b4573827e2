use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;
use wishes_server::{
    config::{DbConfig, ServerConfig},
    db::Db,
    http, logging, supervisor, SurrealStore, WishService,
};

#[derive(Debug, Parser)]
#[command(name = "wishes-server", version, about = "Wish submission HTTP service")]
struct Cli {
    /// Store endpoint, e.g. ws://127.0.0.1:8000 or surrealkv://.wishes/db. Required.
    #[arg(long, env = "WISHES_DB_URL")]
    db_url: String,

    #[arg(long, env = "WISHES_DB_NAMESPACE", default_value = "wishes")]
    db_namespace: String,

    #[arg(long, env = "WISHES_DB_NAME", default_value = "wishes")]
    db_name: String,

    /// Root user for remote servers. Requires --db-pass.
    #[arg(long, env = "WISHES_DB_USER", requires = "db_pass")]
    db_user: Option<String>,

    /// Root password for remote servers. Requires --db-user.
    #[arg(long, env = "WISHES_DB_PASS", requires = "db_user", hide_env_values = true)]
    db_pass: Option<String>,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Log level (env-filter syntax); RUST_LOG wins when set.
    #[arg(long, default_value = "info")]
    log: String,

    /// Append JSON-formatted log lines to this file.
    #[arg(long, env = "WISHES_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Seconds between background store probes; 0 disables them.
    #[arg(long, default_value_t = 30)]
    store_watch_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig {
        listen: SocketAddr::new(cli.host, cli.port),
        db: DbConfig {
            url: cli.db_url,
            namespace: cli.db_namespace,
            database: cli.db_name,
            username: cli.db_user,
            password: cli.db_pass,
        },
        log: cli.log,
        log_file: cli.log_file,
    };

    logging::init(&config.log, config.log_file.as_deref())?;
    supervisor::install_panic_hook();

    info!("starting wishes-server with config: {:?}", config);

    let db = Db::connect(&config.db).await?;
    db.apply_schema().await?;

    let svc = WishService::new(SurrealStore::new(db));

    if cli.store_watch_secs > 0 {
        supervisor::spawn_store_watch(svc.clone(), Duration::from_secs(cli.store_watch_secs));
    }

    let app = http::router(svc);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    info!("listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped; closing store connection");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown requested");
}
