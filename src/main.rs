//! ircserv binary: `ircserv <port> <password> [--config <path>]`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use ircserv::config::validation::{parse_password, parse_port};
use ircserv::{Config, Gateway};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Single-reactor IRC chat relay.
#[derive(Debug, Parser)]
#[command(name = "ircserv", version, about)]
struct Args {
    /// Port to listen on (1-65535).
    #[arg(value_parser = parse_port)]
    port: u16,

    /// Password clients must send with PASS.
    #[arg(value_parser = parse_password)]
    password: String,

    /// Optional TOML configuration file.
    #[arg(short, long, env = "IRCSERV_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    }
    .with_credentials(args.port, args.password);

    info!(
        server = %config.server.name,
        network = %config.server.network,
        port = config.listen.port,
        "Starting ircserv"
    );

    let gateway = Gateway::bind(&config).await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    gateway.run(shutdown).await;
    Ok(())
}

fn init_tracing() {
    // JSON logs with IRCSERV_LOG_JSON=1, human-readable otherwise
    let json_logs = std::env::var("IRCSERV_LOG_JSON").unwrap_or_default() == "1";
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    }
}

/// Cancel `shutdown` on SIGINT or SIGTERM.
async fn watch_signals(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                wait_ctrl_c().await;
                shutdown.cancel();
                return;
            }
        };
        tokio::select! {
            () = wait_ctrl_c() => {}
            _ = term.recv() => info!("Received SIGTERM"),
        }
    }
    #[cfg(not(unix))]
    wait_ctrl_c().await;

    shutdown.cancel();
}

async fn wait_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT"),
        Err(err) => {
            warn!(error = %err, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    }
}
