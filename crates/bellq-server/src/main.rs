//! bellq server binary entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use bellq_server::{AppState, ServerConfig, create_router, init_tracing};

/// Run a Bell-state circuit over HTTP.
#[derive(Parser, Debug)]
#[command(name = "bellq-server", version, about)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "BELLQ_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config and BELLQ_BIND)
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    init_tracing(&config.logging.level, config.log_format()?)?;

    let bind_addr = config.bind_address;
    let cors_origins = config.cors_origins.clone();
    let state = Arc::new(AppState::with_simulator(config));
    info!(
        backend = state.backend.name(),
        max_shots = state.config.max_shots,
        max_qubits = state.config.max_qubits,
        "Initialized simulator backend"
    );

    let app = create_router(state);

    info!("bellq server listening on http://{bind_addr}");
    info!("CORS origins: {cors_origins}");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("bellq server shut down");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}
