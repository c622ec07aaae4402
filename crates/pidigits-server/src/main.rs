#![doc = include_str!("../README.md")]

mod server;

use anyhow::Context;
use clap::Parser;
use server::config::{CliArgs, ServerConfig};
use server::service::handler::{PiService, router};
use server::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let providers = init_telemetry()?;
    let app = router(PiService::new(config.clone()));

    if config.uds {
        #[cfg(unix)]
        {
            use tokio::net::UnixListener;
            let uds_path = config.server_addr.clone();
            let listener = UnixListener::bind(&uds_path)
                .with_context(|| format!("failed to bind unix socket {uds_path}"))?;
            log_startup_info(&uds_path, &config);
            let res = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await;
            // Best effort; a panic before this point leaves the socket file
            // behind.
            let _ = std::fs::remove_file(&uds_path);
            finish(res, providers)
        }
        #[cfg(not(unix))]
        {
            anyhow::bail!("Unix domain sockets are not supported on this platform");
        }
    } else {
        let tcp_addr = config.server_addr.clone();
        let listener = TcpListener::bind(&tcp_addr)
            .await
            .with_context(|| format!("failed to bind {tcp_addr}"))?;
        log_startup_info(&tcp_addr, &config);
        let res = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;
        finish(res, providers)
    }
}

fn finish(
    res: std::io::Result<()>,
    providers: server::telemetry::TelemetryProviders,
) -> anyhow::Result<()> {
    match &res {
        Ok(()) => tracing::info!("Service shut down successfully"),
        Err(e) => tracing::error!("Server error: {e}"),
    }
    providers.shutdown();
    res.context("server terminated with an error")
}

fn log_startup_info(addr: &str, config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting pidigits service on {} with full config: {:#?}",
            addr,
            config
        );
    } else {
        tracing::info!(
            "Starting pidigits service on {} (max digits {}, error detail {:?})",
            addr,
            config.max_digits,
            config.error_detail
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
