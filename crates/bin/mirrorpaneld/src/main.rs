//! # mirrorpaneld — mirror control panel daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize `tracing` from the configured filter
//! - Construct the device gateway (real HTTP device or virtual mirror)
//! - Construct the status poller and spawn its event loop
//! - Build the axum router on top of the poller handle and the watch view
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), stopping the poller last
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use mirrorpanel_adapter_http_axum::router;
use mirrorpanel_adapter_http_axum::state::AppState;
use mirrorpanel_adapter_http_reqwest::ReqwestGateway;
use mirrorpanel_adapter_virtual::VirtualMirror;
use mirrorpanel_app::ports::DeviceGateway;
use mirrorpanel_app::runner::PollerRunner;
use mirrorpanel_app::services::status_poller::StatusPoller;
use mirrorpanel_app::watch_view::WatchView;

use config::{Config, DeviceKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    match config.device.kind {
        DeviceKind::Http => {
            let gateway = ReqwestGateway::new(&config.device.http)?;
            tracing::info!(base_url = gateway.base_url(), "using http device");
            serve(&config, gateway).await
        }
        DeviceKind::Virtual => {
            tracing::info!("using virtual device");
            serve(&config, VirtualMirror::default()).await
        }
    }
}

async fn serve<G>(config: &Config, gateway: G) -> Result<(), Box<dyn std::error::Error>>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    let view = Arc::new(WatchView::new());

    // Poller
    let poller = StatusPoller::new(gateway, Arc::clone(&view))
        .with_refresh_after_delay(config.poller.refresh_after_delay);
    let (runner, handle) = PollerRunner::new(
        Arc::new(poller),
        config.poller.interval(),
        config.poller.queue_capacity,
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller_task = tokio::spawn(runner.run(shutdown_rx));

    // HTTP
    let state = AppState::new(handle, view).with_refresh_seconds(config.server.refresh_seconds);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "mirrorpaneld listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // the runner may already be gone, nothing to stop then
    let _ = shutdown_tx.send(true);
    poller_task.await?;
    tracing::info!("mirrorpaneld stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
