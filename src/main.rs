use std::sync::Arc;

use launchd_status_server::{
    build_app, config::Config, launchctl_client::LaunchctlProber, logging, registry, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::default();
    let state = AppState::new(registry::default_registry(), Arc::new(LaunchctlProber::new()));
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_socket()?).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install interrupt handler");
        return;
    }
    info!("interrupt received, shutting down");
}
