// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use recrutec_server::{api::router, config::Settings, state::AppState};

#[tokio::main]
async fn main() {
    init_tracing();

    // Misconfiguration is fatal: the service must not come up with a weak
    // key or unparsable lifetimes.
    let settings = Settings::from_env().expect("Invalid configuration");
    let state = AppState::from_settings(&settings).expect("Failed to build signing keys");
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Recrutec auth server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
