// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use geoproxy_gateway::{
    api::router,
    config::{ConfigError, GatewayConfig},
    state::AppState,
    telemetry::{self, LogFormat},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build geocoding provider client: {0}")]
    Provider(#[from] reqwest::Error),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();
    telemetry::init(LogFormat::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "gateway stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = GatewayConfig::from_env()?;
    let addr = config.socket_addr();

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        credential_store = ?config.credential_store,
        token_ttl_seconds = config.token_ttl.map(|ttl| ttl.num_seconds()),
        "GeoProxy gateway listening (docs at /swagger)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
