// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use expense_server::{
    api::router,
    config::{Config, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
    store::ExpenseStore,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(LogFormat::default());
            tracing::error!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    let store = if config.seed_sample_data {
        ExpenseStore::with_sample_data(config.policy.clone())
    } else {
        ExpenseStore::new(config.policy.clone())
    };
    tracing::info!(
        seeded = store.len(),
        amount_ceiling = store.policy().amount_ceiling,
        strict_charset = store.policy().strict_charset,
        "expense store ready"
    );

    let app = router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {addr}: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Expense server listening on http://{addr} (docs at /docs)");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server failed: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
