// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process bootstrap: state assembly, listener and graceful shutdown.
//!
//! Shutdown uses `tokio_util::sync::CancellationToken`. A signal task cancels
//! the token on Ctrl-C or SIGTERM and the server drains in-flight requests.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::api::router;
use crate::auth::TokenCodec;
use crate::config::AppConfig;
use crate::state::AppState;
use crate::storage::{MemoryUserDirectory, StorageError, UserProfile};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to initialise storage: {0}")]
    Storage(#[from] StorageError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assemble the shared state described by `config`.
pub fn build_state(config: &AppConfig) -> Result<AppState, ServerError> {
    let tokens = Arc::new(TokenCodec::new(&config.token));

    let users = MemoryUserDirectory::new();
    if let Some(seed) = &config.seed_user {
        users.insert(UserProfile::new(seed.id, seed.name.clone(), seed.email.clone()))?;
        tracing::info!(user_id = %seed.id, "Registered seed user");
    }
    let users = Arc::new(users);

    let state = match &config.data_dir {
        Some(dir) => {
            tracing::info!(data_dir = %dir.display(), "Using JSON file storage");
            AppState::with_file_storage(tokens, users, dir)?
        }
        None => {
            tracing::warn!("DATA_DIR not set, resources are kept in memory only");
            AppState::in_memory(tokens, users)
        }
    };
    Ok(state)
}

/// Serve until `shutdown` is cancelled.
pub async fn run(config: AppConfig, shutdown: CancellationToken) -> Result<(), ServerError> {
    let state = build_state(&config)?;
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Cashbook server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
pub async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = shutdown.cancelled() => return,
    }

    tracing::info!("Shutdown signal received, draining connections");
    shutdown.cancel();
}
