// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Server Lifecycle
//!
//! [`GatewayServer::bind`] claims the listening socket up front so callers
//! learn the real address (useful with port 0) before serving starts.
//! Shutdown is driven by a `tokio_util::sync::CancellationToken`: cancelling
//! it stops accepting connections and lets in-flight requests finish.
//!
//! ```ignore
//! let server = GatewayServer::bind(config.bind_addr, state).await?;
//! let shutdown = server.shutdown_token();
//! tokio::spawn(async move {
//!     let _ = tokio::signal::ctrl_c().await;
//!     shutdown.cancel();
//! });
//! server.run().await?;
//! ```

use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{api::router, config::ConfigError, providers::StoreError, state::AppState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store client error: {0}")]
    Store(#[from] StoreError),

    #[error("server task failed: {0}")]
    Join(String),
}

pub struct GatewayServer {
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
}

impl GatewayServer {
    pub async fn bind(addr: SocketAddr, state: AppState) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            app: router(state),
            shutdown: CancellationToken::new(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Token that stops the server when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Serve until the shutdown token is cancelled.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.local_addr()?;
        info!(%addr, "Gateway listening");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(self.shutdown.cancelled_owned())
            .await?;

        info!(%addr, "Gateway stopped");
        Ok(())
    }

    /// Serve on a background task.
    pub fn spawn(self) -> Result<GatewayHandle, ServerError> {
        let local_addr = self.local_addr()?;
        let shutdown = self.shutdown_token();
        let task = tokio::spawn(self.run());
        Ok(GatewayHandle {
            local_addr,
            shutdown,
            task,
        })
    }
}

/// A running gateway started with [`GatewayServer::spawn`].
pub struct GatewayHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<Result<(), ServerError>>,
}

impl GatewayHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Cancel the server and wait for it to drain.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.shutdown.cancel();
        self.task
            .await
            .map_err(|e| ServerError::Join(e.to_string()))?
    }
}
