// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use tracing::{error, info, warn};

use zigger_gateway::{
    config::GatewayConfig,
    logging,
    providers::SupabaseClient,
    routing::RouteTable,
    server::{GatewayServer, ServerError},
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed");
        eprintln!("zigger-gateway: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = GatewayConfig::from_env()?;
    logging::init(config.log_format);

    let store = SupabaseClient::from_config(&config)?;
    info!(
        rest_url = store.rest_url(),
        timeout = ?config.store_timeout,
        "Gateway: using Supabase REST backend"
    );

    let routes = RouteTable::default();
    info!(rules = routes.rules().len(), "Gateway: route table loaded");

    let state = AppState::new(store, routes);
    let server = GatewayServer::bind(config.bind_addr, state).await?;

    let shutdown = server.shutdown_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Gateway: shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => warn!(error = %e, "Gateway: failed to listen for shutdown signal"),
        }
    });

    server.run().await
}
