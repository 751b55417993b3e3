// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Readiness response with individual component status.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Whether the gateway process is running.
    pub service: String,
    /// Whether the Supabase REST endpoint answered.
    pub store: String,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Any non-5xx answer from the REST root counts as healthy, including 401/404.
async fn check_store(state: &AppState) -> String {
    match state.store.ping().await {
        Ok(status) if status.is_server_error() => {
            warn!(%status, "Health: store answered with a server error");
            "degraded".to_string()
        }
        Ok(_) => "ok".to_string(),
        Err(e) => {
            warn!(error = %e, "Health: store unreachable");
            "unavailable".to_string()
        }
    }
}

/// Liveness probe handler (`/health`, `/health/live`).
///
/// Always returns 200 if the process is running.
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler (`/health/ready`).
///
/// Returns 200 only if the store is reachable, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let store = check_store(&state).await;
    let all_ok = store == "ok";

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            store,
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
