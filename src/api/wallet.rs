// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Caller wallet endpoints.

use axum::response::Response;
use serde_json::Value;

use super::{json_response, GatewayRequest};
use crate::{
    error::ApiError, models::BalanceResponse, providers::eq_filter, state::AppState,
};

/// `GET /api/wallet/balance`
///
/// `0.0` when the caller has no profile or the stored balance is unusable.
pub async fn balance(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let caller = request.caller()?;
    let rows = state
        .store
        .fetch_collection(&format!(
            "/profiles?id={}&select=wallet_balance",
            eq_filter(caller.as_str())
        ))
        .await?;

    let balance = rows
        .records()
        .first()
        .and_then(|row| row.get("wallet_balance"))
        .and_then(balance_value)
        .unwrap_or(0.0);
    json_response(BalanceResponse { balance })
}

/// `GET /api/wallet/transactions`, newest first.
pub async fn transactions(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let caller = request.caller()?;
    let rows = state
        .store
        .fetch_collection(&format!(
            "/wallet_transactions?profile_id={}&select=*&order=created_at.desc",
            eq_filter(caller.as_str())
        ))
        .await?;
    json_response(rows.into_collection())
}

/// Postgres `numeric` columns come back as strings through PostgREST.
fn balance_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
