// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::response::Response;

use super::{json_response, GatewayRequest};
use crate::{error::ApiError, providers::eq_filter, state::AppState};

/// `GET /api/notifications`: the caller's notifications, newest first.
pub async fn list_notifications(
    state: &AppState,
    request: &GatewayRequest,
) -> Result<Response, ApiError> {
    let caller = request.caller()?;
    let rows = state
        .store
        .fetch_collection(&format!(
            "/notifications?recipient_id={}&select=*&order=created_at.desc",
            eq_filter(caller.as_str())
        ))
        .await?;
    json_response(rows.into_collection())
}
