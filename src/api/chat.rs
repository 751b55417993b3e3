// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Task chat endpoints.

use axum::response::Response;
use chrono::Utc;

use super::{json_response, GatewayRequest};
use crate::{
    error::ApiError,
    models::NewChatMessage,
    providers::{eq_filter, WriteMethod},
    state::AppState,
};

/// Sender columns embedded into each listed message.
const SENDER_EMBED: &str = "sender:profiles(id,full_name,profile_photo_url)";

/// `POST /api/chat/{task_id}/send`
///
/// Returns the inserted row as a single object.
pub async fn send_message(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let task_id = request.param("task_id")?;
    let sender = request.caller()?;

    let message = NewChatMessage::new(
        task_id,
        sender.as_str(),
        request.body.get("content").cloned(),
        Utc::now(),
    );
    let body = serde_json::to_value(&message)
        .map_err(|e| ApiError::internal(format!("failed to encode message: {e}")))?;

    let created = state
        .store
        .send_request(WriteMethod::Post, "/chat_messages", Some(&body))
        .await?;
    json_response(created.into_first())
}

/// `GET /api/chat/{task_id}/messages`, newest first.
pub async fn list_messages(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let task_id = request.param("task_id")?;
    let messages = state
        .store
        .fetch_collection(&format!(
            "/chat_messages?task_id={}&select=*,{SENDER_EMBED}&order=created_at.desc",
            eq_filter(task_id)
        ))
        .await?;
    json_response(messages.into_collection())
}
