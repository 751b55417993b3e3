// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Reviews between task participants.

use axum::response::Response;
use serde_json::Value;
use tracing::{info, warn};

use super::{json_response, GatewayRequest};
use crate::{
    error::ApiError,
    models::NewReview,
    providers::{eq_filter, WriteMethod},
    state::AppState,
};

/// The other participant of a task, seen from `caller`.
fn counterpart(task: &Value, caller: &str) -> Option<String> {
    let field = |name: &str| task.get(name).and_then(Value::as_str);
    match (field("created_by"), field("assigned_to")) {
        (Some(owner), Some(worker)) if worker == caller => Some(owner.to_string()),
        (Some(owner), Some(worker)) if owner == caller => Some(worker.to_string()),
        _ => None,
    }
}

/// `POST /api/reviews/{task_id}`: review the other side of a task.
///
/// The reviewee is read off the task row. When the caller is not one of its
/// participants the review is still stored, without a `reviewee_id`.
pub async fn submit_review(
    state: &AppState,
    request: &GatewayRequest,
) -> Result<Response, ApiError> {
    let task_id = request.param("task_id")?;
    let caller = request.caller()?;
    let rating = request
        .body
        .get("rating")
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::bad_request("rating is required"))?;
    let comment = request.body.get("comment").filter(|c| !c.is_null()).cloned();

    let task = state
        .store
        .fetch_collection(&format!(
            "/tasks?id={}&select=created_by,assigned_to",
            eq_filter(task_id)
        ))
        .await?;
    let reviewee_id = task
        .records()
        .first()
        .and_then(|task| counterpart(task, caller.as_str()));
    if reviewee_id.is_none() {
        warn!(task_id, reviewer_id = caller.as_str(), "Reviews: reviewee unknown");
    }
    info!(task_id, reviewer_id = caller.as_str(), rating, "Reviews: submitting");

    let review = NewReview {
        task_id: task_id.to_string(),
        reviewer_id: caller.as_str().to_string(),
        reviewee_id,
        rating,
        comment,
    };
    let body = serde_json::to_value(&review)
        .map_err(|e| ApiError::internal(format!("failed to encode review: {e}")))?;
    let created = state
        .store
        .send_request(WriteMethod::Post, "/reviews", Some(&body))
        .await?;
    json_response(created.into_first())
}

/// `GET /api/reviews/user/{user_id}`: reviews a user has received, newest first.
pub async fn user_reviews(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let user_id = request.param("user_id")?;
    let rows = state
        .store
        .fetch_collection(&format!(
            "/reviews?reviewee_id={}&select=*&order=created_at.desc",
            eq_filter(user_id)
        ))
        .await?;
    json_response(rows.into_collection())
}
