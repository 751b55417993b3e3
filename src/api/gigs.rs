// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gig (task) posting, listings and applications.

use axum::response::Response;
use tracing::info;

use super::{json_response, GatewayRequest};
use crate::{
    error::ApiError,
    models::{NewApplication, NewGig},
    providers::{eq_filter, WriteMethod},
    state::AppState,
};

/// `POST /api/gigs`: post a gig as the caller.
///
/// Role checks and escrow are left to the store; the gateway only inserts
/// the task row with `status = open`.
pub async fn create_gig(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let caller = request.caller()?;
    let gig = NewGig::from_submission(&request.body, caller.as_str());
    info!(created_by = caller.as_str(), title = ?gig.title, "Gigs: posting");

    let body = serde_json::to_value(&gig)
        .map_err(|e| ApiError::internal(format!("failed to encode gig: {e}")))?;
    let created = state
        .store
        .send_request(WriteMethod::Post, "/tasks", Some(&body))
        .await?;
    json_response(created.into_first())
}

/// `POST /api/gigs/{task_id}/apply`
pub async fn apply_for_gig(
    state: &AppState,
    request: &GatewayRequest,
) -> Result<Response, ApiError> {
    let task_id = request.param("task_id")?;
    let caller = request.caller()?;
    info!(task_id, worker_id = caller.as_str(), "Gigs: applying");

    let body = serde_json::to_value(NewApplication::new(task_id, caller.as_str()))
        .map_err(|e| ApiError::internal(format!("failed to encode application: {e}")))?;
    let created = state
        .store
        .send_request(WriteMethod::Post, "/task_applications", Some(&body))
        .await?;
    json_response(created.into_first())
}

/// `GET /api/gigs/assigned`: tasks assigned to the caller.
pub async fn assigned_gigs(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let caller = request.caller()?;
    let tasks = state
        .store
        .fetch_collection(&format!(
            "/tasks?assigned_to={}&select=*",
            eq_filter(caller.as_str())
        ))
        .await?;
    json_response(tasks.into_collection())
}

/// `GET /api/gigs/my-gigs`: tasks the caller posted.
pub async fn my_gigs(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let caller = request.caller()?;
    let tasks = state
        .store
        .fetch_collection(&format!(
            "/tasks?created_by={}&select=*",
            eq_filter(caller.as_str())
        ))
        .await?;
    json_response(tasks.into_collection())
}

/// `GET /api/gigs/{task_id}/applications`, each with the applicant's profile.
pub async fn gig_applications(
    state: &AppState,
    request: &GatewayRequest,
) -> Result<Response, ApiError> {
    let task_id = request.param("task_id")?;
    let applications = state
        .store
        .fetch_collection(&format!(
            "/task_applications?task_id={}&select=*,worker:profiles(*)",
            eq_filter(task_id)
        ))
        .await?;
    json_response(applications.into_collection())
}

/// `GET /api/gigs/{task_id}/my-application`
///
/// The caller's own application to the task, or `{}` if they have not applied.
pub async fn my_application(
    state: &AppState,
    request: &GatewayRequest,
) -> Result<Response, ApiError> {
    let task_id = request.param("task_id")?;
    let caller = request.caller()?;
    let applications = state
        .store
        .fetch_collection(&format!(
            "/task_applications?task_id={}&worker_id={}&select=*",
            eq_filter(task_id),
            eq_filter(caller.as_str())
        ))
        .await?;
    json_response(applications.records().first())
}

/// `GET /api/gigs/feed*`: every task, unfiltered.
pub async fn feed(state: &AppState) -> Result<Response, ApiError> {
    let tasks = state.store.fetch_collection("/tasks?select=*").await?;
    json_response(tasks.into_collection())
}
