// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Profile lookup, KYC submission and role switching.

use axum::response::Response;
use tracing::info;

use super::{json_response, GatewayRequest};
use crate::{
    error::ApiError,
    kyc::KycUpdate,
    models::{ProfilePlaceholder, RoleUpdate},
    providers::{eq_filter, WriteMethod},
    state::AppState,
};

/// `POST /api/profiles/{id}/kyc`
///
/// Stores the submitted KYC fields and puts the profile back into review.
pub async fn submit_kyc(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let id = request.param("id")?;
    let update = KycUpdate::from_submission(&request.body);
    info!(profile_id = id, "Profiles: KYC submitted");

    let body = serde_json::to_value(&update)
        .map_err(|e| ApiError::internal(format!("failed to encode KYC update: {e}")))?;
    let updated = state
        .store
        .send_request(
            WriteMethod::Patch,
            &format!("/profiles?id={}", eq_filter(id)),
            Some(&body),
        )
        .await?;
    json_response(updated.into_first())
}

/// `PUT /api/profiles/{id}/role`
pub async fn update_role(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let id = request.param("id")?;
    let update: RoleUpdate = serde_json::from_value(request.body.clone())
        .map_err(|_| ApiError::bad_request("role must be one of worker, employer, admin"))?;
    info!(profile_id = id, role = ?update.role, "Profiles: switching role");

    let body = serde_json::to_value(&update)
        .map_err(|e| ApiError::internal(format!("failed to encode role update: {e}")))?;
    let updated = state
        .store
        .send_request(
            WriteMethod::Patch,
            &format!("/profiles?id={}", eq_filter(id)),
            Some(&body),
        )
        .await?;
    json_response(updated.into_first())
}

/// `GET /api/profiles/{id}`
pub async fn get_profile(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let id = request.param("id")?;
    let found = state
        .store
        .fetch_collection(&format!("/profiles?id={}&select=*", eq_filter(id)))
        .await?;

    match found.records().first() {
        Some(profile) => json_response(profile),
        None => json_response(ProfilePlaceholder::not_found(id)),
    }
}
