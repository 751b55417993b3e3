// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OTP endpoints.
//!
//! No OTP is actually sent or checked. Verification looks the mobile number
//! up and creates a profile the first time it is seen.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::info;

use super::{json_response, GatewayRequest};
use crate::{
    auth::access_token_for,
    error::ApiError,
    models::{AuthResponse, NewProfile, Role},
    providers::{eq_filter, WriteMethod},
    state::AppState,
};

/// `POST /api/auth/send-otp`
pub fn send_otp(request: &GatewayRequest) -> Response {
    info!(mobile = ?request.body.get("mobile"), "Auth: OTP requested");
    (StatusCode::OK, "Sent").into_response()
}

/// `POST /api/auth/verify-otp`
///
/// Lookup-then-create: a second verification of the same number finds the
/// profile created by the first.
pub async fn verify_otp(state: &AppState, request: &GatewayRequest) -> Result<Response, ApiError> {
    let mobile = request
        .body
        .get("mobile")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::bad_request("mobile is required"))?;
    info!(mobile, "Auth: verifying");

    let existing = state
        .store
        .fetch_collection(&format!("/profiles?mobile={}&select=*", eq_filter(mobile)))
        .await?;

    let profile = match existing.records().first() {
        Some(profile) => profile.clone(),
        None => create_profile(state, mobile).await?,
    };

    let access_token = access_token_for(profile.get("id").unwrap_or(&Value::Null));
    json_response(AuthResponse {
        access_token,
        profile,
    })
}

async fn create_profile(state: &AppState, mobile: &str) -> Result<Value, ApiError> {
    info!(mobile, "Auth: no profile for mobile, creating one");

    let new_profile = NewProfile::for_mobile(mobile);
    let body = serde_json::to_value(&new_profile)
        .map_err(|e| ApiError::internal(format!("failed to encode profile: {e}")))?;
    let created = state
        .store
        .send_request(WriteMethod::Post, "/profiles", Some(&body))
        .await?
        .into_first();

    match created {
        Some(profile) => {
            info!(profile_id = ?profile.get("id"), "Auth: created profile");
            Ok(profile)
        }
        None => Ok(json!({
            "id": "unknown",
            "role": Role::Worker,
            "mobile": mobile,
        })),
    }
}

#[cfg(test)]
mod tests {
    use crate::{api::router, testing::FakeStore};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn verify(store: &FakeStore, body: &str) -> (StatusCode, Value) {
        let app = router(store.app_state().await);
        let response = app
            .oneshot(
                Request::post("/api/auth/verify-otp")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn send_otp_acknowledges_without_store_traffic() {
        let store = FakeStore::new();
        let app = router(store.app_state().await);
        let response = app
            .oneshot(
                Request::post("/api/auth/send-otp")
                    .body(Body::from(r#"{"mobile":"+911"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Sent");
        assert!(store.requests().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_mobile_creates_exactly_one_profile() {
        let store = FakeStore::new();
        let (status, body) = verify(&store, r#"{"mobile":"+919876543210"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let profiles = store.rows("profiles").await;
        assert_eq!(profiles.len(), 1);

        let created = &profiles[0];
        let id = created["id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(created["mobile"], "+919876543210");
        assert_eq!(created["role"], "worker");
        assert_eq!(created["kyc_status"], "approved");
        assert_eq!(created["wallet_balance"], json!(0.0));
        assert_eq!(created["trust_score"], 100);

        assert_eq!(body["access_token"], format!("valid_token_{id}"));
        assert_eq!(body["profile"]["id"], id);
    }

    #[tokio::test]
    async fn second_verification_does_not_duplicate() {
        let store = FakeStore::new();
        let (_, first) = verify(&store, r#"{"mobile":"+919876543210"}"#).await;
        let (_, second) = verify(&store, r#"{"mobile":"+919876543210"}"#).await;

        assert_eq!(store.rows("profiles").await.len(), 1);
        assert_eq!(first["profile"]["id"], second["profile"]["id"]);
        assert_eq!(first["access_token"], second["access_token"]);
    }

    #[tokio::test]
    async fn existing_profile_is_returned_untouched() {
        let store = FakeStore::new();
        store
            .insert(
                "profiles",
                json!({ "id": "abc-1", "mobile": "555", "role": "employer" }),
            )
            .await;

        let (status, body) = verify(&store, r#"{"mobile":"555"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["access_token"], "valid_token_abc-1");
        assert_eq!(body["profile"]["role"], "employer");

        let requests = store.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("mobile"), Some("eq.555"));
        assert_eq!(requests[0].query_value("select"), Some("*"));
    }

    #[tokio::test]
    async fn missing_mobile_is_rejected() {
        let store = FakeStore::new();
        let (status, body) = verify(&store, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "mobile is required");
        assert!(store.requests().await.is_empty());
    }

    #[tokio::test]
    async fn unusable_create_response_yields_placeholder_profile() {
        let store = FakeStore::new();
        store.respond_with_raw("").await;

        let (status, body) = verify(&store, r#"{"mobile":"777"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["access_token"], "valid_token_unknown");
        assert_eq!(
            body["profile"],
            json!({ "id": "unknown", "role": "worker", "mobile": "777" })
        );
    }
}
