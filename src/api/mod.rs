// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway HTTP Surface
//!
//! Health probes are ordinary axum routes. Everything else lands in
//! [`dispatch`], which resolves the request against the [`RouteTable`] and
//! runs the matched action. Requests that match no rule get
//! `{"status":"ok"}`.
//!
//! Failures from an action are written as `{"error": "..."}` with the
//! status carried by [`ApiError`]; store outages are 500s.
//!
//! [`RouteTable`]: crate::routing::RouteTable

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};

use crate::{
    auth::CallerIdentity,
    error::ApiError,
    models::StatusAck,
    providers::Payload,
    routing::{Action, PathParams, RouteMatch},
    state::AppState,
};

pub mod auth;
pub mod chat;
pub mod cors;
pub mod gigs;
pub mod health;
pub mod notifications;
pub mod profiles;
pub mod reviews;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::liveness).fallback(dispatch))
        .route("/health/live", get(health::liveness).fallback(dispatch))
        .route("/health/ready", get(health::readiness).fallback(dispatch))
        .fallback(dispatch)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(middleware::from_fn(cors::cors))
}

/// A matched inbound request as seen by an action.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub params: PathParams,
    pub headers: HeaderMap,
    /// Always a JSON object; empty when the body was missing or unreadable.
    pub body: Value,
}

impl GatewayRequest {
    pub fn new(params: PathParams, headers: HeaderMap, body: Value) -> Self {
        Self {
            params,
            headers,
            body,
        }
    }

    pub fn param(&self, name: &str) -> Result<&str, ApiError> {
        self.params
            .get(name)
            .ok_or_else(|| ApiError::internal(format!("route parameter {name} missing")))
    }

    pub fn caller(&self) -> Result<CallerIdentity, ApiError> {
        CallerIdentity::from_headers(&self.headers)
    }
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    info!(%method, path, "Gateway: request");
    if !body.is_empty() {
        debug!(body = %String::from_utf8_lossy(&body), "Gateway: request body");
    }

    let Some(RouteMatch {
        action,
        pattern,
        params,
    }) = state.routes.resolve(&method, path)
    else {
        return Json(StatusAck::ok()).into_response();
    };
    if params.is_empty() {
        debug!(route = %pattern, ?action, "Gateway: matched");
    } else {
        debug!(route = %pattern, ?action, ?params, "Gateway: matched");
    }

    let request = GatewayRequest::new(params, headers, parse_body(&body));
    match run_action(action, &state, &request).await {
        Ok(response) => response,
        Err(err) => {
            error!(
                %method,
                path,
                route = %pattern,
                ?action,
                status = %err.status,
                error = %err.message,
                "Gateway: request failed"
            );
            err.into_response()
        }
    }
}

async fn run_action(
    action: Action,
    state: &AppState,
    request: &GatewayRequest,
) -> Result<Response, ApiError> {
    match action {
        Action::SendOtp => Ok(auth::send_otp(request)),
        Action::VerifyOtp => auth::verify_otp(state, request).await,
        Action::SendChatMessage => chat::send_message(state, request).await,
        Action::ListChatMessages => chat::list_messages(state, request).await,
        Action::CreateGig => gigs::create_gig(state, request).await,
        Action::ApplyForGig => gigs::apply_for_gig(state, request).await,
        Action::AssignedGigs => gigs::assigned_gigs(state, request).await,
        Action::MyGigs => gigs::my_gigs(state, request).await,
        Action::GigApplications => gigs::gig_applications(state, request).await,
        Action::MyApplication => gigs::my_application(state, request).await,
        Action::GigFeed => gigs::feed(state).await,
        Action::SubmitKyc => profiles::submit_kyc(state, request).await,
        Action::UpdateRole => profiles::update_role(state, request).await,
        Action::GetProfile => profiles::get_profile(state, request).await,
        Action::WalletBalance => wallet::balance(state, request).await,
        Action::WalletTransactions => wallet::transactions(state, request).await,
        Action::Notifications => notifications::list_notifications(state, request).await,
        Action::UserReviews => reviews::user_reviews(state, request).await,
        Action::SubmitReview => reviews::submit_review(state, request).await,
    }
}

/// Inbound bodies that are empty, malformed, or not an object read as `{}`.
fn parse_body(body: &[u8]) -> Value {
    match Payload::from_body(body) {
        Payload::Data(value @ Value::Object(_)) => value,
        Payload::Data(_) | Payload::Empty => Value::Object(Map::new()),
        Payload::Malformed(reason) => {
            warn!(%reason, "Gateway: malformed request body, treating as empty object");
            Value::Object(Map::new())
        }
    }
}

/// Serialize `data` as the response body, writing `{}` for `null`.
pub(crate) fn json_response<T: Serialize>(data: T) -> Result<Response, ApiError> {
    let value = serde_json::to_value(data)
        .map_err(|e| ApiError::internal(format!("failed to encode response: {e}")))?;
    if value.is_null() {
        return Ok(Json(Value::Object(Map::new())).into_response());
    }
    Ok(Json(value).into_response())
}
