// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Supabase (PostgREST) client used by every gateway route.
//!
//! Two primitives cover all traffic: [`SupabaseClient::fetch_collection`] for
//! reads and [`SupabaseClient::send_request`] for inserts and partial updates.
//! Bodies are never parsed eagerly into errors; they come back as a
//! [`Payload`] so each route decides how to treat empty or malformed data.

use std::{fmt, time::Duration};

use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, StatusCode,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;

const PREFER_REPRESENTATION: &str = "return=representation";
const RESPONSE_PREVIEW_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store client could not be built: {0}")]
    Client(String),

    #[error("{0}")]
    Request(String),

    #[error("store request body could not be serialized: {0}")]
    Serialize(String),
}

/// Verbs used for writes against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Post,
    Patch,
}

impl WriteMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMethod::Post => "POST",
            WriteMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<WriteMethod> for Method {
    fn from(value: WriteMethod) -> Self {
        match value {
            WriteMethod::Post => Method::POST,
            WriteMethod::Patch => Method::PATCH,
        }
    }
}

/// A store response body.
///
/// PostgREST answers with a collection for reads and, depending on the verb
/// and `Prefer` header, either a collection or a single object for writes.
/// [`Payload::first`] hides that difference; [`Payload::records`] is the
/// strict collection view.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body parsed as JSON.
    Data(Value),
    /// The body was empty.
    Empty,
    /// The body was not valid JSON; carries the parser message.
    Malformed(String),
}

impl Payload {
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Payload::Empty;
        }
        match serde_json::from_slice(body) {
            Ok(value) => Payload::Data(value),
            Err(e) => Payload::Malformed(e.to_string()),
        }
    }

    /// Rows of a collection response. A body that is not an array has none,
    /// so PostgREST error objects never pass for a found row.
    pub fn records(&self) -> &[Value] {
        match self {
            Payload::Data(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// The single record of a write response: the first row of an array or
    /// a lone object.
    pub fn first(&self) -> Option<&Value> {
        match self {
            Payload::Data(Value::Array(items)) => items.first(),
            Payload::Data(value @ Value::Object(_)) => Some(value),
            _ => None,
        }
    }

    pub fn into_first(self) -> Option<Value> {
        match self {
            Payload::Data(Value::Array(items)) => items.into_iter().next(),
            Payload::Data(value @ Value::Object(_)) => Some(value),
            _ => None,
        }
    }

    /// Body for list routes: the store JSON as-is, `[]` when there is none.
    pub fn into_collection(self) -> Value {
        match self {
            Payload::Data(Value::Null) => Value::Array(Vec::new()),
            Payload::Data(value) => value,
            Payload::Empty | Payload::Malformed(_) => Value::Array(Vec::new()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Payload::Malformed(_))
    }
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    rest_url: String,
    api_key: String,
    http: Client,
}

impl SupabaseClient {
    pub fn new(
        rest_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| StoreError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            rest_url: rest_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, StoreError> {
        Self::new(&config.rest_url, &config.api_key, config.store_timeout)
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// GET `path` and parse the body.
    ///
    /// A malformed body is logged and returned as [`Payload::Malformed`];
    /// only transport failures are errors.
    pub async fn fetch_collection(&self, path: &str) -> Result<Payload, StoreError> {
        let response = self
            .authorized(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("GET {path} failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Request(format!("GET {path} body read failed: {e}")))?;

        if !status.is_success() {
            warn!(path, %status, "Store: GET returned non-success status");
        }

        let payload = Payload::from_body(&body);
        if let Payload::Malformed(reason) = &payload {
            warn!(path, %reason, "Store: GET returned malformed JSON, treating as empty");
        }
        Ok(payload)
    }

    /// POST or PATCH `path`, optionally with a JSON body, asking the store to
    /// return the affected rows.
    pub async fn send_request(
        &self,
        method: WriteMethod,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Payload, StoreError> {
        let mut request = self.authorized(self.http.request(method.into(), self.url(path)));
        if let Some(payload) = payload {
            let body =
                serde_json::to_vec(payload).map_err(|e| StoreError::Serialize(e.to_string()))?;
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Store: request error");
            StoreError::Request(format!("{method} {path} failed: {e}"))
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Request(format!("{method} {path} body read failed: {e}")))?;

        debug!(
            %method,
            path,
            %status,
            response = %preview(&body),
            "Store: write response"
        );
        if !status.is_success() {
            warn!(%method, path, %status, "Store: write returned non-success status");
        }

        let payload = Payload::from_body(&body);
        if let Payload::Malformed(reason) = &payload {
            warn!(%method, path, %reason, "Store: write returned malformed JSON");
        }
        Ok(payload)
    }

    /// Reachability probe against the REST root.
    pub async fn ping(&self) -> Result<StatusCode, StoreError> {
        let response = self
            .authorized(self.http.get(self.url("/")))
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("GET / failed: {e}")))?;
        Ok(response.status())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.rest_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", PREFER_REPRESENTATION)
    }
}

/// `eq.` filter operand with the value percent-encoded.
pub fn eq_filter(value: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("eq.{encoded}")
}

fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(RESPONSE_PREVIEW_CHARS)
        .collect()
}
