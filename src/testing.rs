// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory PostgREST stand-in for tests.
//!
//! Serves `GET`/`POST`/`PATCH /{table}` on an ephemeral local port with
//! support for `field=eq.value` filters and `order=field.direction`. Every
//! request is recorded so tests can assert on the exact store traffic.

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

use crate::{providers::SupabaseClient, routing::RouteTable, state::AppState};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub table: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct FakeTables {
    tables: HashMap<String, Vec<Value>>,
    requests: Vec<RecordedRequest>,
    raw_response: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<RwLock<FakeTables>>,
}

impl FakeStore {
    pub const API_KEY: &'static str = "test-anon-key";

    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, table: &str, row: Value) {
        let mut inner = self.inner.write().await;
        inner.tables.entry(table.to_string()).or_default().push(row);
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let inner = self.inner.read().await;
        inner.tables.get(table).cloned().unwrap_or_default()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.read().await.requests.clone()
    }

    /// Answer every subsequent request with `body` verbatim.
    pub async fn respond_with_raw(&self, body: &str) {
        self.inner.write().await.raw_response = Some(body.to_string());
    }

    pub async fn spawn(&self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake store");
        let addr = listener.local_addr().expect("fake store address");
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake store serve");
        });
        addr
    }

    pub async fn client(&self) -> SupabaseClient {
        let addr = self.spawn().await;
        SupabaseClient::new(
            format!("http://{addr}"),
            Self::API_KEY,
            Some(Duration::from_secs(5)),
        )
        .expect("client builds")
    }

    pub async fn app_state(&self) -> AppState {
        AppState::new(self.client().await, RouteTable::default())
    }
}

async fn handle(
    State(store): State<FakeStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let table = uri.path().trim_start_matches('/').to_string();
    let query: Vec<(String, String)> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let body = serde_json::from_slice::<Value>(&body).ok();

    let mut guard = store.inner.write().await;
    let inner = &mut *guard;
    inner.requests.push(RecordedRequest {
        method: method.clone(),
        table: table.clone(),
        query: query.clone(),
        headers,
        body: body.clone(),
    });

    if let Some(raw) = inner.raw_response.clone() {
        return (StatusCode::OK, raw).into_response();
    }

    let filters: Vec<(String, String)> = query
        .iter()
        .filter_map(|(k, v)| v.strip_prefix("eq.").map(|val| (k.clone(), val.to_string())))
        .collect();
    let rows = inner.tables.entry(table).or_default();

    match method {
        Method::GET => {
            let mut matched: Vec<Value> = rows
                .iter()
                .filter(|row| matches_filters(row, &filters))
                .cloned()
                .collect();
            if let Some((_, order)) = query.iter().find(|(k, _)| k == "order") {
                let (field, direction) = order.split_once('.').unwrap_or((order.as_str(), "asc"));
                matched.sort_by_key(|row| row.get(field).map(as_text).unwrap_or_default());
                if direction == "desc" {
                    matched.reverse();
                }
            }
            Json(Value::Array(matched)).into_response()
        }
        Method::POST => {
            let mut row = body.unwrap_or_else(|| json!({}));
            if row.get("id").is_none() {
                row["id"] = json!(Uuid::new_v4().to_string());
            }
            rows.push(row.clone());
            (StatusCode::CREATED, Json(json!([row]))).into_response()
        }
        Method::PATCH => {
            let patch = body
                .and_then(|v| v.as_object().cloned())
                .unwrap_or_default();
            let mut updated = Vec::new();
            for row in rows.iter_mut().filter(|row| matches_filters(row, &filters)) {
                if let Some(fields) = row.as_object_mut() {
                    for (k, v) in &patch {
                        fields.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
            Json(Value::Array(updated)).into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

fn matches_filters(row: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(field, expected)| row.get(field).map(as_text).as_deref() == Some(expected.as_str()))
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
