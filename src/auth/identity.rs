// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Caller identity taken from the `X-User-Id` header.
//!
//! The header is trusted as-is: there is no session or token verification
//! in the gateway. The OTP flow hands out opaque tokens that nothing checks.

use axum::http::{HeaderMap, HeaderName};
use serde_json::Value;

use crate::error::ApiError;

pub const CALLER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

const ACCESS_TOKEN_PREFIX: &str = "valid_token_";

/// The profile id the caller claims to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl CallerIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let value = headers
            .get(&CALLER_ID_HEADER)
            .ok_or_else(|| ApiError::bad_request("X-User-Id header is required"))?
            .to_str()
            .map_err(|_| ApiError::bad_request("X-User-Id header is not valid text"))?
            .trim();

        if value.is_empty() {
            return Err(ApiError::bad_request("X-User-Id header is required"));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque access token handed out after OTP verification.
pub fn access_token_for(profile_id: &Value) -> String {
    match profile_id {
        Value::String(id) => format!("{ACCESS_TOKEN_PREFIX}{id}"),
        Value::Null => format!("{ACCESS_TOKEN_PREFIX}unknown"),
        other => format!("{ACCESS_TOKEN_PREFIX}{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use serde_json::json;

    #[test]
    fn reads_trimmed_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(CALLER_ID_HEADER, HeaderValue::from_static(" user-1 "));
        let caller = CallerIdentity::from_headers(&headers).unwrap();
        assert_eq!(caller.as_str(), "user-1");
    }

    #[test]
    fn missing_header_is_bad_request() {
        let err = CallerIdentity::from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_header_is_bad_request() {
        let mut headers = HeaderMap::new();
        headers.insert(CALLER_ID_HEADER, HeaderValue::from_static("   "));
        assert!(CallerIdentity::from_headers(&headers).is_err());
    }

    #[test]
    fn access_token_embeds_profile_id() {
        assert_eq!(access_token_for(&json!("abc")), "valid_token_abc");
        assert_eq!(access_token_for(&json!(42)), "valid_token_42");
        assert_eq!(access_token_for(&Value::Null), "valid_token_unknown");
    }
}
