// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Data Models
//!
//! Records the gateway builds itself before handing them to the store, and
//! the response envelopes it writes back. Rows read back from the store
//! (tasks, applications, stored profiles) pass through as raw JSON and are
//! never modelled here.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::kyc::pick_field;

// =============================================================================
// Profile Enums
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Worker,
    Employer,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
}

/// Trust score every new account starts with.
pub const DEFAULT_TRUST_SCORE: i32 = 100;

// =============================================================================
// Profile Models
// =============================================================================

/// Profile created on first OTP verification of an unknown mobile number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProfile {
    pub id: Uuid,
    pub mobile: String,
    pub role: Role,
    pub kyc_status: KycStatus,
    pub wallet_balance: f64,
    pub trust_score: i32,
}

impl NewProfile {
    pub fn for_mobile(mobile: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mobile: mobile.into(),
            role: Role::Worker,
            kyc_status: KycStatus::Approved,
            wallet_balance: 0.0,
            trust_score: DEFAULT_TRUST_SCORE,
        }
    }
}

/// Returned with 200 when a profile lookup finds nothing.
///
/// The mobile client decodes `/api/profiles/{id}` into a typed model and
/// cannot handle a 404 there.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfilePlaceholder {
    pub id: String,
    pub error: &'static str,
}

impl ProfilePlaceholder {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: "Not Found",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleUpdate {
    pub role: Role,
}

// =============================================================================
// Gig Models
// =============================================================================

/// Status every newly posted gig starts in.
pub const OPEN_TASK_STATUS: &str = "open";

/// Status every new application starts in.
pub const PENDING_APPLICATION_STATUS: &str = "pending";

/// Task row inserted for `POST /api/gigs`.
///
/// Client fields may arrive camelCased or snake_cased; absent ones are left
/// for the store's column defaults.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewGig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_lat: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_lng: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Value>,
    pub created_by: String,
    pub status: &'static str,
}

impl NewGig {
    pub fn from_submission(submission: &Value, created_by: impl Into<String>) -> Self {
        let pick = |keys: &[&str]| pick_field(submission, keys);

        Self {
            title: pick(&["title"]),
            description: pick(&["description"]),
            location_name: pick(&["locationName", "location_name"]),
            geo_lat: pick(&["geoLat", "geo_lat"]),
            geo_lng: pick(&["geoLng", "geo_lng"]),
            payout: pick(&["payout"]),
            start_time: pick(&["startTime", "start_time"]),
            end_time: pick(&["endTime", "end_time"]),
            estimated_hours: pick(&["estimatedHours", "estimated_hours"]),
            created_by: created_by.into(),
            status: OPEN_TASK_STATUS,
        }
    }
}

/// Application row inserted for `POST /api/gigs/{task_id}/apply`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewApplication {
    pub task_id: String,
    pub worker_id: String,
    pub status: &'static str,
}

impl NewApplication {
    pub fn new(task_id: impl Into<String>, worker_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            worker_id: worker_id.into(),
            status: PENDING_APPLICATION_STATUS,
        }
    }
}

// =============================================================================
// Review Models
// =============================================================================

/// Review row inserted for `POST /api/reviews/{task_id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewReview {
    pub task_id: String,
    pub reviewer_id: String,
    /// The other participant of the task, when it can be worked out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewee_id: Option<String>,
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

// =============================================================================
// Chat Models
// =============================================================================

/// Chat message row as inserted by the gateway.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewChatMessage {
    pub task_id: String,
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Set by the gateway at send time; client timestamps are ignored.
    #[serde(serialize_with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

impl NewChatMessage {
    pub fn new(
        task_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: Option<Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            sender_id: sender_id.into(),
            content,
            created_at,
        }
    }
}

fn rfc3339_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// =============================================================================
// Response Envelopes
// =============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    pub profile: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BalanceResponse {
    pub balance: f64,
}

/// Body for requests that match no route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusAck {
    pub status: &'static str,
}

impl StatusAck {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_profile_has_documented_defaults() {
        let profile = NewProfile::for_mobile("+911234567890");
        assert_eq!(profile.mobile, "+911234567890");
        assert_eq!(profile.role, Role::Worker);
        assert_eq!(profile.kyc_status, KycStatus::Approved);
        assert_eq!(profile.wallet_balance, 0.0);
        assert_eq!(profile.trust_score, 100);
    }

    #[test]
    fn new_profiles_get_distinct_ids() {
        let a = NewProfile::for_mobile("1");
        let b = NewProfile::for_mobile("1");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_profile_serializes_storage_shape() {
        let profile = NewProfile::for_mobile("555");
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["role"], "worker");
        assert_eq!(value["kyc_status"], "approved");
        assert_eq!(value["wallet_balance"], json!(0.0));
        assert_eq!(value["trust_score"], 100);
        assert_eq!(value["id"], profile.id.to_string());
    }

    #[test]
    fn chat_message_omits_missing_content() {
        let message = NewChatMessage::new("t", "u", None, Utc::now());
        let value = serde_json::to_value(&message).unwrap();
        assert!(value.get("content").is_none());
        assert_eq!(value["task_id"], "t");
        assert_eq!(value["sender_id"], "u");
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn chat_timestamp_has_millisecond_precision() {
        let at: DateTime<Utc> = "2024-05-01T12:30:45.123456789Z".parse().unwrap();
        let message = NewChatMessage::new("t", "u", Some(json!("hi")), at);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["created_at"], "2024-05-01T12:30:45.123Z");
    }

    #[test]
    fn new_gig_maps_client_keys_and_opens_task() {
        let gig = NewGig::from_submission(
            &json!({
                "title": "Unload truck",
                "locationName": "Dock 4",
                "geo_lat": 12.97,
                "payout": 800,
                "estimatedHours": "",
                "status": "completed",
                "created_by": "someone-else"
            }),
            "emp-1",
        );
        let value = serde_json::to_value(&gig).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Unload truck",
                "location_name": "Dock 4",
                "geo_lat": 12.97,
                "payout": 800,
                "created_by": "emp-1",
                "status": "open"
            })
        );
    }

    #[test]
    fn new_application_starts_pending() {
        let value = serde_json::to_value(NewApplication::new("t1", "w1")).unwrap();
        assert_eq!(
            value,
            json!({ "task_id": "t1", "worker_id": "w1", "status": "pending" })
        );
    }

    #[test]
    fn review_omits_unknown_reviewee_and_comment() {
        let review = NewReview {
            task_id: "t1".into(),
            reviewer_id: "w1".into(),
            reviewee_id: None,
            rating: 4,
            comment: None,
        };
        assert_eq!(
            serde_json::to_value(review).unwrap(),
            json!({ "task_id": "t1", "reviewer_id": "w1", "rating": 4 })
        );
    }

    #[test]
    fn placeholder_and_ack_shapes() {
        assert_eq!(
            serde_json::to_value(ProfilePlaceholder::not_found("abc")).unwrap(),
            json!({ "id": "abc", "error": "Not Found" })
        );
        assert_eq!(
            serde_json::to_value(StatusAck::ok()).unwrap(),
            json!({ "status": "ok" })
        );
    }
}
