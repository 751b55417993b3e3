// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! KYC submission field mapping.
//!
//! The mobile client has shipped both camelCase and snake_case payloads over
//! time. Each storage column is filled from the first *present* client key in
//! preference order; `null` and empty strings count as absent. Missing fields
//! are left out of the update entirely so the PATCH never clears columns.

use serde::Serialize;
use serde_json::Value;

use crate::models::KycStatus;

/// Partial profile update produced from a KYC submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KycUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Value>,
    pub kyc_status: KycStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_ifsc: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card_front_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card_back_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selfie_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<Value>,
}

impl KycUpdate {
    /// Map a client submission. `kyc_status` is always reset to pending.
    pub fn from_submission(submission: &Value) -> Self {
        let pick = |keys: &[&str]| pick_field(submission, keys);

        Self {
            full_name: pick(&["fullName", "full_name"]),
            kyc_status: KycStatus::Pending,
            id_type: pick(&["idType", "id_type"]),
            id_card_number: pick(&["idCardNumber", "id_card_number"]),
            dob: pick(&["dob", "date_of_birth"]),
            gender: pick(&["gender"]),
            address: pick(&["address"]),
            city: pick(&["city"]),
            state: pick(&["state"]),
            pincode: pick(&["pincode"]),
            bank_account_name: pick(&["bankAccountName", "bank_account_name"]),
            bank_account_number: pick(&["bankAccountNumber", "bank_account_number"]),
            bank_ifsc: pick(&["bankIfsc", "bank_ifsc"]),
            upi_id: pick(&["upiId", "upi_id"]),
            id_card_front_url: pick(&["idCardFrontUrl", "id_card_front_url"]),
            id_card_back_url: pick(&["idCardBackUrl", "id_card_back_url"]),
            selfie_url: pick(&["selfieUrl", "selfie_url"]),
            profile_photo_url: pick(&["profilePhotoUrl", "profile_photo_url"]),
        }
    }
}

/// First present value among `keys`, in order.
pub(crate) fn pick_field(submission: &Value, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|key| submission.get(*key))
        .find(|value| is_present(value))
        .cloned()
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
