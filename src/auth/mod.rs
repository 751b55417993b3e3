// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Caller Identity
//!
//! The gateway performs no authentication. Requests identify themselves with
//! the `X-User-Id` header, and OTP verification hands back an opaque token
//! derived from the profile id. Both are accepted without verification.

pub mod identity;

pub use identity::{access_token_for, CallerIdentity, CALLER_ID_HEADER};
