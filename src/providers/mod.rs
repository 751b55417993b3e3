// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clients for external services.

pub mod supabase;

pub use supabase::{eq_filter, Payload, StoreError, SupabaseClient, WriteMethod};
