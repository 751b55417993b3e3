// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Zigger Gateway - Development REST Translation Gateway
//!
//! This crate exposes the `/api/*` surface the Zigger mobile client expects
//! and translates each call into PostgREST requests against a Supabase
//! project, relaying the results with permissive CORS.
//!
//! ## Modules
//!
//! - `api` - HTTP surface (Axum): dispatcher, CORS, per-area handlers
//! - `routing` - Ordered route table and path patterns
//! - `providers` - Supabase REST client and response classification
//! - `auth` - Caller identity and development access tokens
//! - `kyc` - KYC submission field mapping
//! - `server` - Bind/serve/shutdown lifecycle

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod kyc;
pub mod logging;
pub mod models;
pub mod providers;
pub mod routing;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
