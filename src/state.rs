// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{providers::SupabaseClient, routing::RouteTable};

/// Shared, read-only handle given to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: SupabaseClient,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(store: SupabaseClient, routes: RouteTable) -> Self {
        Self {
            store,
            routes: Arc::new(routes),
        }
    }
}
