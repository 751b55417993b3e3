// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Route Table
//!
//! The gateway's inbound surface as an ordered list of
//! `(method, pattern, action)` rules. Resolution walks the list top to bottom
//! and the first rule whose method and pattern both match wins, so
//! sub-resource rules (`/api/gigs/{task_id}/applications`) sit above the
//! broader ones (`/api/gigs/feed` prefix) they would otherwise be shadowed
//! by. A path that matches no rule is left to the caller's fallthrough.

pub mod pattern;

use axum::http::Method;

pub use pattern::{PathParams, PathPattern};

/// What the gateway does for a matched rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SendOtp,
    VerifyOtp,
    SendChatMessage,
    ListChatMessages,
    CreateGig,
    ApplyForGig,
    AssignedGigs,
    MyGigs,
    GigApplications,
    MyApplication,
    SubmitKyc,
    UpdateRole,
    GetProfile,
    GigFeed,
    WalletBalance,
    WalletTransactions,
    Notifications,
    UserReviews,
    SubmitReview,
}

#[derive(Debug, Clone)]
pub struct RouteRule {
    pub method: Method,
    pub pattern: PathPattern,
    pub action: Action,
}

impl RouteRule {
    pub fn new(method: Method, pattern: PathPattern, action: Action) -> Self {
        Self {
            method,
            pattern,
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub action: Action,
    /// Pattern of the rule that matched.
    pub pattern: PathPattern,
    pub params: PathParams,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Build a table from rules already in priority order.
    pub fn with_rules(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.rules
            .iter()
            .filter(|rule| rule.method == *method)
            .find_map(|rule| {
                rule.pattern.matches(path).map(|params| RouteMatch {
                    action: rule.action,
                    pattern: rule.pattern.clone(),
                    params,
                })
            })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        use Action::*;
        use PathPattern as P;

        Self::with_rules(vec![
            RouteRule::new(Method::POST, P::template("/api/auth/send-otp"), SendOtp),
            RouteRule::new(Method::POST, P::template("/api/auth/verify-otp"), VerifyOtp),
            RouteRule::new(
                Method::POST,
                P::template("/api/chat/{task_id}/send"),
                SendChatMessage,
            ),
            RouteRule::new(
                Method::GET,
                P::template("/api/chat/{task_id}/messages"),
                ListChatMessages,
            ),
            RouteRule::new(Method::POST, P::template("/api/gigs"), CreateGig),
            RouteRule::new(
                Method::POST,
                P::template("/api/gigs/{task_id}/apply"),
                ApplyForGig,
            ),
            RouteRule::new(Method::GET, P::template("/api/gigs/assigned"), AssignedGigs),
            RouteRule::new(Method::GET, P::template("/api/gigs/my-gigs"), MyGigs),
            RouteRule::new(
                Method::GET,
                P::template("/api/gigs/{task_id}/applications"),
                GigApplications,
            ),
            RouteRule::new(
                Method::GET,
                P::template("/api/gigs/{task_id}/my-application"),
                MyApplication,
            ),
            RouteRule::new(Method::POST, P::template("/api/profiles/{id}/kyc"), SubmitKyc),
            RouteRule::new(Method::PUT, P::template("/api/profiles/{id}/role"), UpdateRole),
            RouteRule::new(Method::GET, P::template("/api/profiles/{id}"), GetProfile),
            RouteRule::new(Method::GET, P::prefix("/api/gigs/feed"), GigFeed),
            RouteRule::new(Method::GET, P::template("/api/wallet/balance"), WalletBalance),
            RouteRule::new(
                Method::GET,
                P::template("/api/wallet/transactions"),
                WalletTransactions,
            ),
            RouteRule::new(Method::GET, P::template("/api/notifications"), Notifications),
            RouteRule::new(
                Method::GET,
                P::template("/api/reviews/user/{user_id}"),
                UserReviews,
            ),
            RouteRule::new(
                Method::POST,
                P::template("/api/reviews/{task_id}"),
                SubmitReview,
            ),
        ])
    }
}
