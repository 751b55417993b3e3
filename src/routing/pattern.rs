// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path patterns and extracted path parameters.
//!
//! Supported forms:
//! - Template: `/api/chat/{task_id}/send`, matched segment for segment
//! - Prefix: `/api/gigs/feed`, matched with a raw string prefix
//!
//! A `{name}` segment only binds an identifier token: lowercase hex digits
//! and dashes, as used by UUIDs.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Template(Vec<Segment>),
    Prefix(String),
}

impl PathPattern {
    /// Parse a template such as `/api/profiles/{id}/kyc`.
    pub fn template(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(segment.to_string()),
                }
            })
            .collect();
        PathPattern::Template(segments)
    }

    pub fn prefix(prefix: &str) -> Self {
        PathPattern::Prefix(prefix.to_string())
    }

    /// Match `path` (no query string), returning the bound parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        match self {
            PathPattern::Prefix(prefix) => path.starts_with(prefix.as_str()).then(PathParams::default),
            PathPattern::Template(segments) => {
                let mut params = PathParams::default();
                let mut actual = split_segments(path);
                for segment in segments {
                    let value = actual.next()?;
                    match segment {
                        Segment::Literal(literal) if literal == value => {}
                        Segment::Literal(_) => return None,
                        Segment::Param(name) if is_identifier_token(value) => {
                            params.insert(name, value);
                        }
                        Segment::Param(_) => return None,
                    }
                }
                if actual.next().is_some() {
                    return None;
                }
                Some(params)
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Prefix(prefix) => write!(f, "{prefix}*"),
            PathPattern::Template(segments) => {
                for segment in segments {
                    match segment {
                        Segment::Literal(literal) => write!(f, "/{literal}")?,
                        Segment::Param(name) => write!(f, "/{{{name}}}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Parameters bound by a [`PathPattern`], in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// One or more of `[0-9a-f-]`.
pub fn is_identifier_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b) || b == b'-')
}
