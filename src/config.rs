// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`GatewayConfig`] loaded
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SUPABASE_REST_URL` | PostgREST base URL | `http://localhost:54321/rest/v1` |
//! | `SUPABASE_ANON_KEY` | API key sent as `apikey` and bearer token | Required |
//! | `STORE_TIMEOUT_SECS` | Per-request store timeout, `0` disables it | `30` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, str::FromStr, time::Duration};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SUPABASE_REST_URL_ENV: &str = "SUPABASE_REST_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const STORE_TIMEOUT_ENV: &str = "STORE_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
/// Local Supabase CLI stack.
pub const DEFAULT_REST_URL: &str = "http://localhost:54321/rest/v1";
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Everything the gateway needs to start.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub rest_url: String,
    pub api_key: String,
    /// `None` means store calls may hang indefinitely.
    pub store_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = env_optional(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match env_optional(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: HOST_ENV,
                    value: host.clone(),
                })?;

        let rest_url = env_optional(SUPABASE_REST_URL_ENV)
            .unwrap_or_else(|| DEFAULT_REST_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(rest_url.starts_with("http://") || rest_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: SUPABASE_REST_URL_ENV,
                value: rest_url,
            });
        }

        let api_key =
            env_optional(SUPABASE_ANON_KEY_ENV).ok_or(ConfigError::Missing(SUPABASE_ANON_KEY_ENV))?;

        let store_timeout = match env_optional(STORE_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        name: STORE_TIMEOUT_ENV,
                        value: raw,
                    })
                }
            },
            None => Some(Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS)),
        };

        let log_format = match env_optional(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            rest_url,
            api_key,
            store_timeout,
            log_format,
        })
    }
}
