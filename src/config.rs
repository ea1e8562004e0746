// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Config`] loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `EXPENSE_AMOUNT_CEILING` | Largest accepted expense amount | `100000000` |
//! | `EXPENSE_STRICT_CHARSET` | Restrict description characters | `true` |
//! | `SEED_SAMPLE_EXPENSES` | Preload sample expenses at startup | `false` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::validation::{ExpensePolicy, DEFAULT_AMOUNT_CEILING};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const AMOUNT_CEILING_ENV: &str = "EXPENSE_AMOUNT_CEILING";
pub const STRICT_CHARSET_ENV: &str = "EXPENSE_STRICT_CHARSET";
pub const SEED_SAMPLE_ENV: &str = "SEED_SAMPLE_EXPENSES";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    pub policy: ExpensePolicy,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match lookup(HOST_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: HOST_ENV,
                value,
                reason: "expected an IP address",
            })?,
            None => DEFAULT_HOST,
        };

        let port = match lookup(PORT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                value,
                reason: "expected a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None => LogFormat::default(),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: LOG_FORMAT_ENV,
                        value: value.to_string(),
                        reason: "expected `json` or `pretty`",
                    })
                }
            },
        };

        let amount_ceiling = match lookup(AMOUNT_CEILING_ENV) {
            Some(value) => match value.parse::<i64>() {
                Ok(ceiling) if ceiling > 0 => ceiling,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: AMOUNT_CEILING_ENV,
                        value,
                        reason: "expected a positive integer",
                    })
                }
            },
            None => DEFAULT_AMOUNT_CEILING,
        };

        let strict_charset = parse_flag(&lookup, STRICT_CHARSET_ENV, true)?;
        let seed_sample_data = parse_flag(&lookup, SEED_SAMPLE_ENV, false)?;

        Ok(Self {
            host,
            port,
            log_format,
            policy: ExpensePolicy {
                amount_ceiling,
                strict_charset,
                ..ExpensePolicy::default()
            },
            seed_sample_data,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected a boolean",
        }),
    }
}
