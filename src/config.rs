// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and passed
//! explicitly to whatever needs it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 signing secret, at least 32 bytes | Required |
//! | `TOKEN_LIFETIME_HOURS` | Lifetime of issued tokens | `24` |
//! | `DATA_DIR` | Root directory for JSON file storage | unset (in-memory) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_USER_ID` | UUID of a development user to register | unset |
//! | `SEED_USER_NAME` | Name of the development user | `Demo User` |
//! | `SEED_USER_EMAIL` | Email of the development user | `demo@example.com` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use chrono::Duration;

use crate::auth::{SigningSecret, TokenConfig, TokenError, UserId};
use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const TOKEN_LIFETIME_HOURS_ENV: &str = "TOKEN_LIFETIME_HOURS";

/// Environment variable name for the JSON storage root.
///
/// When unset, resources live in memory for the lifetime of the process.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const SEED_USER_ID_ENV: &str = "SEED_USER_ID";
pub const SEED_USER_NAME_ENV: &str = "SEED_USER_NAME";
pub const SEED_USER_EMAIL_ENV: &str = "SEED_USER_EMAIL";

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid token settings: {0}")]
    Token(#[from] TokenError),
}

/// Development user registered at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub token: TokenConfig,
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    pub seed_user: Option<SeedUser>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host: IpAddr = match var(HOST_ENV) {
            Some(value) => value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: HOST_ENV,
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_HOST,
        };

        let port = match var(PORT_ENV) {
            Some(value) => parse_number::<u16>(PORT_ENV, value)?,
            None => DEFAULT_PORT,
        };

        let token = token_config(&var)?;

        let data_dir = var(DATA_DIR_ENV).map(PathBuf::from);

        let log_format: LogFormat = match var(LOG_FORMAT_ENV) {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                value,
                reason,
            })?,
            None => LogFormat::default(),
        };

        let seed_user = match var(SEED_USER_ID_ENV) {
            Some(value) => {
                let id: UserId = value.trim().parse().map_err(|e: uuid::Error| ConfigError::Invalid {
                    name: SEED_USER_ID_ENV,
                    value,
                    reason: e.to_string(),
                })?;
                Some(SeedUser {
                    id,
                    name: var(SEED_USER_NAME_ENV).unwrap_or_else(|| "Demo User".to_string()),
                    email: var(SEED_USER_EMAIL_ENV)
                        .unwrap_or_else(|| "demo@example.com".to_string()),
                })
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            token,
            data_dir,
            log_format,
            seed_user,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Token settings alone. Used by the `issue-token` tool, which has no
/// server to bind.
pub fn token_config_from_env() -> Result<TokenConfig, ConfigError> {
    token_config(&|name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

fn token_config(var: &dyn Fn(&str) -> Option<String>) -> Result<TokenConfig, ConfigError> {
    let secret = var(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
    let secret = SigningSecret::new(secret)?;

    let lifetime = match var(TOKEN_LIFETIME_HOURS_ENV) {
        Some(value) => {
            let hours = parse_number::<i64>(TOKEN_LIFETIME_HOURS_ENV, value.clone())?;
            Duration::try_hours(hours).ok_or_else(|| ConfigError::Invalid {
                name: TOKEN_LIFETIME_HOURS_ENV,
                value,
                reason: "duration out of range".to_string(),
            })?
        }
        None => Duration::hours(crate::auth::token::DEFAULT_TOKEN_LIFETIME_HOURS),
    };

    Ok(TokenConfig::new(secret, lifetime)?)
}

fn parse_number<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "config-secret-0123456789abcdefgh";

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[(JWT_SECRET_ENV, SECRET)]).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.token.lifetime, Duration::hours(24));
        assert_eq!(config.data_dir, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.seed_user, None);
    }

    #[test]
    fn secret_is_required_and_must_be_long_enough() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing(JWT_SECRET_ENV))));
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, "short")]),
            Err(ConfigError::Token(TokenError::WeakSecret(5)))
        ));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let seed = UserId::new_random();
        let seed_text = seed.to_string();
        let config = load(&[
            (JWT_SECRET_ENV, SECRET),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
            (TOKEN_LIFETIME_HOURS_ENV, "2"),
            (DATA_DIR_ENV, "/tmp/cashbook"),
            (LOG_FORMAT_ENV, "json"),
            (SEED_USER_ID_ENV, &seed_text),
            (SEED_USER_NAME_ENV, "Ayu"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.token.lifetime, Duration::hours(2));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/cashbook")));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.seed_user,
            Some(SeedUser {
                id: seed,
                name: "Ayu".into(),
                email: "demo@example.com".into(),
            })
        );
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let cases = [
            (PORT_ENV, "eighty"),
            (HOST_ENV, "not-an-ip"),
            (TOKEN_LIFETIME_HOURS_ENV, "soon"),
            (LOG_FORMAT_ENV, "xml"),
            (SEED_USER_ID_ENV, "user_123"),
        ];

        for (name, value) in cases {
            let err = load(&[(JWT_SECRET_ENV, SECRET), (name, value)]).unwrap_err();
            match err {
                ConfigError::Invalid { name: got, .. } => assert_eq!(got, name),
                other => panic!("expected invalid {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_positive_lifetime_is_rejected() {
        let err = load(&[(JWT_SECRET_ENV, SECRET), (TOKEN_LIFETIME_HOURS_ENV, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Token(TokenError::InvalidLifetime)));
    }

    #[test]
    fn oversized_lifetime_is_rejected_without_panicking() {
        let too_long = load(&[(JWT_SECRET_ENV, SECRET), (TOKEN_LIFETIME_HOURS_ENV, "10000000000")])
            .unwrap_err();
        assert!(matches!(too_long, ConfigError::Token(TokenError::LifetimeTooLong)));

        let unrepresentable = load(&[
            (JWT_SECRET_ENV, SECRET),
            (TOKEN_LIFETIME_HOURS_ENV, "9223372036854775807"),
        ])
        .unwrap_err();
        assert!(matches!(
            unrepresentable,
            ConfigError::Invalid { name: TOKEN_LIFETIME_HOURS_ENV, .. }
        ));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[(JWT_SECRET_ENV, SECRET), (DATA_DIR_ENV, "  ")]).unwrap();
        assert_eq!(config.data_dir, None);
    }
}
