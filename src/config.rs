// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup. A `.env`
//! file in the working directory is loaded first if present.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SECRET_KEY` | HS256 token signing key | Required |
//! | `DADATA_API_KEY` | DaData API key | Required |
//! | `DADATA_SECRET_KEY` | DaData secret key | Required |
//! | `DADATA_BASE_URL` | DaData suggestions API root | `https://suggestions.dadata.ru/suggestions/api/4_1/rs` |
//! | `DADATA_SUGGESTION_COUNT` | Max addresses per provider call | `10` |
//! | `UPSTREAM_TIMEOUT_SECONDS` | Provider call deadline | `10` |
//! | `TOKEN_TTL_SECONDS` | Token lifetime, `0` disables expiry | `86400` |
//! | `CREDENTIAL_STORE` | `single` or `multi` | `single` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `geoproxy_gateway=info,tower_http=debug` |

use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use chrono::TimeDelta;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::auth::CredentialStoreKind;

pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const DADATA_API_KEY_ENV: &str = "DADATA_API_KEY";
pub const DADATA_SECRET_KEY_ENV: &str = "DADATA_SECRET_KEY";
pub const DADATA_BASE_URL_ENV: &str = "DADATA_BASE_URL";
pub const DADATA_SUGGESTION_COUNT_ENV: &str = "DADATA_SUGGESTION_COUNT";
pub const UPSTREAM_TIMEOUT_SECONDS_ENV: &str = "UPSTREAM_TIMEOUT_SECONDS";
pub const TOKEN_TTL_SECONDS_ENV: &str = "TOKEN_TTL_SECONDS";
pub const CREDENTIAL_STORE_ENV: &str = "CREDENTIAL_STORE";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_DADATA_BASE_URL: &str = "https://suggestions.dadata.ru/suggestions/api/4_1/rs";
const DEFAULT_SUGGESTION_COUNT: u32 = 10;
/// DaData caps suggestions at 20 per request.
const MAX_SUGGESTION_COUNT: u32 = 20;
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// DaData provider settings.
#[derive(Debug, Clone)]
pub struct DadataConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub secret_key: SecretString,
    pub suggestion_count: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub signing_key: SecretString,
    /// `None` when tokens never expire
    pub token_ttl: Option<TimeDelta>,
    pub credential_store: CredentialStoreKind,
    pub dadata: DadataConfig,
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host: IpAddr = env.parsed(HOST_ENV, DEFAULT_HOST.parse().ok())?;
        let port: u16 = env.parsed(PORT_ENV, Some(DEFAULT_PORT))?;
        let signing_key = SecretString::from(env.required(SECRET_KEY_ENV)?);

        let ttl_seconds: i64 = env.parsed(TOKEN_TTL_SECONDS_ENV, Some(DEFAULT_TOKEN_TTL_SECONDS))?;
        let token_ttl = match ttl_seconds {
            0 => None,
            s if s < 0 => return Err(invalid(TOKEN_TTL_SECONDS_ENV, "must not be negative")),
            s => Some(
                TimeDelta::try_seconds(s)
                    .ok_or_else(|| invalid(TOKEN_TTL_SECONDS_ENV, "out of range"))?,
            ),
        };

        let credential_store = match env.optional(CREDENTIAL_STORE_ENV) {
            Some(raw) => raw
                .parse::<CredentialStoreKind>()
                .map_err(|e: String| invalid(CREDENTIAL_STORE_ENV, &e))?,
            None => CredentialStoreKind::default(),
        };

        let dadata = DadataConfig::from_env(&env)?;

        Ok(Self {
            host,
            port,
            signing_key,
            token_ttl,
            credential_store,
            dadata,
        })
    }

    /// Returns the socket address for binding the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DadataConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = env
            .optional(DADATA_BASE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_DADATA_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e| invalid(DADATA_BASE_URL_ENV, &e.to_string()))?;

        let suggestion_count: u32 =
            env.parsed(DADATA_SUGGESTION_COUNT_ENV, Some(DEFAULT_SUGGESTION_COUNT))?;
        if !(1..=MAX_SUGGESTION_COUNT).contains(&suggestion_count) {
            return Err(invalid(
                DADATA_SUGGESTION_COUNT_ENV,
                &format!("must be between 1 and {MAX_SUGGESTION_COUNT}"),
            ));
        }

        let timeout_seconds: u64 =
            env.parsed(UPSTREAM_TIMEOUT_SECONDS_ENV, Some(DEFAULT_UPSTREAM_TIMEOUT_SECONDS))?;
        if timeout_seconds == 0 {
            return Err(invalid(UPSTREAM_TIMEOUT_SECONDS_ENV, "must be positive"));
        }

        Ok(Self {
            base_url,
            api_key: SecretString::from(env.required(DADATA_API_KEY_ENV)?),
            secret_key: SecretString::from(env.required(DADATA_SECRET_KEY_ENV)?),
            suggestion_count,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value, with blank treated as unset.
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn parsed<T>(&self, name: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(raw) => raw.parse().map_err(|e: T::Err| invalid(name, &e.to_string())),
            None => default.ok_or_else(|| ConfigError::MissingEnvVar(name.to_string())),
        }
    }
}

fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(name.to_string(), reason.to_string())
}
