// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Geocoding errors.

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::ApiError;

/// Failure of a single provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider response was invalid: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Short cause that is safe to show to API clients.
    pub fn cause(&self) -> String {
        match self {
            ProviderError::Timeout => "timed out".to_string(),
            ProviderError::Transport(_) => "unreachable".to_string(),
            ProviderError::Status { status, .. } => format!("responded with status {status}"),
            ProviderError::Decode(_) => "returned an unreadable response".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The provider call failed; not retried.
    #[error("upstream geocoding provider failed: {0}")]
    Upstream(#[from] ProviderError),
}

impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::Upstream(cause) => {
                error!(error = %cause, "geocoding provider call failed");
                ApiError::upstream(format!(
                    "upstream geocoding provider {}",
                    cause.cause()
                ))
            }
        }
    }
}

impl IntoResponse for GeocodeError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
