// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::ApiError;

/// Authentication error type.
///
/// Header and token problems all become `unauthenticated`; the variant only
/// refines the message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Header is not `Bearer <token>`
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Token could not be decoded
    #[error("Token is malformed")]
    MalformedToken,
    /// Token signature does not verify under the signing key
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,
    /// Login identity or secret mismatch
    #[error("invalid username or password")]
    InvalidCredentials,
    /// Hashing or signing failed
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Encoding(cause) => {
                error!(error = %cause, "credential or token encoding failed");
                ApiError::encoding("internal encoding failure")
            }
            other @ AuthError::InvalidCredentials => {
                ApiError::invalid_credentials(other.to_string())
            }
            other => ApiError::unauthenticated(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
