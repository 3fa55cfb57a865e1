// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Boundary error type.
//!
//! Every failure leaving the HTTP surface is converted into an [`ApiError`],
//! which carries a machine-readable [`ErrorCategory`] next to the message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Machine-distinguishable failure category, serialized as `error_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request body could not be decoded.
    MalformedRequest,
    /// Bearer token missing, malformed, forged or expired.
    Unauthenticated,
    /// Login identity or secret did not match the stored credential.
    InvalidCredentials,
    /// Secret hashing or token signing failed.
    EncodingError,
    /// The geocoding provider call failed.
    UpstreamError,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::MalformedRequest => "malformed_request",
            ErrorCategory::Unauthenticated => "unauthenticated",
            ErrorCategory::InvalidCredentials => "invalid_credentials",
            ErrorCategory::EncodingError => "encoding_error",
            ErrorCategory::UpstreamError => "upstream_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCategory::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorCategory::Unauthenticated | ErrorCategory::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ErrorCategory::EncodingError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCategory::UpstreamError => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub category: ErrorCategory,
    pub message: String,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description.
    pub error: String,
    /// Failure category.
    pub error_code: ErrorCategory,
}

impl ApiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::MalformedRequest, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unauthenticated, message)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InvalidCredentials, message)
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::EncodingError, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::UpstreamError, message)
    }

    pub fn status(&self) -> StatusCode {
        self.category.status_code()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.category,
        });
        (status, body).into_response()
    }
}
