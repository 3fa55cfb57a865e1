// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON body extractor with gateway error responses.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Decodes the request body as JSON regardless of `Content-Type`.
///
/// Any failure (unreadable body, invalid JSON, wrong field types) is
/// rejected as `malformed_request` before the handler runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "failed to read request body");
            ApiError::malformed_request("request body could not be read")
        })?;

        serde_json::from_slice(&bytes).map(ApiJson).map_err(|e| {
            debug!(error = %e, "request body is not valid JSON");
            ApiError::malformed_request(format!("invalid JSON body: {e}"))
        })
    }
}
