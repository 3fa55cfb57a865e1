// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! [`require_auth`] guards a router subtree: it rejects the request before
//! the handler runs (and so before the body is read) unless a valid bearer
//! token is present, then stores the [`AuthenticatedUser`] in the request
//! extensions for the [`Auth`](super::Auth) extractor.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/address/search", post(search))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{token::TokenIssuer, AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), state.auth.tokens()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, path = %request.uri().path(), "request rejected by auth gate");
            e.into_response()
        }
    }
}

/// Extract and verify the bearer token carried in `headers`.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenIssuer) -> Result<AuthenticatedUser, AuthError> {
    let token = bearer_token(headers)?;
    tokens.verify(token).map(AuthenticatedUser::from)
}

/// Parse `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}
