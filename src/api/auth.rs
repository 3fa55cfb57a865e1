// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Register and login endpoints.

use axum::{extract::State, Json};

use super::extract::ApiJson;
use crate::{
    error::{ApiError, ErrorBody},
    models::{CredentialsRequest, TokenResponse},
    state::AppState,
};

/// Register a username and password.
///
/// Stores the credential (overwriting any earlier one for the same
/// username) and returns a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credential stored", body = TokenResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 500, description = "Token or hash could not be produced", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .auth
        .register(&request.username, &request.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = TokenResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Unknown username or wrong password", body = ErrorBody),
        (status = 500, description = "Token could not be produced", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .auth
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}
