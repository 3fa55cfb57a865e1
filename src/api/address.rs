// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Address search and reverse geocoding endpoints.
//!
//! Both routes sit behind the auth gate.

use axum::{extract::State, Json};
use tracing::info;

use super::extract::ApiJson;
use crate::{
    auth::Auth,
    error::{ApiError, ErrorBody},
    models::{AddressResponse, GeocodeRequest, SearchRequest},
    state::AppState,
};

/// Search addresses by free-text query.
#[utoipa::path(
    post,
    path = "/api/address/search",
    tag = "Address",
    security(("bearer" = [])),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching addresses in provider order", body = AddressResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 502, description = "Geocoding provider failed", body = ErrorBody)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Auth(user): Auth,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<AddressResponse>, ApiError> {
    info!(identity = %user.identity, "address search");
    let response = state.geocoder.search(request).await?;
    Ok(Json(response))
}

/// Find addresses near a coordinate pair.
#[utoipa::path(
    post,
    path = "/api/address/geocode",
    tag = "Address",
    security(("bearer" = [])),
    request_body = GeocodeRequest,
    responses(
        (status = 200, description = "Nearby addresses in provider order", body = AddressResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 502, description = "Geocoding provider failed", body = ErrorBody)
    )
)]
pub async fn geocode(
    State(state): State<AppState>,
    Auth(user): Auth,
    ApiJson(request): ApiJson<GeocodeRequest>,
) -> Result<Json<AddressResponse>, ApiError> {
    info!(identity = %user.identity, "reverse geocode");
    let response = state.geocoder.reverse(request).await?;
    Ok(Json(response))
}
