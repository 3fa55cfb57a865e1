// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::require_auth,
    error::{ErrorBody, ErrorCategory},
    models::{
        Address, AddressResponse, CredentialsRequest, GeocodeRequest, SearchRequest, TokenResponse,
    },
    state::AppState,
};

pub mod address;
pub mod auth;
pub mod extract;
pub mod health;

pub fn router(state: AppState) -> Router {
    // Rejected by the auth gate before the body is read.
    let protected_routes = Router::new()
        .route("/address/search", post(address::search))
        .route("/address/geocode", post(address::geocode))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected_routes);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

/// Registers the bearer JWT scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/register or /api/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        address::search,
        address::geocode,
        health::health
    ),
    components(
        schemas(
            Address,
            AddressResponse,
            SearchRequest,
            GeocodeRequest,
            CredentialsRequest,
            TokenResponse,
            ErrorBody,
            ErrorCategory,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Address", description = "Address search and reverse geocoding"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
