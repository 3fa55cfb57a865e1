// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! GeoProxy Gateway - authenticated address lookup service
//!
//! Issues signed bearer tokens to registered users and forwards their
//! address search and reverse geocoding requests to an external provider
//! (DaData), normalizing the results.
//!
//! ## Modules
//!
//! - `api` - HTTP routes, handlers and OpenAPI document (Axum)
//! - `auth` - Credential store, token issuing and the auth gate
//! - `geocode` - Provider abstraction and the DaData client
//! - `config` - Environment configuration
//! - `telemetry` - Logging setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod geocode;
pub mod models;
pub mod state;
pub mod telemetry;
