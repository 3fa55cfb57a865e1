// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Geocoding provider capability.

use async_trait::async_trait;

use super::error::ProviderError;
use crate::models::Address;

/// External geocoding service as seen by the gateway.
///
/// Implementations forward their arguments untouched and return addresses
/// in the order the service produced them.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Free-text address suggestions.
    async fn search(&self, query: &str) -> Result<Vec<Address>, ProviderError>;

    /// Addresses near a coordinate pair.
    async fn reverse(&self, lat: &str, lon: &str) -> Result<Vec<Address>, ProviderError>;
}
