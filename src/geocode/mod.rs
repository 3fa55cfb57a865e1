// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Geocode Adapter
//!
//! Sits between the HTTP handlers and the external geocoding provider.
//! Requests are forwarded verbatim; provider results are wrapped in the
//! canonical [`AddressResponse`] and provider failures become
//! [`GeocodeError::Upstream`]. Nothing is retried and no state is kept
//! between calls.

pub mod dadata;
pub mod error;
pub mod provider;

use std::sync::Arc;

use tracing::debug;

pub use dadata::DadataClient;
pub use error::{GeocodeError, ProviderError};
pub use provider::GeoProvider;

use crate::models::{AddressResponse, GeocodeRequest, SearchRequest};

#[derive(Clone)]
pub struct GeocodeAdapter {
    provider: Arc<dyn GeoProvider>,
}

impl GeocodeAdapter {
    pub fn new(provider: Arc<dyn GeoProvider>) -> Self {
        Self { provider }
    }

    /// Address search. An empty query is forwarded like any other.
    pub async fn search(&self, request: SearchRequest) -> Result<AddressResponse, GeocodeError> {
        let addresses = self.provider.search(&request.query).await?;
        debug!(
            query = %request.query,
            results = addresses.len(),
            "address search completed"
        );
        Ok(AddressResponse { addresses })
    }

    /// Reverse geocoding. Coordinates are not validated here.
    pub async fn reverse(&self, request: GeocodeRequest) -> Result<AddressResponse, GeocodeError> {
        let addresses = self.provider.reverse(&request.lat, &request.lon).await?;
        debug!(
            lat = %request.lat,
            lon = %request.lon,
            results = addresses.len(),
            "reverse geocoding completed"
        );
        Ok(AddressResponse { addresses })
    }
}
