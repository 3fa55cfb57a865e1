// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::{
    auth::{AuthService, TokenIssuer},
    config::GatewayConfig,
    geocode::{DadataClient, GeoProvider, GeocodeAdapter},
};

/// Shared handler state. Cloning is cheap: every field is `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub geocoder: GeocodeAdapter,
}

impl AppState {
    pub fn new(auth: AuthService, geocoder: GeocodeAdapter) -> Self {
        Self { auth, geocoder }
    }

    /// Wire the production components from configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let tokens = TokenIssuer::new(config.signing_key.expose_secret().as_bytes(), config.token_ttl);
        let auth = AuthService::new(Arc::new(tokens), config.credential_store.build());

        let provider: Arc<dyn GeoProvider> = Arc::new(DadataClient::new(&config.dadata)?);

        Ok(Self::new(auth, GeocodeAdapter::new(provider)))
    }
}

#[cfg(test)]
use crate::geocode::testing::RecordingProvider;

#[cfg(test)]
impl AppState {
    pub(crate) const TEST_SECRET: &'static [u8] = b"gateway-test-signing-secret";

    /// State with a fixed signing key, an empty single-slot store and the
    /// given provider double.
    pub(crate) fn for_tests(provider: RecordingProvider) -> Self {
        Self::for_tests_with(Arc::new(provider))
    }

    /// Like [`AppState::for_tests`], keeping a handle on the provider so
    /// tests can inspect the calls it received.
    pub(crate) fn for_tests_with(provider: Arc<RecordingProvider>) -> Self {
        use crate::auth::CredentialStoreKind;

        let tokens = TokenIssuer::new(Self::TEST_SECRET, Some(chrono::TimeDelta::hours(1)));
        let auth = AuthService::new(Arc::new(tokens), CredentialStoreKind::Single.build());
        Self::new(auth, GeocodeAdapter::new(provider))
    }
}
