// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response shapes of the gateway. All types derive `ToSchema`
//! for OpenAPI documentation.
//!
//! ## Coordinates
//!
//! Latitude and longitude are carried as strings end to end. They are never
//! parsed into floats, so a coordinate leaves the gateway with exactly the
//! text the provider produced.
//!
//! ## Lenient Request Bodies
//!
//! Request DTOs default missing fields to empty strings. An empty query or
//! coordinate is forwarded to the provider as-is.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Canonical Address
// =============================================================================

/// Canonical geocoding result, independent of provider field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Address {
    /// City (or settlement) name.
    #[schema(example = "Moscow")]
    pub city: String,
    /// Street name.
    #[schema(example = "Lenina")]
    pub street: String,
    /// House number.
    #[schema(example = "10")]
    pub house: String,
    /// Latitude in decimal degrees, verbatim from the provider.
    #[schema(example = "55.7558")]
    pub lat: String,
    /// Longitude in decimal degrees, verbatim from the provider.
    #[schema(example = "37.6173")]
    pub lon: String,
}

/// Envelope returned by both address operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AddressResponse {
    /// Addresses in provider order, not deduplicated.
    pub addresses: Vec<Address>,
}

// =============================================================================
// Address Requests
// =============================================================================

/// Free-text address search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct SearchRequest {
    #[schema(example = "Moscow Lenina")]
    pub query: String,
}

/// Reverse geocoding by coordinates.
///
/// The longitude travels as `lng` on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct GeocodeRequest {
    #[schema(example = "55.7558")]
    pub lat: String,
    #[serde(rename = "lng")]
    #[schema(example = "37.6173")]
    pub lon: String,
}

// =============================================================================
// Auth Requests
// =============================================================================

/// Username and password pair used by register and login.
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn moscow() -> Address {
        Address {
            city: "Moscow".into(),
            street: "Lenina".into(),
            house: "10".into(),
            lat: "55.75580".into(),
            lon: "37.6173000".into(),
        }
    }

    #[test]
    fn address_round_trip_keeps_coordinate_text() {
        let address = moscow();
        let encoded = serde_json::to_string(&address).unwrap();
        assert!(encoded.contains(r#""lat":"55.75580""#));
        assert!(encoded.contains(r#""lon":"37.6173000""#));

        let decoded: Address = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, address);
    }

    #[test]
    fn address_response_uses_addresses_envelope() {
        let response = AddressResponse {
            addresses: vec![moscow()],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["addresses"][0]["city"], "Moscow");
        assert_eq!(value["addresses"][0]["house"], "10");
    }

    #[test]
    fn search_request_defaults_missing_query() {
        let request: SearchRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.query, "");
    }

    #[test]
    fn geocode_request_reads_lng() {
        let with_lng: GeocodeRequest =
            serde_json::from_value(json!({ "lat": "55.7558", "lng": "37.6173" })).unwrap();
        assert_eq!(with_lng.lon, "37.6173");

        let missing: GeocodeRequest = serde_json::from_value(json!({ "lat": "55.7558" })).unwrap();
        assert_eq!(missing.lon, "");
    }

    #[test]
    fn geocode_request_ignores_lon_key() {
        let only_lon: GeocodeRequest =
            serde_json::from_value(json!({ "lat": "1", "lon": "3" })).unwrap();
        assert_eq!(only_lon.lon, "");

        let both: GeocodeRequest =
            serde_json::from_value(json!({ "lat": "1", "lng": "2", "lon": "3" })).unwrap();
        assert_eq!(both.lon, "2");
    }

    #[test]
    fn geocode_request_rejects_numeric_coordinates() {
        let result = serde_json::from_value::<GeocodeRequest>(json!({ "lat": 55.7, "lng": 37.6 }));
        assert!(result.is_err());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let request = CredentialsRequest {
            username: "alice".into(),
            password: "p1".into(),
        };
        let printed = format!("{request:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("p1"));
    }
}
