// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DaData suggestions API integration.
//!
//! - `POST {base}/suggest/address` for free-text search
//! - `POST {base}/geolocate/address` for reverse geocoding
//!
//! Both answer `{"suggestions": [{"value": ..., "data": {...}}]}`; only the
//! city, street, house and coordinate fields of `data` are kept.

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::debug;

use super::{error::ProviderError, provider::GeoProvider};
use crate::{config::DadataConfig, models::Address};

const SUGGEST_PATH: &str = "/suggest/address";
const GEOLOCATE_PATH: &str = "/geolocate/address";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct DadataClient {
    base_url: String,
    api_key: SecretString,
    secret_key: SecretString,
    suggestion_count: u32,
    http: Client,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    query: &'a str,
    count: u32,
}

#[derive(Debug, Serialize)]
struct GeolocateRequest<'a> {
    lat: Coordinate<'a>,
    lon: Coordinate<'a>,
    count: u32,
}

/// Coordinate as sent upstream: numeric text goes out as a JSON number with
/// the same digits, anything else as the original string.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Coordinate<'a> {
    Number(Box<RawValue>),
    Text(&'a str),
}

#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    #[serde(default)]
    suggestions: Option<Vec<Suggestion>>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    #[serde(default)]
    data: Option<SuggestionData>,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestionData {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    settlement: Option<String>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    house: Option<String>,
    #[serde(default)]
    geo_lat: Option<String>,
    #[serde(default)]
    geo_lon: Option<String>,
}

impl From<SuggestionData> for Address {
    fn from(data: SuggestionData) -> Self {
        Self {
            city: data.city.or(data.settlement).unwrap_or_default(),
            street: data.street.unwrap_or_default(),
            house: data.house.unwrap_or_default(),
            lat: data.geo_lat.unwrap_or_default(),
            lon: data.geo_lon.unwrap_or_default(),
        }
    }
}

impl SuggestionsResponse {
    fn into_addresses(self) -> Vec<Address> {
        self.suggestions
            .unwrap_or_default()
            .into_iter()
            .map(|suggestion| Address::from(suggestion.data.unwrap_or_default()))
            .collect()
    }
}

impl DadataClient {
    pub fn new(config: &DadataConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
            suggestion_count: config.suggestion_count,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_suggestions<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<Vec<Address>, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header(AUTHORIZATION, format!("Token {}", self.api_key.expose_secret()))
            .header("X-Secret", self.secret_key.expose_secret())
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let decoded: SuggestionsResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Decode(format!("POST {path} invalid JSON: {e}"))
            }
        })?;

        let addresses = decoded.into_addresses();
        debug!(path, results = addresses.len(), "DaData responded");
        Ok(addresses)
    }
}

#[async_trait]
impl GeoProvider for DadataClient {
    async fn search(&self, query: &str) -> Result<Vec<Address>, ProviderError> {
        let payload = SuggestRequest {
            query,
            count: self.suggestion_count,
        };
        self.post_suggestions(SUGGEST_PATH, &payload).await
    }

    async fn reverse(&self, lat: &str, lon: &str) -> Result<Vec<Address>, ProviderError> {
        let payload = GeolocateRequest {
            lat: coordinate(lat),
            lon: coordinate(lon),
            count: self.suggestion_count,
        };
        self.post_suggestions(GEOLOCATE_PATH, &payload).await
    }
}

/// Only text that is exactly a JSON number goes out as one; surrounding
/// whitespace keeps it a string.
fn coordinate(raw: &str) -> Coordinate<'_> {
    if raw.trim() == raw && serde_json::from_str::<serde_json::Number>(raw).is_ok() {
        if let Ok(number) = RawValue::from_string(raw.to_string()) {
            return Coordinate::Number(number);
        }
    }
    Coordinate::Text(raw)
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(error.to_string())
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn config_for(server: &MockServer, timeout: Duration) -> DadataConfig {
        DadataConfig {
            base_url: format!("{}/", server.uri()),
            api_key: SecretString::from("test-api-key".to_string()),
            secret_key: SecretString::from("test-secret-key".to_string()),
            suggestion_count: 5,
            timeout,
        }
    }

    fn client_for(server: &MockServer) -> DadataClient {
        DadataClient::new(&config_for(server, Duration::from_secs(5))).unwrap()
    }

    fn lenina_suggestions() -> serde_json::Value {
        json!({
            "suggestions": [
                {
                    "value": "г Москва, ул Ленина, д 10",
                    "unrestricted_value": "127000, г Москва, ул Ленина, д 10",
                    "data": {
                        "city": "Москва",
                        "street": "Ленина",
                        "house": "10",
                        "geo_lat": "55.7558",
                        "geo_lon": "37.6173"
                    }
                },
                {
                    "value": "Московская обл, поселок Ленина",
                    "data": {
                        "city": null,
                        "settlement": "Ленина",
                        "street": null,
                        "house": null,
                        "geo_lat": "55.80010",
                        "geo_lon": "37.90"
                    }
                }
            ]
        })
    }

    #[tokio::test]
    async fn search_sends_credentials_and_maps_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest/address"))
            .and(header("Authorization", "Token test-api-key"))
            .and(header("X-Secret", "test-secret-key"))
            .and(body_json(json!({ "query": "Москва Ленина", "count": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(lenina_suggestions()))
            .expect(1)
            .mount(&server)
            .await;

        let addresses = client_for(&server).search("Москва Ленина").await.unwrap();

        assert_eq!(
            addresses,
            vec![
                Address {
                    city: "Москва".into(),
                    street: "Ленина".into(),
                    house: "10".into(),
                    lat: "55.7558".into(),
                    lon: "37.6173".into(),
                },
                Address {
                    city: "Ленина".into(),
                    street: String::new(),
                    house: String::new(),
                    lat: "55.80010".into(),
                    lon: "37.90".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn reverse_sends_numeric_coordinates_as_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/geolocate/address"))
            .and(body_json(json!({ "lat": 55.7558, "lon": 37.6173, "count": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "suggestions": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let addresses = client_for(&server).reverse("55.7558", "37.6173").await.unwrap();
        assert!(addresses.is_empty());
    }

    #[tokio::test]
    async fn reverse_passes_non_numeric_coordinates_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/geolocate/address"))
            .and(body_json(json!({ "lat": "", "lon": "east", "count": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "suggestions": null })))
            .expect(1)
            .mount(&server)
            .await;

        let addresses = client_for(&server).reverse("", "east").await.unwrap();
        assert!(addresses.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest/address"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Daily request limit exceeded"))
            .mount(&server)
            .await;

        let result = client_for(&server).search("Москва").await;
        match result {
            Err(ProviderError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "Daily request limit exceeded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest/address"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).search("Москва").await;
        assert!(matches!(result, Err(ProviderError::Decode(_))));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest/address"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "suggestions": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = DadataClient::new(&config_for(&server, Duration::from_millis(100))).unwrap();
        let result = client.search("Москва").await;
        assert!(matches!(result, Err(ProviderError::Timeout)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let config = DadataConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: SecretString::from("k".to_string()),
            secret_key: SecretString::from("s".to_string()),
            suggestion_count: 1,
            timeout: Duration::from_secs(2),
        };

        let result = DadataClient::new(&config).unwrap().search("x").await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }

    #[test]
    fn coordinate_keeps_number_text() {
        let encoded = serde_json::to_string(&coordinate("55.75580")).unwrap();
        assert_eq!(encoded, "55.75580");

        let encoded = serde_json::to_string(&coordinate("55,7558")).unwrap();
        assert_eq!(encoded, r#""55,7558""#);
    }

    #[test]
    fn coordinate_with_whitespace_stays_text() {
        let encoded = serde_json::to_string(&coordinate(" 55.7558 ")).unwrap();
        assert_eq!(encoded, r#"" 55.7558 ""#);
    }

    #[test]
    fn truncate_limits_error_body() {
        let long = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
        assert_eq!(truncate(&long).len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = DadataClient {
            base_url: "https://suggestions.dadata.ru/suggestions/api/4_1/rs/".to_string(),
            api_key: SecretString::from("k".to_string()),
            secret_key: SecretString::from("s".to_string()),
            suggestion_count: 10,
            http: Client::new(),
        };
        assert_eq!(
            client.endpoint(SUGGEST_PATH),
            "https://suggestions.dadata.ru/suggestions/api/4_1/rs/suggest/address"
        );
    }
}
