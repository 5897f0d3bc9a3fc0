//! Current-weather client for a WeatherAPI-compatible provider
//!
//! The API key is handed in at construction time. A fetcher without a key
//! is still usable: every call fails with a configuration error and never
//! reaches the network.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::models::Coordinates;
use crate::{CepWeatherError, Result};

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    location: Option<WeatherLocation>,
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct WeatherLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

/// Client for the current-weather endpoint
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherFetcher {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Fetch the current temperature in Celsius at the given coordinates.
    ///
    /// The value is passed through as reported, without plausibility checks.
    #[instrument(skip(self))]
    pub async fn fetch_temperature_by_coordinates(&self, coordinates: Coordinates) -> Result<f64> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("WEATHER_API credential not configured");
            return Err(CepWeatherError::config(
                "weather API credential not set (WEATHER_API)",
            ));
        };

        let query = coordinates.to_query();
        debug!(
            "Querying weather provider: {}/current.json?key=***&q={}&aqi=no",
            self.base_url, query
        );
        let url = format!(
            "{}/current.json?key={}&q={}&aqi=no",
            self.base_url,
            urlencoding::encode(api_key),
            query
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                let err = CepWeatherError::from(e);
                error!("Weather request failed: {}", err);
                err
            })?;

        let body: WeatherResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to decode weather response: {}", e);
            CepWeatherError::upstream(format!("invalid weather response: {e}"))
        })?;

        let reported = body.location.map(|l| l.name).unwrap_or_default();
        info!(
            "Weather provider reported {:.1}°C for '{}' at {}",
            body.current.temp_c, reported, coordinates
        );

        Ok(body.current.temp_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_temperature_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "-23.550500,-46.633300"))
            .and(query_param("aqi", "no"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "location": {"name": "Sao Paulo"},
                "current": {"temp_c": 22.5, "temp_f": 72.5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = WeatherFetcher::new(Client::new(), server.uri(), Some("test-key".into()));
        let celsius = fetcher
            .fetch_temperature_by_coordinates(Coordinates::new(-23.5505, -46.6333))
            .await
            .unwrap();

        assert_eq!(celsius, 22.5);
    }

    #[tokio::test]
    async fn test_fetch_temperature_passes_implausible_values_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"current": {"temp_c": -300.0}})),
            )
            .mount(&server)
            .await;

        let fetcher = WeatherFetcher::new(Client::new(), server.uri(), Some("test-key".into()));
        let celsius = fetcher
            .fetch_temperature_by_coordinates(Coordinates::default())
            .await
            .unwrap();

        assert_eq!(celsius, -300.0);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        for key in [None, Some(String::new())] {
            let fetcher = WeatherFetcher::new(Client::new(), server.uri(), key);
            let err = fetcher
                .fetch_temperature_by_coordinates(Coordinates::default())
                .await
                .unwrap_err();

            assert!(matches!(err, CepWeatherError::Config { .. }));
            assert!(err.to_string().contains("credential not set"));
        }
    }

    #[tokio::test]
    async fn test_rejected_key_is_upstream_without_leaking_it() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"code": 2006, "message": "API key is invalid."}
            })))
            .mount(&server)
            .await;

        let fetcher = WeatherFetcher::new(Client::new(), server.uri(), Some("secret-key".into()));
        let err = fetcher
            .fetch_temperature_by_coordinates(Coordinates::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CepWeatherError::Upstream { .. }));
        assert!(!err.to_string().contains("secret-key"));
    }
}
