//! Postal code to temperature lookup
//!
//! Runs the upstream calls strictly in sequence:
//! validate → resolve location → geocode → fetch weather → convert.
//! Every stage except geocoding short-circuits on failure.

use reqwest::Client;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::geocoding::Geocoder;
use crate::location_resolver::LocationResolver;
use crate::models::{Coordinates, PostalCode, TemperatureResponse};
use crate::weather::WeatherFetcher;
use crate::{CepWeatherError, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Failure of a lookup, tagged with the stage it happened in
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The postal code does not have eight digits
    #[error("invalid zipcode")]
    InvalidCep(#[source] CepWeatherError),

    /// The postal directory did not resolve the code, for any reason
    #[error("can not find zipcode")]
    LocationNotFound(#[source] CepWeatherError),

    /// The weather provider could not be queried or is not configured
    #[error("error getting temperature, {0}")]
    Temperature(#[source] CepWeatherError),
}

/// The three upstream clients wired together. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TemperatureLookup {
    locations: LocationResolver,
    geocoder: Geocoder,
    weather: WeatherFetcher,
}

impl TemperatureLookup {
    pub fn new(locations: LocationResolver, geocoder: Geocoder, weather: WeatherFetcher) -> Self {
        Self {
            locations,
            geocoder,
            weather,
        }
    }

    /// Build all clients from configuration, sharing one HTTP connection pool
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CepWeatherError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::new(
            LocationResolver::new(client.clone(), &config.postal_base_url),
            Geocoder::new(client.clone(), &config.geocoding_base_url),
            WeatherFetcher::new(client, &config.weather_base_url, config.weather_api.clone()),
        ))
    }

    /// Resolve a raw postal code to the current temperature
    #[instrument(skip(self))]
    pub async fn lookup(&self, raw_cep: &str) -> std::result::Result<TemperatureResponse, LookupError> {
        info!("Looking up temperature for postal code '{}'", raw_cep);

        let cep = PostalCode::parse(raw_cep).map_err(|e| {
            info!("Rejected postal code '{}'", raw_cep);
            LookupError::InvalidCep(e)
        })?;

        let location = self.locations.resolve_location(&cep).await.map_err(|e| {
            warn!("Could not resolve postal code {}: {}", cep, e);
            LookupError::LocationNotFound(e)
        })?;

        let query = location.to_string();
        let coordinates = match self.geocoder.resolve_coordinates(&query).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                // Not fatal: the weather call still goes out with (0, 0).
                warn!(
                    "Geocoding failed for {}: {}; continuing with {}",
                    query,
                    e,
                    Coordinates::default()
                );
                Coordinates::default()
            }
        };

        let celsius = self
            .weather
            .fetch_temperature_by_coordinates(coordinates)
            .await
            .map_err(|e| {
                warn!("Could not get temperature for {}: {}", query, e);
                LookupError::Temperature(e)
            })?;

        let response = TemperatureResponse::from_celsius(celsius);
        info!(
            "Temperature for {}: {:.1}°C / {:.1}°F / {:.1}K",
            query, response.celsius, response.fahrenheit, response.kelvin
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lookup_against(server: &MockServer, api_key: Option<&str>) -> TemperatureLookup {
        let config = AppConfig {
            weather_api: api_key.map(str::to_string),
            postal_base_url: server.uri(),
            geocoding_base_url: server.uri(),
            weather_base_url: server.uri(),
            ..AppConfig::default()
        };
        TemperatureLookup::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_cep_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = lookup_against(&server, Some("key"))
            .lookup("123")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::InvalidCep(_)));
        assert_eq!(err.to_string(), "invalid zipcode");
    }

    #[tokio::test]
    async fn test_directory_outage_collapses_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = lookup_against(&server, Some("key"))
            .lookup("01310100")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LookupError::LocationNotFound(CepWeatherError::Upstream { .. })
        ));
        assert_eq!(err.to_string(), "can not find zipcode");
    }

    #[tokio::test]
    async fn test_missing_credential_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localidade": "São Paulo", "uf": "SP"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"lat": "-23.55", "lon": "-46.63"}])),
            )
            .mount(&server)
            .await;

        let err = lookup_against(&server, None)
            .lookup("01310-100")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Temperature(CepWeatherError::Config { .. })));
        assert!(err.to_string().starts_with("error getting temperature, "));
        assert!(err.to_string().contains("credential not set"));
    }
}
