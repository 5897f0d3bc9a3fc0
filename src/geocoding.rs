//! Forward geocoding of a city/state pair via a Nominatim-compatible API

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::models::Coordinates;
use crate::{CepWeatherError, Result};

/// Search hit. Nominatim reports coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Client for the geocoding search endpoint
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Look up the coordinates of a `"<city>,<state>"` location in Brazil.
    ///
    /// Only the first candidate is used. An empty candidate list is
    /// `NotFound`, unparsable coordinates are `Parse`.
    #[instrument(skip(self))]
    pub async fn resolve_coordinates(&self, location: &str) -> Result<Coordinates> {
        let url = format!(
            "{}/search?q={},Brazil&format=json&limit=1",
            self.base_url,
            urlencoding::encode(location)
        );
        debug!("Querying geocoder: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                error!("Geocoding request failed: {}", e);
                CepWeatherError::from(e)
            })?;

        let candidates: Vec<NominatimResult> = response.json().await.map_err(|e| {
            error!("Failed to decode geocoding response: {}", e);
            CepWeatherError::upstream(format!("invalid geocoding response: {e}"))
        })?;

        let Some(first) = candidates.into_iter().next() else {
            warn!("No coordinates found for '{}'", location);
            return Err(CepWeatherError::not_found(format!(
                "no coordinates found for {location}"
            )));
        };

        let latitude = parse_degrees("latitude", &first.lat)?;
        let longitude = parse_degrees("longitude", &first.lon)?;
        let coordinates = Coordinates::new(latitude, longitude);

        info!("Geocoded '{}' to {}", location, coordinates);
        Ok(coordinates)
    }
}

fn parse_degrees(field: &str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|e| {
        error!("Invalid {} '{}': {}", field, value, e);
        CepWeatherError::parse(format!("invalid {field} '{value}': {e}"))
    })
}
