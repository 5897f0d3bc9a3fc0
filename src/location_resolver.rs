//! Location Resolution Module
//!
//! Resolves a validated postal code into a city/state pair using a
//! ViaCEP-compatible postal directory.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::models::{Location, PostalCode};
use crate::{CepWeatherError, Result};

/// Postal directory response. Only the fields we read are declared.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ViaCepResponse {
    cep: String,
    bairro: String,
    localidade: String,
    uf: String,
    erro: Option<NotFoundFlag>,
}

/// The directory sends `"erro": "true"`; older deployments sent a boolean.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotFoundFlag {
    Bool(bool),
    Text(String),
}

impl NotFoundFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

/// Client for the postal directory
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    base_url: String,
}

impl LocationResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a postal code into the city and state it belongs to.
    ///
    /// Returns `NotFound` when the directory flags the code as unknown and
    /// `Upstream` for any transport or decoding failure.
    #[instrument(skip_all, fields(cep = %cep))]
    pub async fn resolve_location(&self, cep: &PostalCode) -> Result<Location> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep.as_str());
        debug!("Querying postal directory: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                error!("Postal directory request failed: {}", e);
                CepWeatherError::from(e)
            })?;

        let body: ViaCepResponse = response.json().await.map_err(|e| {
            error!("Failed to decode postal directory response: {}", e);
            CepWeatherError::upstream(format!("invalid postal directory response: {e}"))
        })?;

        if body.erro.as_ref().is_some_and(NotFoundFlag::is_set) {
            info!("Postal code {} not found in directory", cep);
            return Err(CepWeatherError::not_found(format!("postal code {cep} not found")));
        }

        debug!("Directory entry {} ({})", body.cep, body.bairro);
        let location = Location::new(body.localidade, body.uf);
        info!("Resolved postal code {} to {}", cep, location);

        Ok(location)
    }
}
