//! Configuration management for the CEP weather service
//!
//! Handles loading configuration from an optional file and environment
//! variables and validates the result. Environment variables are read
//! without a prefix (`PORT`, `WEATHER_API`, ...) and map onto the
//! lower-cased field names.

use crate::CepWeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cep-weather.toml";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Weather API key. Not required at startup, only when a temperature
    /// is actually requested.
    #[serde(default)]
    pub weather_api: Option<String>,
    /// Base URL of the postal directory (ViaCEP)
    #[serde(default = "default_postal_base_url")]
    pub postal_base_url: String,
    /// Base URL of the geocoder (Nominatim)
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL of the weather provider (WeatherAPI)
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Log level or `EnvFilter` directives, e.g. `info` or `cep_weather=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// OTLP/HTTP traces endpoint, e.g. `http://localhost:4318/v1/traces`.
    /// Span export is disabled when unset.
    #[serde(default)]
    pub otel_endpoint: Option<String>,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_postal_base_url() -> String {
    "https://viacep.com.br".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            weather_api: None,
            postal_base_url: default_postal_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            weather_base_url: default_weather_base_url(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            otel_endpoint: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(Environment::default());

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        Self::from_settings(settings)
    }

    /// Deserialize, normalize and validate already-merged settings
    pub fn from_settings(settings: Config) -> Result<Self> {
        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Treat empty strings as missing values
    pub fn apply_defaults(&mut self) {
        if self.weather_api.as_deref().is_some_and(str::is_empty) {
            self.weather_api = None;
        }
        if self.otel_endpoint.as_deref().is_some_and(str::is_empty) {
            self.otel_endpoint = None;
        }
        if self.postal_base_url.is_empty() {
            self.postal_base_url = default_postal_base_url();
        }
        if self.geocoding_base_url.is_empty() {
            self.geocoding_base_url = default_geocoding_base_url();
        }
        if self.weather_base_url.is_empty() {
            self.weather_base_url = default_weather_base_url();
        }
        if self.log_level.is_empty() {
            self.log_level = default_log_level();
        }
        if self.log_format.is_empty() {
            self.log_format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(CepWeatherError::config("Port must be between 1 and 65535").into());
        }

        for (name, url) in [
            ("Postal directory", &self.postal_base_url),
            ("Geocoding", &self.geocoding_base_url),
            ("Weather", &self.weather_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CepWeatherError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        // Same parser the subscriber uses, so directives like `cep_weather=debug` pass
        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            return Err(CepWeatherError::config(format!(
                "Invalid log level '{}': {e}",
                self.log_level
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.log_format.as_str()) {
            return Err(CepWeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.log_format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
