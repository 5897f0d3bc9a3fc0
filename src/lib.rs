//! `cep-weather` - current temperature for a Brazilian postal code
//!
//! This library resolves a CEP to a city, geocodes the city, asks a weather
//! provider for the current temperature and serves the result over HTTP in
//! Celsius, Fahrenheit and Kelvin.

pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod lookup;
pub mod models;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::CepWeatherError;
pub use geocoding::Geocoder;
pub use location_resolver::LocationResolver;
pub use lookup::{LookupError, TemperatureLookup};
pub use models::{Coordinates, Location, PostalCode, TemperatureResponse};
pub use weather::WeatherFetcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CepWeatherError>;
