//! Data models for the CEP weather service
//!
//! All of them live for a single request:
//! - Cep: postal code validation and normalization
//! - Location: city/state pair and coordinates
//! - Temperature: unit conversion and the response payload

pub mod cep;
pub mod location;
pub mod temperature;

// Re-export all public types for convenient access
pub use cep::{PostalCode, is_valid_cep, normalize_cep};
pub use location::{Coordinates, Location};
pub use temperature::{TemperatureResponse, celsius_to_fahrenheit, celsius_to_kelvin};
