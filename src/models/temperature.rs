//! Temperature unit conversion and the response payload

use serde::{Deserialize, Serialize};

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Convert Celsius to Kelvin.
///
/// Uses the integer offset 273, not 273.15. Clients depend on these values.
#[must_use]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.0
}

/// Temperature in the three units returned to the caller
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TemperatureResponse {
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl TemperatureResponse {
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
            kelvin: celsius_to_kelvin(celsius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 32.0, 273.0)]
    #[case(100.0, 212.0, 373.0)]
    #[case(-40.0, -40.0, 233.0)]
    #[case(25.0, 77.0, 298.0)]
    fn test_conversions(#[case] celsius: f64, #[case] fahrenheit: f64, #[case] kelvin: f64) {
        assert_eq!(celsius_to_fahrenheit(celsius), fahrenheit);
        assert_eq!(celsius_to_kelvin(celsius), kelvin);
    }

    #[test]
    fn test_response_field_names() {
        let response = TemperatureResponse::from_celsius(0.0);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"temp_C": 0.0, "temp_F": 32.0, "temp_K": 273.0})
        );
    }

    #[test]
    fn test_response_preserves_celsius() {
        let response = TemperatureResponse::from_celsius(21.7);
        assert_eq!(response.celsius, 21.7);
        assert_eq!(response.fahrenheit, 21.7 * 1.8 + 32.0);
        assert_eq!(response.kelvin, 21.7 + 273.0);
    }
}
