//! Location model: the city/state pair and its geographic coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

/// City and state abbreviation resolved from a postal code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Location {
    /// City name (`localidade` in the postal directory)
    pub city: String,
    /// Two-letter state abbreviation (`uf`)
    pub state: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }
}

/// Renders as `"<city>,<state>"`, the form the geocoder is queried with
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.city, self.state)
    }
}

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the `lat,lon` query understood by the weather service
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let location = Location::new("São Paulo", "SP");
        assert_eq!(location.to_string(), "São Paulo,SP");
    }

    #[test]
    fn test_coordinates_query() {
        let coordinates = Coordinates::new(-23.5505, -46.6333);
        assert_eq!(coordinates.to_query(), "-23.550500,-46.633300");
        assert_eq!(Coordinates::default().to_query(), "0.000000,0.000000");
    }
}
