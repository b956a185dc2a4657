//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name, e.g. `Portland, US`
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
        }
    }

    /// Location named after its own coordinates
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        let name = format!("{latitude:.4}, {longitude:.4}");
        Self::new(latitude, longitude, name)
    }

    /// Query string understood by the weather provider
    #[must_use]
    pub fn query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Cache key for the forecast of this location
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("forecast_{}", self.name)
    }
}
