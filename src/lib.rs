//! `Pawcast` - dog walk safety advisor
//!
//! Combines live weather with a pet-specific risk model to tell an owner
//! whether a walk is safe right now, what the pavement feels like, and when
//! the best walk window falls on each forecast day.

pub mod advisory;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod safety;
pub mod units;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisory::{AdvisoryRequest, AdvisoryService, ForecastAdvisory, ForecastRequest, HomeAdvisory};
pub use cache::PersistentCache;
pub use config::PawcastConfig;
pub use error::PawcastError;
pub use geocoding::{Geocoder, GeocodingClient};
pub use location_resolver::{LocationInput, LocationParser, LocationResolver};
pub use models::{Forecast, ForecastDay, HourSample, Location, PetAttribute, PetProfile, PetSize, WeatherReading};
pub use units::TemperatureUnit;
pub use weather::{WeatherApiClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PawcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
