//! Data models for the pawcast application
//!
//! This module contains the domain models organized by concern:
//! - Pet: owner-supplied profile of the dog
//! - Weather: current conditions as reported by the provider
//! - Forecast: per-day summaries with hourly samples
//! - Location: geographic coordinates and display name

pub mod forecast;
pub mod location;
pub mod pet;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DayIcon, Forecast, ForecastDay, HourSample};
pub use location::Location;
pub use pet::{PetAttribute, PetProfile, PetSize};
pub use weather::WeatherReading;
