//! Location Resolution Module
//!
//! Parses free-form location input (coordinates, postal codes, place names)
//! and resolves it into a [`Location`] through a [`Geocoder`].

use anyhow::Context;
use tracing::debug;

use crate::geocoding::{Geocoder, LOCATION_UNAVAILABLE};
use crate::models::Location;
use crate::{PawcastError, Result};

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Coordinates (latitude, longitude)
    Coordinates(f64, f64),
    /// Location name (city, region, etc.)
    Name(String),
    /// Postal code
    PostalCode(String),
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input. Blank input is rejected.
    pub fn parse(input: &str) -> Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PawcastError::validation("Please enter a postal code."));
        }

        if let Ok((lat, lon)) = Self::parse_coordinates(input) {
            return Ok(LocationInput::Coordinates(lat, lon));
        }

        if Self::is_postal_code(input) {
            return Ok(LocationInput::PostalCode(input.to_string()));
        }

        Ok(LocationInput::Name(input.to_string()))
    }

    /// Parse coordinates from "45.52,-122.68" or "45.52 -122.68"
    fn parse_coordinates(input: &str) -> anyhow::Result<(f64, f64)> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let [lat, lon] = parts.as_slice() else {
            return Err(PawcastError::validation("Coordinates must be in format 'lat,lon'").into());
        };

        let lat = lat
            .parse::<f64>()
            .with_context(|| format!("Invalid latitude: {lat}"))?;
        let lon = lon
            .parse::<f64>()
            .with_context(|| format!("Invalid longitude: {lon}"))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(PawcastError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            ))
            .into());
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(PawcastError::validation(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            ))
            .into());
        }

        Ok((lat, lon))
    }

    /// Digits-only codes of 4 to 6 or 9 digits (ZIP, ZIP+4), or a short alphanumeric
    /// code containing at least one digit (e.g. `SW1A 1AA`, `CH-8001`, `M5V 2T6`)
    fn is_postal_code(input: &str) -> bool {
        let normalized: String = input.chars().filter(|c| *c != ' ' && *c != '-').collect();

        if normalized.chars().all(|c| c.is_ascii_digit()) {
            return matches!(normalized.len(), 4..=6 | 9);
        }

        (4..=10).contains(&normalized.len())
            && normalized.chars().all(|c| c.is_ascii_alphanumeric())
            && normalized.chars().any(|c| c.is_ascii_digit())
    }
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Parse and resolve free-form input
    pub async fn resolve_str(geocoder: &dyn Geocoder, input: &str) -> Result<Location> {
        Self::resolve(geocoder, LocationParser::parse(input)?).await
    }

    /// Resolve a parsed location input into a structured Location
    pub async fn resolve(geocoder: &dyn Geocoder, input: LocationInput) -> Result<Location> {
        debug!("Resolving location input: {:?}", input);

        let location = match input {
            LocationInput::Coordinates(lat, lon) => Self::resolve_coordinates(geocoder, lat, lon).await,
            LocationInput::Name(query) | LocationInput::PostalCode(query) => {
                geocoder
                    .forward(&query)
                    .await?
                    .ok_or_else(|| PawcastError::location_not_found(query))?
            }
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );
        Ok(location)
    }

    /// Name coordinates via reverse geocoding, falling back to the coordinates themselves
    async fn resolve_coordinates(geocoder: &dyn Geocoder, lat: f64, lon: f64) -> Location {
        match geocoder.reverse(lat, lon).await {
            Ok(name) if name != LOCATION_UNAVAILABLE => Location::new(lat, lon, name),
            Ok(_) => {
                debug!("Reverse geocoding found no name, using coordinates");
                Location::from_coordinates(lat, lon)
            }
            Err(e) => {
                debug!("Reverse geocoding failed: {}, using coordinates as name", e);
                Location::from_coordinates(lat, lon)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rstest::rstest;

    struct StubGeocoder {
        reverse_name: Option<&'static str>,
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn forward(&self, query: &str) -> Result<Option<Location>> {
            Ok((query == "97205").then(|| Location::new(45.52, -122.68, "Portland, US".to_string())))
        }

        async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<String> {
            self.reverse_name
                .map(String::from)
                .ok_or_else(|| PawcastError::api("offline"))
        }
    }

    #[rstest]
    #[case("46.8182,8.2275", LocationInput::Coordinates(46.8182, 8.2275))]
    #[case("46.8182 8.2275", LocationInput::Coordinates(46.8182, 8.2275))]
    #[case("-46.8182, -8.2275", LocationInput::Coordinates(-46.8182, -8.2275))]
    #[case("97205", LocationInput::PostalCode("97205".to_string()))]
    #[case("8001", LocationInput::PostalCode("8001".to_string()))]
    #[case("110001", LocationInput::PostalCode("110001".to_string()))]
    #[case("97205-1234", LocationInput::PostalCode("97205-1234".to_string()))]
    #[case("1234567", LocationInput::Name("1234567".to_string()))]
    #[case("SW1A 1AA", LocationInput::PostalCode("SW1A 1AA".to_string()))]
    #[case("CH-8001", LocationInput::PostalCode("CH-8001".to_string()))]
    #[case("Interlaken", LocationInput::Name("Interlaken".to_string()))]
    #[case("New York City", LocationInput::Name("New York City".to_string()))]
    #[case("91.0,8.0", LocationInput::Name("91.0,8.0".to_string()))]
    fn test_location_parser(#[case] input: &str, #[case] expected: LocationInput) {
        assert_eq!(LocationParser::parse(input).unwrap(), expected);
    }

    #[test]
    fn test_blank_input_rejected() {
        let err = LocationParser::parse("   ").unwrap_err();
        assert_eq!(err.user_message(), "Please enter a postal code.");
    }

    #[tokio::test]
    async fn test_resolve_postal_code() {
        let geocoder = StubGeocoder { reverse_name: None };
        let location = LocationResolver::resolve_str(&geocoder, "97205").await.unwrap();
        assert_eq!(location.name, "Portland, US");

        let err = LocationResolver::resolve_str(&geocoder, "00000").await.unwrap_err();
        assert_eq!(err.user_message(), "Location not found for that postal code.");
    }

    #[rstest]
    #[case(Some("Zurich, CH"), "Zurich, CH")]
    #[case(Some("Location unavailable"), "46.8182, 8.2275")]
    #[case(None, "46.8182, 8.2275")]
    #[tokio::test]
    async fn test_resolve_coordinates(#[case] reverse_name: Option<&'static str>, #[case] expected: &str) {
        let geocoder = StubGeocoder { reverse_name };
        let location = LocationResolver::resolve_str(&geocoder, "46.8182,8.2275")
            .await
            .unwrap();
        assert_eq!(location.name, expected);
        assert!((location.latitude - 46.8182).abs() < f64::EPSILON);
    }
}
