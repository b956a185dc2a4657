//! OpenCage geocoding client

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{GeocodingConfig, WeatherConfig};
use crate::http;
use crate::models::Location;
use crate::{PawcastError, Result};

/// Shown when a lookup yields neither a place nor a country
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// Forward and reverse place lookups
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for a postal code or place name, `None` when nothing matches
    async fn forward(&self, query: &str) -> Result<Option<Location>>;

    /// Display name for a coordinate pair
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String>;
}

/// Address components returned by OpenCage
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Components {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country_code: Option<String>,
}

impl Components {
    /// `City, CC`, either part alone, or [`LOCATION_UNAVAILABLE`]
    #[must_use]
    pub fn display_name(&self) -> String {
        let place = [&self.city, &self.town, &self.village, &self.state]
            .into_iter()
            .flatten()
            .find(|part| !part.is_empty());
        let country = self
            .country_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(str::to_uppercase);

        match (place, country) {
            (Some(place), Some(country)) => format!("{place}, {country}"),
            (Some(place), None) => place.clone(),
            (None, Some(country)) => country,
            (None, None) => LOCATION_UNAVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    #[serde(default)]
    components: Components,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl GeocodeResult {
    fn into_location(self) -> Location {
        Location::new(self.geometry.lat, self.geometry.lng, self.components.display_name())
    }
}

/// Parse an OpenCage response into its first location, if any
pub fn parse_first_location(body: &str) -> Result<Option<Location>> {
    let response: GeocodeResponse = http::decode(body, "geocoding")?;
    Ok(response
        .results
        .into_iter()
        .next()
        .map(GeocodeResult::into_location))
}

/// HTTP client for the OpenCage geocoding API
pub struct GeocodingClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl GeocodingClient {
    /// Create a client; timeouts and retries are shared with the weather section
    pub fn new(config: &GeocodingConfig, http_config: &WeatherConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PawcastError::config(
                    "Missing geocoding API key. Set geocoding.api_key or PAWCAST_GEOCODING__API_KEY.",
                )
            })?;

        Ok(Self {
            client: http::build_client(http_config.timeout_seconds, http_config.max_retries)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, query: &str) -> String {
        format!(
            "{}/json?q={}&key={}&limit=1&no_annotations=1",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn lookup(&self, query: &str) -> Result<Option<Location>> {
        let reply = http::get_text(&self.client, &self.url(query)).await?;
        if !reply.is_success() {
            warn!("Geocoding API returned HTTP {}", reply.status);
            return Err(PawcastError::api(format!(
                "Geocoding failed with HTTP {}",
                reply.status
            )));
        }
        parse_first_location(&reply.body)
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    #[instrument(skip(self))]
    async fn forward(&self, query: &str) -> Result<Option<Location>> {
        let location = self.lookup(query.trim()).await?;
        match &location {
            Some(found) => info!(
                "Geocoded '{}' to {} ({:.4}, {:.4})",
                query, found.name, found.latitude, found.longitude
            ),
            None => debug!("No geocoding results for '{}'", query),
        }
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String> {
        let query = format!("{latitude},{longitude}");
        let name = self
            .lookup(&query)
            .await?
            .map_or_else(|| LOCATION_UNAVAILABLE.to_string(), |location| location.name);
        debug!("Reverse geocoded to {}", name);
        Ok(name)
    }
}
