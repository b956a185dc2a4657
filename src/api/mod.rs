//! JSON HTTP API over the advisory service

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::advisory::{AdvisoryRequest, AdvisoryService, ForecastAdvisory, ForecastRequest, HomeAdvisory};
use crate::geocoding::Geocoder;
use crate::models::{PetAttribute, PetProfile, PetSize};
use crate::units::TemperatureUnit;
use crate::weather::WeatherProvider;
use crate::{PawcastError, VERSION};

/// Query parameters shared by the advisory endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdvisoryQuery {
    pub location: Option<String>,
    pub unit: Option<String>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub obese: bool,
    pub brachycephalic: bool,
    pub senior: bool,
    pub northern_breed: bool,
    pub cold_acclimated: bool,
    pub shade: Option<bool>,
    /// Debug temperature in °F
    pub temp_override: Option<f64>,
    /// Debug day/night flag
    pub is_day: Option<bool>,
}

impl AdvisoryQuery {
    fn unit(&self) -> Result<Option<TemperatureUnit>, PawcastError> {
        self.unit.as_deref().map(str::parse::<TemperatureUnit>).transpose()
    }

    fn pet(&self) -> Result<PetProfile, PawcastError> {
        let size = self
            .size
            .as_deref()
            .map(str::parse::<PetSize>)
            .transpose()?
            .unwrap_or_default();

        let mut pet = PetProfile::new(size)
            .with(PetAttribute::Obese, self.obese)
            .with(PetAttribute::Brachycephalic, self.brachycephalic)
            .with(PetAttribute::Senior, self.senior)
            .with(PetAttribute::NorthernBreed, self.northern_breed)
            .with(PetAttribute::ColdAcclimated, self.cold_acclimated);
        if let Some(name) = &self.name {
            pet.name.clone_from(name);
        }
        Ok(pet)
    }

    /// Convert into a home advisory request
    pub fn into_advisory_request(self) -> Result<AdvisoryRequest, PawcastError> {
        Ok(AdvisoryRequest {
            unit: self.unit()?,
            pet: self.pet()?,
            shade: self.shade,
            temp_override_f: self.temp_override,
            is_day_override: self.is_day,
            location: self.location,
        })
    }

    /// Convert into a forecast request; pet fields are ignored
    pub fn into_forecast_request(self) -> Result<ForecastRequest, PawcastError> {
        Ok(ForecastRequest {
            unit: self.unit()?,
            location: self.location,
        })
    }
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// [`PawcastError`] rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub PawcastError);

impl From<PawcastError> for ApiError {
    fn from(err: PawcastError) -> Self {
        Self(err)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PawcastError::Validation { .. }
            | PawcastError::LocationNotFound { .. }
            | PawcastError::InvalidColorFormat { .. } => StatusCode::BAD_REQUEST,
            PawcastError::Api { .. } | PawcastError::ForecastUnavailable { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed with {}: {}", status, self.0);
        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

pub fn router<W, G>(service: Arc<AdvisoryService<W, G>>) -> Router
where
    W: WeatherProvider + 'static,
    G: Geocoder + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/advisory", get(advisory::<W, G>))
        .route("/forecast", get(forecast::<W, G>))
        .with_state(service)
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

pub async fn advisory<W: WeatherProvider, G: Geocoder>(
    State(service): State<Arc<AdvisoryService<W, G>>>,
    Query(query): Query<AdvisoryQuery>,
) -> Result<Json<HomeAdvisory>, ApiError> {
    let request = query.into_advisory_request()?;
    Ok(Json(service.home(&request).await?))
}

pub async fn forecast<W: WeatherProvider, G: Geocoder>(
    State(service): State<Arc<AdvisoryService<W, G>>>,
    Query(query): Query<AdvisoryQuery>,
) -> Result<Json<ForecastAdvisory>, ApiError> {
    let request = query.into_forecast_request()?;
    Ok(Json(service.forecast(&request).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;
    use crate::models::{Forecast, Location, WeatherReading};
    use async_trait::async_trait;

    struct FixedWeather;

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current(&self, _latitude: f64, _longitude: f64) -> crate::Result<WeatherReading> {
            Ok(WeatherReading::new(72.0, 72.0, true, "Sunny"))
        }

        async fn forecast(&self, _location: &Location, _days: u32) -> crate::Result<Forecast> {
            Err(PawcastError::forecast_unavailable("offline"))
        }
    }

    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn forward(&self, query: &str) -> crate::Result<Option<Location>> {
            Ok((query != "00000").then(|| Location::new(30.27, -97.74, "Austin, US".to_string())))
        }

        async fn reverse(&self, _latitude: f64, _longitude: f64) -> crate::Result<String> {
            Ok("Austin, US".to_string())
        }
    }

    fn service() -> Arc<AdvisoryService<FixedWeather, FixedGeocoder>> {
        Arc::new(AdvisoryService::new(
            FixedWeather,
            FixedGeocoder,
            DefaultsConfig::default(),
            7,
        ))
    }

    #[test]
    fn test_query_to_request() {
        let query = AdvisoryQuery {
            size: Some("small".to_string()),
            senior: true,
            unit: Some("C".to_string()),
            ..AdvisoryQuery::default()
        };
        let request = query.into_advisory_request().unwrap();
        assert_eq!(request.pet.size, PetSize::Small);
        assert!(request.pet.senior);
        assert_eq!(request.unit, Some(TemperatureUnit::Celsius));

        let bad = AdvisoryQuery {
            size: Some("huge".to_string()),
            ..AdvisoryQuery::default()
        };
        assert!(bad.into_advisory_request().is_err());
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ApiError(PawcastError::validation("Please enter a postal code.")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(PawcastError::forecast_unavailable("down")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(PawcastError::config("missing key")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_advisory_handler() {
        let query = AdvisoryQuery {
            location: Some("78701".to_string()),
            ..AdvisoryQuery::default()
        };
        let Json(advisory) = advisory(State(service()), Query(query)).await.unwrap();
        assert_eq!(advisory.location.name, "Austin, US");
        assert_eq!(advisory.risk.level.level, 2);
    }

    #[tokio::test]
    async fn test_handler_errors() {
        let query = AdvisoryQuery {
            location: Some("00000".to_string()),
            ..AdvisoryQuery::default()
        };
        let err = advisory(State(service()), Query(query)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = forecast(State(service()), Query(AdvisoryQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.0.user_message(),
            "Forecast unavailable. Please check your connection."
        );
    }

    #[tokio::test]
    async fn test_health() {
        let Json(health) = health().await;
        assert_eq!(health.status, "ok");
    }
}
