//! Weather provider client for weatherapi.com
//!
//! Fetches current conditions and multi-day forecasts and converts the
//! provider payloads into [`WeatherReading`] and [`Forecast`].

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::http::{self, HttpReply};
use crate::models::{Forecast, ForecastDay, HourSample, Location, WeatherReading};
use crate::{PawcastError, Result};

/// Error code weatherapi.com uses for an unknown `q` parameter
const NO_MATCHING_LOCATION: i64 = 1006;

/// Source of current conditions and forecasts
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a coordinate pair
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReading>;

    /// Daily forecast with hourly samples for `days` days
    async fn forecast(&self, location: &Location, days: u32) -> Result<Forecast>;
}

/// HTTP client for the weatherapi.com v1 API
pub struct WeatherApiClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a client from the weather configuration section
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PawcastError::config(
                    "Missing weather API key. Set weather.api_key or PAWCAST_WEATHER__API_KEY.",
                )
            })?;

        Ok(Self {
            client: http::build_client(config.timeout_seconds, config.max_retries)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, endpoint: &str, query: &str, extra: &str) -> String {
        format!(
            "{}/{}?key={}&q={}{}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            extra
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self))]
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReading> {
        info!("Getting current weather for {:.4}, {:.4}", latitude, longitude);
        let start = Instant::now();

        let query = format!("{latitude},{longitude}");
        let reply = http::get_text(&self.client, &self.url("current.json", &query, "")).await?;
        let reading = parse_current(&reply_body(reply, &query)?)?;

        info!(
            "Current weather retrieved in {:.3}s: {:.1}°F, {}",
            start.elapsed().as_secs_f64(),
            reading.temperature_f,
            reading.condition
        );
        Ok(reading)
    }

    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn forecast(&self, location: &Location, days: u32) -> Result<Forecast> {
        info!("Getting {}-day forecast", days);
        let start = Instant::now();

        let query = location.query();
        let extra = format!("&days={days}&aqi=no&alerts=no");
        let url = self.url("forecast.json", &query, &extra);

        let body = http::get_text(&self.client, &url)
            .await
            .and_then(|reply| reply_body(reply, &query))
            .map_err(|e| match e {
                PawcastError::LocationNotFound { .. } => e,
                other => PawcastError::forecast_unavailable(other.to_string()),
            })?;

        let forecast = parse_forecast(&body, location.clone())
            .map_err(|e| PawcastError::forecast_unavailable(e.to_string()))?;

        info!(
            "Forecast retrieved in {:.3}s ({} days)",
            start.elapsed().as_secs_f64(),
            forecast.days.len()
        );
        Ok(forecast)
    }
}

/// Unwrap a provider reply, mapping error payloads onto [`PawcastError`].
fn reply_body(reply: HttpReply, query: &str) -> Result<String> {
    if reply.is_success() {
        return Ok(reply.body);
    }

    let detail = serde_json::from_str::<weatherapi::ErrorResponse>(&reply.body).ok();
    if detail.as_ref().and_then(|err| err.error.code) == Some(NO_MATCHING_LOCATION) {
        warn!("Provider found no location for '{}'", query);
        return Err(PawcastError::location_not_found(query));
    }

    let message = detail
        .map(|err| err.error.message)
        .unwrap_or_else(|| "no error details".to_string());
    error!("Weather API returned HTTP {}: {}", reply.status, message);
    Err(PawcastError::api(format!("HTTP {}: {message}", reply.status)))
}

/// Parse a `current.json` payload
pub fn parse_current(body: &str) -> Result<WeatherReading> {
    let response: weatherapi::CurrentResponse = http::decode(body, "current weather")?;
    let current = response.current;
    let feels_like = current.feelslike_f.unwrap_or(f64::NAN);
    Ok(WeatherReading::new(
        current.temp_f,
        feels_like,
        current.is_day != 0,
        &current.condition.text,
    ))
}

/// Parse a `forecast.json` payload for `location`
pub fn parse_forecast(body: &str, location: Location) -> Result<Forecast> {
    let response: weatherapi::ForecastResponse = http::decode(body, "forecast")?;
    let days: Vec<ForecastDay> = response
        .forecast
        .forecastday
        .into_iter()
        .map(forecast_day)
        .collect();
    debug!("Parsed {} forecast days", days.len());
    Ok(Forecast::new(location, days))
}

fn forecast_day(entry: weatherapi::ForecastDayEntry) -> ForecastDay {
    let hours = entry
        .hour
        .into_iter()
        .map(|h| HourSample {
            time_epoch: h.time_epoch,
            ..HourSample::new(h.time, h.temp_c, h.temp_f)
        })
        .collect();

    ForecastDay {
        date: entry.date,
        max_temp_c: entry.day.maxtemp_c,
        max_temp_f: entry.day.maxtemp_f,
        min_temp_c: entry.day.mintemp_c,
        min_temp_f: entry.day.mintemp_f,
        condition: entry.day.condition.text,
        hours,
    }
}

/// weatherapi.com response structures
mod weatherapi {
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub current: Current,
    }

    #[derive(Debug, Deserialize)]
    pub struct Current {
        pub temp_f: f64,
        pub feelslike_f: Option<f64>,
        /// 1 in daylight, 0 at night
        pub is_day: u8,
        pub condition: Condition,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub forecast: ForecastBody,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastBody {
        pub forecastday: Vec<ForecastDayEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastDayEntry {
        pub date: NaiveDate,
        pub day: DaySummary,
        #[serde(default)]
        pub hour: Vec<HourEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DaySummary {
        pub maxtemp_c: f64,
        pub maxtemp_f: f64,
        pub mintemp_c: f64,
        pub mintemp_f: f64,
        pub condition: Condition,
    }

    #[derive(Debug, Deserialize)]
    pub struct HourEntry {
        pub time: String,
        pub time_epoch: Option<i64>,
        pub temp_c: f64,
        pub temp_f: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub error: ErrorBody,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub code: Option<i64>,
        pub message: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherConfig;

    const CURRENT: &str = r#"{
        "location": {"name": "Austin", "region": "Texas"},
        "current": {
            "temp_f": 91.4,
            "feelslike_f": 97.2,
            "is_day": 1,
            "condition": {"text": "Partly cloudy", "code": 1003}
        }
    }"#;

    const FORECAST: &str = r#"{
        "forecast": {"forecastday": [{
            "date": "2025-06-13",
            "day": {
                "maxtemp_c": 35.0, "maxtemp_f": 95.0,
                "mintemp_c": 22.0, "mintemp_f": 71.6,
                "condition": {"text": "Sunny"}
            },
            "hour": [
                {"time": "2025-06-13 05:00", "time_epoch": 1749790800, "temp_c": 23.0, "temp_f": 73.4},
                {"time": "2025-06-13 06:00", "time_epoch": 1749794400, "temp_c": 23.5, "temp_f": 74.3}
            ]
        }]}
    }"#;

    #[test]
    fn test_parse_current() {
        let reading = parse_current(CURRENT).unwrap();
        assert!((reading.temperature_f - 91.4).abs() < f64::EPSILON);
        assert!((reading.temperature_for_logic() - 97.2).abs() < f64::EPSILON);
        assert!(reading.is_day);
        assert_eq!(reading.condition, "partly cloudy");
        assert!(!reading.wet_weather);
    }

    #[test]
    fn test_parse_current_without_feels_like() {
        let body = r#"{"current": {"temp_f": 50.0, "is_day": 0, "condition": {"text": "Light rain"}}}"#;
        let reading = parse_current(body).unwrap();
        assert!((reading.temperature_for_logic() - 50.0).abs() < f64::EPSILON);
        assert!(!reading.is_day);
        assert!(reading.wet_weather);
    }

    #[test]
    fn test_parse_forecast() {
        let location = Location::new(30.27, -97.74, "Austin, US".to_string());
        let forecast = parse_forecast(FORECAST, location).unwrap();
        assert_eq!(forecast.days.len(), 1);

        let day = &forecast.days[0];
        assert_eq!(day.label(), "Fri, Jun 13");
        assert_eq!(day.condition, "Sunny");
        assert_eq!(day.hours.len(), 2);
        assert_eq!(day.hours[1].hour_of_day(), Some(6));
        assert_eq!(day.hours[0].time_epoch, Some(1_749_790_800));
    }

    #[test]
    fn test_parse_malformed_payload() {
        let err = parse_current(r#"{"current": {}}"#).unwrap_err();
        assert!(matches!(err, PawcastError::Api { .. }));
    }

    #[test]
    fn test_error_reply_mapping() {
        let not_found = HttpReply {
            status: 400,
            body: r#"{"error": {"code": 1006, "message": "No matching location found."}}"#
                .to_string(),
        };
        assert!(matches!(
            reply_body(not_found, "00000").unwrap_err(),
            PawcastError::LocationNotFound { .. }
        ));

        let unauthorized = HttpReply {
            status: 401,
            body: r#"{"error": {"code": 2006, "message": "API key is invalid."}}"#.to_string(),
        };
        let err = reply_body(unauthorized, "x").unwrap_err();
        assert!(err.to_string().contains("API key is invalid."));
        assert_eq!(err.user_message(), "Failed to fetch weather data.");
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(WeatherApiClient::new(&WeatherConfig::default()).is_err());

        let config = WeatherConfig {
            api_key: Some("test_key_1234".to_string()),
            ..WeatherConfig::default()
        };
        let client = WeatherApiClient::new(&config).unwrap();
        let url = client.url("current.json", "30.27,-97.74", "");
        assert_eq!(
            url,
            "https://api.weatherapi.com/v1/current.json?key=test_key_1234&q=30.27%2C-97.74"
        );
    }
}
