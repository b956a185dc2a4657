//! Advisory service: joins provider data with the safety model
//!
//! [`AdvisoryService::home`] produces the current-conditions advisory for a
//! pet, [`AdvisoryService::forecast`] the per-day walk plan. The pure
//! builders [`build_home_advisory`] and [`build_forecast_advisory`] hold the
//! presentation rules and are usable without any provider.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::cache::PersistentCache;
use crate::config::DefaultsConfig;
use crate::geocoding::Geocoder;
use crate::location_resolver::LocationResolver;
use crate::models::{DayIcon, Forecast, Location, PetProfile, WeatherReading};
use crate::safety::{
    PavementRange, QuickStatus, RiskAssessment, WalkGuidance, WalkReason, WalkScenario, WalkWindow,
    assess_risk, color_for_temp, lighten, night_pavement_advisory, pastelize, pavement_advisory,
    quick_status, select_walk_window, text_color_on, walk_guidance,
};
use crate::units::TemperatureUnit;
use crate::weather::WeatherProvider;
use crate::Result;

/// Shown for a forecast day without a recommendation
pub const NO_WALK_TIME: &str = "No suitable walk time";

const CARD_BACKGROUND_LIGHTEN: f64 = 0.25;

/// Inputs for the current-conditions advisory
#[derive(Debug, Clone, Default)]
pub struct AdvisoryRequest {
    /// Free-form location; the configured default when absent
    pub location: Option<String>,
    pub unit: Option<TemperatureUnit>,
    pub pet: PetProfile,
    /// Owner's shade choice. Ignored at night, where shade is always assumed.
    pub shade: Option<bool>,
    /// Debug temperature in °F replacing the provider reading
    pub temp_override_f: Option<f64>,
    /// Debug day/night replacing the provider flag
    pub is_day_override: Option<bool>,
}

/// Inputs for the forecast advisory
#[derive(Debug, Clone, Default)]
pub struct ForecastRequest {
    pub location: Option<String>,
    pub unit: Option<TemperatureUnit>,
}

/// Card styling derived from the temperature color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardStyle {
    pub color: &'static str,
    /// `color` lightened by a quarter
    pub background: String,
    /// Pastel tint of `color`
    pub accent: String,
    pub text_color: &'static str,
}

/// Pavement advisory rendered for the display unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PavementView {
    pub range: PavementRange,
    pub label: String,
    pub message: &'static str,
    pub risk: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Everything the home screen shows
#[derive(Debug, Clone, Serialize)]
pub struct HomeAdvisory {
    pub location: Location,
    pub unit: TemperatureUnit,
    pub temperature: String,
    pub feels_like: String,
    /// Temperature the risk model ran on, °F
    pub temperature_for_logic_f: f64,
    pub condition: String,
    pub condition_icon: &'static str,
    pub is_day: bool,
    pub shade: bool,
    pub wet_weather: bool,
    pub risk: RiskAssessment,
    pub card: CardStyle,
    pub pavement: PavementView,
    pub quick_status: &'static QuickStatus,
    pub walk_guidance: WalkGuidance,
}

/// One row of the forecast screen
#[derive(Debug, Clone, Serialize)]
pub struct DayAdvisory {
    pub date: NaiveDate,
    pub label: String,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub icon: DayIcon,
    /// Start of the walk window, or [`NO_WALK_TIME`]
    pub walk_time: String,
    pub walk_window: Option<WalkWindow>,
    pub reason: Option<WalkReason>,
    pub scenario: Option<&'static WalkScenario>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastAdvisory {
    pub location: Location,
    pub unit: TemperatureUnit,
    pub days: Vec<DayAdvisory>,
}

/// Shade is forced at night; in daylight the owner's choice wins over the default
#[must_use]
pub fn effective_shade(reading: &WeatherReading, choice: Option<bool>) -> bool {
    if reading.is_day {
        choice.unwrap_or_else(|| reading.default_shade())
    } else {
        true
    }
}

/// Build the home advisory from a reading
pub fn build_home_advisory(
    location: Location,
    reading: &WeatherReading,
    request: &AdvisoryRequest,
    unit: TemperatureUnit,
) -> Result<HomeAdvisory> {
    let mut reading = reading.clone();
    if let Some(is_day) = request.is_day_override {
        reading.is_day = is_day;
    }

    let temp_for_logic = request
        .temp_override_f
        .filter(|t| t.is_finite())
        .unwrap_or_else(|| reading.temperature_for_logic());

    let (temperature, feels_like) = match request.temp_override_f.filter(|t| t.is_finite()) {
        Some(t) => (unit.format(t), unit.format(t)),
        None => {
            let feels = if reading.feels_like_f.is_nan() {
                reading.temperature_f
            } else {
                reading.feels_like_f
            };
            (unit.format(reading.temperature_f), unit.format(feels))
        }
    };

    let shade = effective_shade(&reading, request.shade);
    let risk = assess_risk(temp_for_logic, &request.pet, shade, reading.wet_weather);

    let pavement = if reading.is_day {
        pavement_advisory(temp_for_logic)
    } else {
        night_pavement_advisory()
    };

    let color = color_for_temp(Some(temp_for_logic));
    let card = CardStyle {
        color,
        background: lighten(color, CARD_BACKGROUND_LIGHTEN)?,
        accent: pastelize(color)?,
        text_color: text_color_on(color)?,
    };

    debug!(
        "Advisory for {}: {:.1}°F, shade={}, wet={}, risk level {}",
        location.name, temp_for_logic, shade, reading.wet_weather, risk.level.level
    );

    Ok(HomeAdvisory {
        location,
        unit,
        temperature,
        feels_like,
        temperature_for_logic_f: temp_for_logic,
        condition_icon: reading.condition_icon(),
        condition: reading.condition.clone(),
        is_day: reading.is_day,
        shade,
        wet_weather: reading.wet_weather,
        risk,
        card,
        pavement: PavementView {
            range: pavement.range,
            label: pavement.label(unit),
            message: pavement.message,
            risk: pavement.risk,
            color: pavement.color,
            icon: pavement.icon(),
        },
        quick_status: quick_status(temp_for_logic),
        walk_guidance: walk_guidance(temp_for_logic),
    })
}

/// Build the forecast advisory, one row per day
#[must_use]
pub fn build_forecast_advisory(forecast: &Forecast, unit: TemperatureUnit) -> ForecastAdvisory {
    let days = forecast
        .days
        .iter()
        .map(|day| {
            let high = day.high(unit);
            let window = select_walk_window(&day.hours, high, unit);
            let walk_time = window
                .as_ref()
                .and_then(|w| w.start().time_label())
                .unwrap_or_else(|| NO_WALK_TIME.to_string());
            let reason = window.as_ref().map(|w| w.reason);

            DayAdvisory {
                date: day.date,
                label: day.label(),
                high,
                low: day.low(unit),
                condition: day.condition.clone(),
                icon: day.icon(),
                walk_time,
                reason,
                scenario: reason.map(WalkReason::scenario),
                walk_window: window,
            }
        })
        .collect();

    ForecastAdvisory {
        location: forecast.location.clone(),
        unit,
        days,
    }
}

/// Service combining the providers, the optional forecast cache and the safety model
pub struct AdvisoryService<W, G> {
    weather: W,
    geocoder: G,
    cache: Option<PersistentCache>,
    defaults: DefaultsConfig,
    forecast_days: u32,
}

impl<W: WeatherProvider, G: Geocoder> AdvisoryService<W, G> {
    pub fn new(weather: W, geocoder: G, defaults: DefaultsConfig, forecast_days: u32) -> Self {
        Self {
            weather,
            geocoder,
            cache: None,
            defaults,
            forecast_days,
        }
    }

    /// Serve forecasts through `cache` while its entries are fresh
    #[must_use]
    pub fn with_cache(mut self, cache: PersistentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn resolve(&self, location: Option<&str>) -> Result<Location> {
        let input = location.unwrap_or(self.defaults.location.as_str());
        LocationResolver::resolve_str(&self.geocoder, input).await
    }

    /// Current-conditions advisory
    #[instrument(skip(self, request), fields(location = ?request.location))]
    pub async fn home(&self, request: &AdvisoryRequest) -> Result<HomeAdvisory> {
        let unit = request.unit.unwrap_or(self.defaults.unit);
        let location = self.resolve(request.location.as_deref()).await?;
        let reading = self.weather.current(location.latitude, location.longitude).await?;
        info!("Building advisory for {}", location.name);
        build_home_advisory(location, &reading, request, unit)
    }

    /// Per-day walk windows
    #[instrument(skip(self, request), fields(location = ?request.location))]
    pub async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastAdvisory> {
        let unit = request.unit.unwrap_or(self.defaults.unit);
        let location = self.resolve(request.location.as_deref()).await?;
        let forecast = self.load_forecast(&location).await?;
        Ok(build_forecast_advisory(&forecast, unit))
    }

    async fn load_forecast(&self, location: &Location) -> Result<Forecast> {
        let key = location.cache_key();

        if let Some(cache) = &self.cache {
            match cache.get::<Forecast>(&key).await {
                Ok(Some(forecast)) => {
                    debug!("Using cached forecast for {}", location.name);
                    return Ok(forecast);
                }
                Ok(None) => {}
                Err(e) => warn!("Forecast cache read failed: {e}"),
            }
        }

        let forecast = self.weather.forecast(location, self.forecast_days).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, forecast.clone()).await {
                warn!("Forecast cache write failed: {e}");
            }
        }
        Ok(forecast)
    }
}
