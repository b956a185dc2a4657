//! Forecast model: per-day summaries with hourly samples

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::Location;
use crate::units::{TemperatureUnit, round_whole};

/// One hourly forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    /// Local timestamp as reported by the provider, e.g. `2025-06-13 06:00`
    pub time: String,
    pub time_epoch: Option<i64>,
    pub temp_c: f64,
    pub temp_f: f64,
    /// Local hour of day (0-23) when the provider supplies it
    pub hour: Option<u32>,
}

impl HourSample {
    #[must_use]
    pub fn new(time: impl Into<String>, temp_c: f64, temp_f: f64) -> Self {
        Self {
            time: time.into(),
            time_epoch: None,
            temp_c,
            temp_f,
            hour: None,
        }
    }

    /// Hour of day, taken from `hour` or parsed out of `time`
    #[must_use]
    pub fn hour_of_day(&self) -> Option<u32> {
        self.hour
            .filter(|h| *h < 24)
            .or_else(|| parse_local_time(&self.time).map(|t| t.hour()))
    }

    /// Clock label such as `6:00 AM`
    #[must_use]
    pub fn time_label(&self) -> Option<String> {
        parse_local_time(&self.time).map(|t| t.format("%-I:%M %p").to_string())
    }
}

fn parse_local_time(time: &str) -> Option<NaiveDateTime> {
    let time = time.trim();
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(time)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Icon and tint for a forecast day row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayIcon {
    pub name: &'static str,
    pub color: &'static str,
}

/// Summary of a single forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub max_temp_f: f64,
    pub min_temp_c: f64,
    pub min_temp_f: f64,
    pub condition: String,
    pub hours: Vec<HourSample>,
}

impl ForecastDay {
    /// Day high in the given unit, rounded to a whole degree
    #[must_use]
    pub fn high(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Fahrenheit => round_whole(self.max_temp_f),
            TemperatureUnit::Celsius => round_whole(self.max_temp_c),
        }
    }

    #[must_use]
    pub fn low(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Fahrenheit => round_whole(self.min_temp_f),
            TemperatureUnit::Celsius => round_whole(self.min_temp_c),
        }
    }

    /// Label such as `Fri, Jun 13`
    #[must_use]
    pub fn label(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }

    #[must_use]
    pub fn icon(&self) -> DayIcon {
        let condition = self.condition.to_lowercase();
        if condition.contains("rain") {
            DayIcon { name: "rainy-outline", color: "#64b5f6" }
        } else if condition.contains("cloud") {
            DayIcon { name: "cloud-outline", color: "#B0BEC5" }
        } else if condition.contains("storm") {
            DayIcon { name: "thunderstorm-outline", color: "#FF9800" }
        } else if condition.contains("snow") {
            DayIcon { name: "snow-outline", color: "#90caf9" }
        } else {
            DayIcon { name: "sunny-outline", color: "#FFD600" }
        }
    }
}

/// Multi-day forecast for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: Location,
    pub days: Vec<ForecastDay>,
    /// When this forecast was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl Forecast {
    #[must_use]
    pub fn new(location: Location, days: Vec<ForecastDay>) -> Self {
        Self {
            location,
            days,
            retrieved_at: Utc::now(),
        }
    }
}
