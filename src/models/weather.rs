//! Current weather reading and condition helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition keywords that count as wet weather
const WET_KEYWORDS: [&str; 4] = ["rain", "shower", "drizzle", "storm"];

/// Keyword to icon table for current conditions, first match wins
const CONDITION_ICONS: [(&str, &str); 12] = [
    ("clear", "sunny-outline"),
    ("sunny", "sunny-outline"),
    ("cloud", "cloud-outline"),
    ("overcast", "cloudy-outline"),
    ("rain", "rainy-outline"),
    ("drizzle", "rainy-outline"),
    ("shower", "rainy-outline"),
    ("storm", "thunderstorm-outline"),
    ("snow", "snow-outline"),
    ("fog", "cloudy-outline"),
    ("mist", "cloudy-outline"),
    ("haze", "cloudy-outline"),
];

/// Current conditions at a location, as used by the risk model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in Fahrenheit
    pub temperature_f: f64,
    /// Apparent temperature in Fahrenheit
    pub feels_like_f: f64,
    pub is_day: bool,
    /// Lowercased condition text from the provider
    pub condition: String,
    /// Derived from `condition`
    pub wet_weather: bool,
    pub retrieved_at: DateTime<Utc>,
}

impl WeatherReading {
    #[must_use]
    pub fn new(temperature_f: f64, feels_like_f: f64, is_day: bool, condition: &str) -> Self {
        let condition = condition.to_lowercase();
        Self {
            temperature_f,
            feels_like_f,
            is_day,
            wet_weather: is_wet_condition(&condition),
            condition,
            retrieved_at: Utc::now(),
        }
    }

    /// Temperature the risk model runs on: feels-like unless it is missing
    #[must_use]
    pub fn temperature_for_logic(&self) -> f64 {
        if self.feels_like_f.is_nan() {
            self.temperature_f
        } else {
            self.feels_like_f
        }
    }

    #[must_use]
    pub fn condition_icon(&self) -> &'static str {
        condition_icon(&self.condition)
    }

    /// Shade is assumed at night and not in daylight unless the owner says otherwise
    #[must_use]
    pub fn default_shade(&self) -> bool {
        !self.is_day
    }
}

#[must_use]
pub fn is_wet_condition(condition: &str) -> bool {
    let condition = condition.to_lowercase();
    WET_KEYWORDS.iter().any(|k| condition.contains(k))
}

#[must_use]
pub fn condition_icon(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    CONDITION_ICONS
        .iter()
        .find(|(keyword, _)| condition.contains(keyword))
        .map_or("partly-sunny-outline", |(_, icon)| icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Light rain", true)]
    #[case("Patchy light drizzle", true)]
    #[case("Moderate or heavy rain shower", true)]
    #[case("Thundery outbreaks possible", false)]
    #[case("Thunderstorm", true)]
    #[case("Sunny", false)]
    #[case("Heavy snow", false)]
    fn test_wet_detection(#[case] condition: &str, #[case] wet: bool) {
        assert_eq!(is_wet_condition(condition), wet);
        assert_eq!(WeatherReading::new(50.0, 50.0, true, condition).wet_weather, wet);
    }

    #[test]
    fn test_condition_is_lowercased() {
        let reading = WeatherReading::new(60.0, 58.0, true, "Partly Cloudy");
        assert_eq!(reading.condition, "partly cloudy");
        assert_eq!(reading.condition_icon(), "cloud-outline");
    }

    #[test]
    fn test_temperature_for_logic_prefers_feels_like() {
        let reading = WeatherReading::new(90.0, 97.0, true, "Sunny");
        assert_eq!(reading.temperature_for_logic(), 97.0);

        let reading = WeatherReading::new(90.0, f64::NAN, true, "Sunny");
        assert_eq!(reading.temperature_for_logic(), 90.0);
    }

    #[test]
    fn test_default_shade_follows_daylight() {
        assert!(!WeatherReading::new(70.0, 70.0, true, "Clear").default_shade());
        assert!(WeatherReading::new(70.0, 70.0, false, "Clear").default_shade());
    }

    #[test]
    fn test_condition_icon_fallback() {
        assert_eq!(condition_icon("Blizzard"), "partly-sunny-outline");
        assert_eq!(condition_icon("Mist"), "cloudy-outline");
    }
}
