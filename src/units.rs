//! Temperature units and conversions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PawcastError;

/// Display unit chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }

    /// Convert a Fahrenheit reading into this unit
    #[must_use]
    pub fn from_fahrenheit(self, temp_f: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => temp_f,
            TemperatureUnit::Celsius => to_celsius(temp_f),
        }
    }

    /// Rounded Fahrenheit reading in this unit, e.g. `72°F` or `22°C`
    #[must_use]
    pub fn format(self, temp_f: f64) -> String {
        format!("{}{}", round_whole(self.from_fahrenheit(temp_f)), self.symbol())
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Fahrenheit => write!(f, "F"),
            TemperatureUnit::Celsius => write!(f, "C"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = PawcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "F" | "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "C" | "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            other => Err(PawcastError::validation(format!(
                "Unknown temperature unit '{other}', expected F or C"
            ))),
        }
    }
}

#[must_use]
pub fn to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// Nearest whole degree, with `-0` normalised to `0`
#[must_use]
pub fn round_whole(temp: f64) -> f64 {
    temp.round() + 0.0
}

/// Whole-degree Celsius used when rewriting Fahrenheit labels
#[must_use]
pub fn to_celsius_rounded(temp_f: f64) -> i64 {
    to_celsius(temp_f).round() as i64
}
