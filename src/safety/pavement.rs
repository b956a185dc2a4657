//! Pavement advisory: how hot the ground gets relative to the air
//!
//! Ranges are stored as structured Fahrenheit bounds and rendered per unit,
//! so no label ever has to be parsed back into numbers.

use serde::Serialize;

use crate::units::{TemperatureUnit, to_celsius_rounded};

/// Estimated pavement temperature range, bounds in Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PavementRange {
    Under { high_f: i32 },
    UsuallyUnder { high_f: i32 },
    Between { low_f: i32, high_f: i32 },
    Over { low_f: i32 },
    PotentiallyOver { low_f: i32 },
    /// No sun on the ground
    CoolingDown,
}

impl PavementRange {
    #[must_use]
    pub fn label(&self, unit: TemperatureUnit) -> String {
        let t = |f: i32| match unit {
            TemperatureUnit::Fahrenheit => i64::from(f),
            TemperatureUnit::Celsius => to_celsius_rounded(f64::from(f)),
        };
        let symbol = unit.symbol();

        match *self {
            PavementRange::Under { high_f } => format!("Under {}{symbol}", t(high_f)),
            PavementRange::UsuallyUnder { high_f } => {
                format!("Usually under {}{symbol}", t(high_f))
            }
            PavementRange::Between { low_f, high_f } => match unit {
                TemperatureUnit::Fahrenheit => format!("{} – {}{symbol}", t(low_f), t(high_f)),
                TemperatureUnit::Celsius => format!("{}–{}{symbol}", t(low_f), t(high_f)),
            },
            PavementRange::Over { low_f } => format!("Over {}{symbol}", t(low_f)),
            PavementRange::PotentiallyOver { low_f } => {
                format!("Potentially over {}{symbol}", t(low_f))
            }
            PavementRange::CoolingDown => "Cooling Down".to_string(),
        }
    }
}

/// Ground-surface guidance for one temperature band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PavementAdvisory {
    pub range: PavementRange,
    pub message: &'static str,
    pub risk: &'static str,
    pub color: &'static str,
}

const SAFE_COLOR: &str = "#19C37D";
const MONITOR_COLOR: &str = "#ffb300";
const DANGER_COLOR: &str = "#db342b";

impl PavementAdvisory {
    #[must_use]
    pub fn label(&self, unit: TemperatureUnit) -> String {
        self.range.label(unit)
    }

    /// Icon keyed off the advisory color
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self.color {
            SAFE_COLOR => "checkmark-circle-outline",
            MONITOR_COLOR => "alert-circle-outline",
            _ => "close-circle-outline",
        }
    }
}

/// Bands keyed by exclusive upper bound in Fahrenheit
static PAVEMENT_BANDS: [(f64, PavementAdvisory); 7] = [
    (
        20.0,
        PavementAdvisory {
            range: PavementRange::Under { high_f: 60 },
            message: "No. Quick potty breaks only.",
            risk: "High for all dogs.",
            color: DANGER_COLOR,
        },
    ),
    (
        32.0,
        PavementAdvisory {
            range: PavementRange::Under { high_f: 75 },
            message: "Maybe. Limit walks to 15 minutes.",
            risk: "High for puppies, small breeds, and seniors. Moderate for large and thick–coated breeds.",
            color: DANGER_COLOR,
        },
    ),
    (
        45.0,
        PavementAdvisory {
            range: PavementRange::Under { high_f: 105 },
            message: "Yes. Consider limiting walks to 30 minutes.",
            risk: "Moderate for small dogs and short–haired breeds.",
            color: MONITOR_COLOR,
        },
    ),
    (
        60.0,
        PavementAdvisory {
            range: PavementRange::Between { low_f: 85, high_f: 125 },
            message: "Yes. Monitor for signs of discomfort.",
            risk: "Low for most dogs.",
            color: SAFE_COLOR,
        },
    ),
    (
        75.0,
        PavementAdvisory {
            range: PavementRange::Between { low_f: 105, high_f: 135 },
            message: "Yes. Monitor for signs of discomfort.",
            risk: "Low for small and medium breeds. Moderate risk for large and at–risk dogs.",
            color: SAFE_COLOR,
        },
    ),
    (
        85.0,
        PavementAdvisory {
            range: PavementRange::Between { low_f: 115, high_f: 145 },
            message: "Maybe. Consider limiting walks to 30 minutes.",
            risk: "Moderate for small and medium breeds. High for large and at–risk breeds.",
            color: MONITOR_COLOR,
        },
    ),
    (
        100.0,
        PavementAdvisory {
            range: PavementRange::Over { low_f: 145 },
            message: "Maybe. Limit walks to 15 minutes. Potty breaks only for at–risk dogs.",
            risk: "High for most dogs.",
            color: "#ff5e47",
        },
    ),
];

static EXTREME_HEAT: PavementAdvisory = PavementAdvisory {
    range: PavementRange::Over { low_f: 145 },
    message: "Walking is not advised. Potty breaks only.",
    risk: "High for most dogs.",
    color: DANGER_COLOR,
};

static NIGHT: PavementAdvisory = PavementAdvisory {
    range: PavementRange::CoolingDown,
    message: "No sun, no sizzle! Pavement is safer at night.",
    risk: "Low for all dogs.",
    color: SAFE_COLOR,
};

#[must_use]
pub fn pavement_advisory(temp_f: f64) -> &'static PavementAdvisory {
    PAVEMENT_BANDS
        .iter()
        .find(|(upper, _)| temp_f < *upper)
        .map_or(&EXTREME_HEAT, |(_, advisory)| advisory)
}

/// Advisory used once the sun is down, whatever the temperature
#[must_use]
pub fn night_pavement_advisory() -> &'static PavementAdvisory {
    &NIGHT
}

/// Rewrite a Fahrenheit range label into Celsius.
///
/// Understands `Under N`, `Usually under N`, `A–B` and `Potentially over N`;
/// any other label is returned unchanged.
#[must_use]
pub fn convert_range_label_to_celsius(label: &str) -> String {
    let numbers = numerals(label);
    let first = numbers.first().map(|n| to_celsius_rounded(*n as f64));

    let converted = if label.starts_with("Under ") {
        first.map(|c| format!("Under {c}°C"))
    } else if label.starts_with("Usually under ") {
        first.map(|c| format!("Usually under {c}°C"))
    } else if label.contains('–') {
        match numbers.as_slice() {
            [low, high] => Some(format!(
                "{}–{}°C",
                to_celsius_rounded(*low as f64),
                to_celsius_rounded(*high as f64)
            )),
            _ => None,
        }
    } else if label.starts_with("Potentially over ") {
        first.map(|c| format!("Potentially over {c}°C"))
    } else {
        None
    };

    converted.unwrap_or_else(|| label.to_string())
}

/// Runs of ASCII digits in order of appearance
fn numerals(text: &str) -> Vec<i64> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse().ok())
        .collect()
}
