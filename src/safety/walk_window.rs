//! Best walk window for a forecast day
//!
//! Hot days push the walk into the morning, cold days into midday warmth,
//! and everything else gets the coolest daytime pair of hours.

use serde::Serialize;
use tracing::debug;

use crate::models::HourSample;
use crate::units::TemperatureUnit;

const HOT_HIGH_F: f64 = 85.0;
const HOT_HIGH_C: f64 = 29.0;
const COLD_HIGH_F: f64 = 50.0;
const COLD_HIGH_C: f64 = 10.0;

const MORNING_HOURS: std::ops::RangeInclusive<u32> = 6..=11;
const MIDDAY_HOURS: std::ops::RangeInclusive<u32> = 12..=15;
const DAYTIME_START: u32 = 6;
const DAYTIME_END: u32 = 20;

/// Why a window was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkReason {
    Hot,
    Cold,
    Coolest,
}

/// Display treatment for a walk reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkScenario {
    pub background: &'static str,
    pub accent: &'static str,
    pub icon: &'static str,
    pub icon_color: &'static str,
    pub message: &'static str,
}

static HOT_SCENARIO: WalkScenario = WalkScenario {
    background: "#FFF9E6",
    accent: "#FF9900",
    icon: "sunny-outline",
    icon_color: "#FF9900",
    message: "Walk early – pavement may be very hot!",
};

static COLD_SCENARIO: WalkScenario = WalkScenario {
    background: "#E6F0FF",
    accent: "#2196f3",
    icon: "snow-outline",
    icon_color: "#2196f3",
    message: "Walk midday for warmth.",
};

static COOLEST_SCENARIO: WalkScenario = WalkScenario {
    background: "#E6FFEF",
    accent: "#19C37D",
    icon: "sunny-outline",
    icon_color: "#19C37D",
    message: "Great day for a walk!",
};

impl WalkReason {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            WalkReason::Hot => "It will be hot today. Walk early!",
            WalkReason::Cold => "It will be cold today. Walk in the warmest part of the day.",
            WalkReason::Coolest => "Coolest part of the day",
        }
    }

    #[must_use]
    pub fn is_hot_or_cold(self) -> bool {
        matches!(self, WalkReason::Hot | WalkReason::Cold)
    }

    #[must_use]
    pub fn scenario(self) -> &'static WalkScenario {
        match self {
            WalkReason::Hot => &HOT_SCENARIO,
            WalkReason::Cold => &COLD_SCENARIO,
            WalkReason::Coolest => &COOLEST_SCENARIO,
        }
    }
}

/// Two consecutive forecast hours recommended for a walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkWindow {
    pub window: [HourSample; 2],
    pub reason: WalkReason,
}

impl WalkWindow {
    #[must_use]
    pub fn start(&self) -> &HourSample {
        &self.window[0]
    }

    /// Label such as `6:00 AM – 7:00 AM`
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let start = self.window[0].time_label()?;
        let end = self.window[1].time_label()?;
        Some(format!("{start} – {end}"))
    }
}

fn is_hot_day(high: f64, unit: TemperatureUnit) -> bool {
    match unit {
        TemperatureUnit::Fahrenheit => high >= HOT_HIGH_F,
        TemperatureUnit::Celsius => high >= HOT_HIGH_C,
    }
}

fn is_cold_day(high: f64, unit: TemperatureUnit) -> bool {
    match unit {
        TemperatureUnit::Fahrenheit => high <= COLD_HIGH_F,
        TemperatureUnit::Celsius => high <= COLD_HIGH_C,
    }
}

/// First two samples whose hour falls in `hours`, in list order
fn first_pair_within(
    samples: &[(u32, &HourSample)],
    hours: &std::ops::RangeInclusive<u32>,
    reason: WalkReason,
) -> Option<WalkWindow> {
    let mut candidates = samples
        .iter()
        .filter(|(hour, _)| hours.contains(hour))
        .map(|(_, sample)| *sample);

    match (candidates.next(), candidates.next()) {
        (Some(first), Some(second)) => Some(WalkWindow {
            window: [first.clone(), second.clone()],
            reason,
        }),
        _ => {
            debug!(
                ?reason,
                "Not enough hours between {}:00 and {}:00 for a walk window",
                hours.start(),
                hours.end()
            );
            None
        }
    }
}

/// Adjacent daytime pair with the lowest average temperature; earliest wins ties
fn coolest_pair(samples: &[(u32, &HourSample)]) -> Option<WalkWindow> {
    let mut best: Option<(f64, usize)> = None;

    for (i, pair) in samples.windows(2).enumerate() {
        let (first_hour, first) = pair[0];
        let (second_hour, second) = pair[1];
        if first_hour < DAYTIME_START || second_hour > DAYTIME_END {
            continue;
        }
        let average = (first.temp_c + second.temp_c) / 2.0;
        if best.is_none_or(|(best_average, _)| average < best_average) {
            best = Some((average, i));
        }
    }

    best.map(|(_, i)| WalkWindow {
        window: [samples[i].1.clone(), samples[i + 1].1.clone()],
        reason: WalkReason::Coolest,
    })
}

/// Pick a 2-hour walk window for a day.
///
/// `daily_high` is in `unit`. Returns `None` when the hours on offer cannot
/// form a window; that is a valid "no recommendation", not a failure.
#[must_use]
pub fn select_walk_window(
    hours: &[HourSample],
    daily_high: f64,
    unit: TemperatureUnit,
) -> Option<WalkWindow> {
    let samples: Vec<(u32, &HourSample)> = hours
        .iter()
        .filter_map(|sample| sample.hour_of_day().map(|hour| (hour, sample)))
        .collect();

    if samples.is_empty() {
        debug!("No hourly data available for this day");
        return None;
    }

    if is_hot_day(daily_high, unit) {
        if let Some(window) = first_pair_within(&samples, &MORNING_HOURS, WalkReason::Hot) {
            return Some(window);
        }
    } else if is_cold_day(daily_high, unit) {
        if let Some(window) = first_pair_within(&samples, &MIDDAY_HOURS, WalkReason::Cold) {
            return Some(window);
        }
    }

    let window = coolest_pair(&samples);
    if window.is_none() {
        debug!(
            hours = ?samples.iter().map(|(h, _)| *h).collect::<Vec<_>>(),
            "No suitable daytime walk window"
        );
    }
    window
}
