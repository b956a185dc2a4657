//! Temperature classification: card colors, quick status and walk-time guidance

use serde::Serialize;

/// Shown while no reading is available yet
pub const LOADING_COLOR: &str = "#19C37D";

/// Asphalt runs 50-70°F above air temperature; the midpoint is used
const ASPHALT_OFFSET_F: f64 = 60.0;
/// Asphalt at or above this burns paw pads
const ASPHALT_UNSAFE_F: f64 = 125.0;

/// Card color for an air temperature in Fahrenheit.
///
/// Boundaries are deliberately mixed: 14 and 24 are inclusive upper bounds,
/// every other threshold is exclusive.
#[must_use]
pub fn color_for_temp(temp_f: Option<f64>) -> &'static str {
    let Some(t) = temp_f.filter(|t| !t.is_nan()) else {
        return LOADING_COLOR;
    };

    if t < 0.0 {
        "#311b92"
    } else if t <= 14.0 {
        "#4A148C"
    } else if t <= 24.0 {
        "#1565C0"
    } else if t < 35.0 {
        "#186F98"
    } else if t < 50.0 {
        "#1B7A75"
    } else if t < 65.0 {
        "#0c880b"
    } else if t < 75.0 {
        "#F4B400"
    } else if t < 85.0 {
        "#e86c00"
    } else {
        "#88211b"
    }
}

/// Coarse three-way heat status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickStatus {
    pub color: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

pub static STATUS_SAFE: QuickStatus = QuickStatus {
    color: "#19C37D",
    icon: "happy-outline",
    title: "Safe for your dog!",
    message: "Enjoy your walk, but always monitor your dog for signs of overheating.",
};

pub static STATUS_CAUTION: QuickStatus = QuickStatus {
    color: "#FF9900",
    icon: "alert-circle-outline",
    title: "Caution",
    message: "Limit activity, provide water and shade.",
};

pub static STATUS_DANGER: QuickStatus = QuickStatus {
    color: "#FF3B30",
    icon: "home-outline",
    title: "Dangerous for your dog!",
    message: "Avoid walks. Keep your dog indoors with access to water and shade.",
};

#[must_use]
pub fn quick_status(temp_f: f64) -> &'static QuickStatus {
    if temp_f < 80.0 {
        &STATUS_SAFE
    } else if temp_f < 90.0 {
        &STATUS_CAUTION
    } else {
        &STATUS_DANGER
    }
}

/// How long a walk can safely last at a given air temperature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkGuidance {
    pub risk: &'static str,
    /// `None` means no limit
    pub max_minutes: Option<u32>,
    pub asphalt_temp_f: f64,
    pub asphalt_too_hot: bool,
}

#[must_use]
pub fn estimate_asphalt_temp_f(air_temp_f: f64) -> f64 {
    air_temp_f + ASPHALT_OFFSET_F
}

#[must_use]
pub fn is_asphalt_too_hot(asphalt_temp_f: f64) -> bool {
    asphalt_temp_f >= ASPHALT_UNSAFE_F
}

#[must_use]
pub fn walk_guidance(air_temp_f: f64) -> WalkGuidance {
    let (risk, max_minutes) = if air_temp_f < 75.0 {
        ("Low", None)
    } else if air_temp_f < 80.0 {
        ("Low to Moderate", Some(30))
    } else if air_temp_f < 85.0 {
        ("Moderate", Some(20))
    } else if air_temp_f < 90.0 {
        ("Moderate to High", Some(15))
    } else if air_temp_f < 100.0 {
        ("High", Some(5))
    } else {
        ("Extremely High", Some(0))
    };

    let asphalt_temp_f = estimate_asphalt_temp_f(air_temp_f);
    WalkGuidance {
        risk,
        max_minutes,
        asphalt_temp_f,
        asphalt_too_hot: is_asphalt_too_hot(asphalt_temp_f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5.0, "#311b92")]
    #[case(0.0, "#4A148C")]
    #[case(14.0, "#4A148C")]
    #[case(14.5, "#1565C0")]
    #[case(24.0, "#1565C0")]
    #[case(24.5, "#186F98")]
    #[case(34.9, "#186F98")]
    #[case(35.0, "#1B7A75")]
    #[case(49.9, "#1B7A75")]
    #[case(50.0, "#0c880b")]
    #[case(65.0, "#F4B400")]
    #[case(75.0, "#e86c00")]
    #[case(84.0, "#e86c00")]
    #[case(85.0, "#88211b")]
    #[case(110.0, "#88211b")]
    fn test_color_bands(#[case] temp_f: f64, #[case] color: &str) {
        assert_eq!(color_for_temp(Some(temp_f)), color);
    }

    #[test]
    fn test_color_changes_exactly_at_boundaries() {
        assert_ne!(color_for_temp(Some(84.0)), color_for_temp(Some(85.0)));
        assert_ne!(color_for_temp(Some(-0.01)), color_for_temp(Some(0.0)));
        assert_eq!(color_for_temp(Some(0.0)), color_for_temp(Some(14.0)));
        assert_eq!(color_for_temp(Some(65.0)), color_for_temp(Some(74.9)));
    }

    #[test]
    fn test_loading_color() {
        assert_eq!(color_for_temp(None), LOADING_COLOR);
        assert_eq!(color_for_temp(Some(f64::NAN)), LOADING_COLOR);
    }

    #[rstest]
    #[case(79.9, "Safe for your dog!")]
    #[case(80.0, "Caution")]
    #[case(90.0, "Dangerous for your dog!")]
    fn test_quick_status(#[case] temp_f: f64, #[case] title: &str) {
        assert_eq!(quick_status(temp_f).title, title);
    }

    #[rstest]
    #[case(60.0, "Low", None, false)]
    #[case(75.0, "Low to Moderate", Some(30), true)]
    #[case(84.0, "Moderate", Some(20), true)]
    #[case(89.0, "Moderate to High", Some(15), true)]
    #[case(99.0, "High", Some(5), true)]
    #[case(100.0, "Extremely High", Some(0), true)]
    fn test_walk_guidance(
        #[case] temp_f: f64,
        #[case] risk: &str,
        #[case] max_minutes: Option<u32>,
        #[case] too_hot: bool,
    ) {
        let guidance = walk_guidance(temp_f);
        assert_eq!(guidance.risk, risk);
        assert_eq!(guidance.max_minutes, max_minutes);
        assert_eq!(guidance.asphalt_too_hot, too_hot);
        assert_eq!(guidance.asphalt_temp_f, temp_f + 60.0);
    }
}
