//! Risk matrix engine
//!
//! Base risk comes from a size x temperature lookup table; pet traits, shade
//! and precipitation then shift it before it is clamped to the 1-5 scale.

use serde::Serialize;

use crate::models::{PetProfile, PetSize};

/// One of the five fixed risk levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskLevel {
    pub level: u8,
    pub color: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

pub static RISK_LEVELS: [RiskLevel; 5] = [
    RiskLevel {
        level: 1,
        color: "#0c880b",
        icon: "happy-outline",
        title: "No evidence of risk",
        message: "Wag and walk!",
    },
    RiskLevel {
        level: 2,
        color: "#A1CEDC",
        icon: "happy-outline",
        title: "Risk is unlikely",
        message: "Sniff around, stay sharp",
    },
    RiskLevel {
        level: 3,
        color: "#ffb300",
        icon: "alert-circle-outline",
        title: "Unsafe potential",
        message: "Maybe paws off for some",
    },
    RiskLevel {
        level: 4,
        color: "#ff7d00",
        icon: "alert-circle-outline",
        title: "Dangerous weather",
        message: "Watch your paws out there",
    },
    RiskLevel {
        level: 5,
        color: "#88211b",
        icon: "home-outline",
        title: "Life-Threatening",
        message: "Skip the stroll, stay in!",
    },
];

/// Column thresholds in Fahrenheit, hottest first; one per matrix column
pub const TEMP_STEPS_F: [f64; 21] = [
    100.0, 95.0, 90.0, 85.0, 80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0, 45.0, 40.0, 35.0, 30.0,
    25.0, 20.0, 15.0, 10.0, 5.0, 0.0,
];

/// Base risk per size row (Small, Medium, Large) and temperature column
pub const RISK_MATRIX: [[u8; 21]; 3] = [
    [5, 5, 5, 5, 4, 3, 3, 2, 1, 1, 1, 2, 3, 3, 3, 4, 4, 5, 5, 5, 5],
    [5, 5, 5, 4, 3, 3, 2, 1, 1, 1, 2, 2, 2, 3, 3, 4, 4, 5, 5, 5, 5],
    [5, 5, 5, 4, 4, 3, 3, 2, 1, 1, 1, 1, 1, 2, 3, 4, 4, 5, 5, 5, 5],
];

/// Below this, wet weather and cold-weather breeds matter
const COLD_BAND_F: f64 = 35.0;
/// Above this, wet weather cools and cold-weather breeds suffer
const HOT_BAND_F: f64 = 70.0;

/// Full breakdown of a risk computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub column: usize,
    /// Threshold of the matched column
    pub step_f: f64,
    pub base: u8,
    pub modifier: i32,
    pub level: &'static RiskLevel,
}

/// Matrix column for a temperature: the first step not exceeding it.
///
/// Anything at or above the first step lands in column 0; anything below the
/// last step (and NaN) lands in the last column.
#[must_use]
pub fn temperature_column(temp_f: f64) -> usize {
    TEMP_STEPS_F
        .iter()
        .position(|step| temp_f >= *step)
        .unwrap_or(TEMP_STEPS_F.len() - 1)
}

#[must_use]
pub fn base_risk(size: PetSize, temp_f: f64) -> u8 {
    RISK_MATRIX[size.row()][temperature_column(temp_f)]
}

/// Fixed level record for a raw score, clamped to 1-5
#[must_use]
pub fn risk_level(score: i32) -> &'static RiskLevel {
    let clamped = score.clamp(1, 5);
    &RISK_LEVELS[(clamped - 1) as usize]
}

fn modifier(temp_f: f64, pet: &PetProfile, shade_available: bool, wet_weather: bool) -> i32 {
    let mut modifier = 0;
    for flag in [pet.obese, pet.brachycephalic, pet.senior] {
        if flag {
            modifier += 1;
        }
    }
    if shade_available {
        modifier -= 1;
    }

    if temp_f < COLD_BAND_F {
        if wet_weather {
            modifier += 2;
        }
        if pet.northern_breed {
            modifier -= 1;
        }
        if pet.cold_acclimated {
            modifier -= 1;
        }
    } else if temp_f > HOT_BAND_F {
        if wet_weather {
            modifier -= 2;
        }
        if pet.northern_breed {
            modifier += 1;
        }
        if pet.cold_acclimated {
            modifier += 1;
        }
    }

    modifier
}

#[must_use]
pub fn assess_risk(
    temp_f: f64,
    pet: &PetProfile,
    shade_available: bool,
    wet_weather: bool,
) -> RiskAssessment {
    let column = temperature_column(temp_f);
    let base = RISK_MATRIX[pet.size.row()][column];
    let modifier = modifier(temp_f, pet, shade_available, wet_weather);

    RiskAssessment {
        column,
        step_f: TEMP_STEPS_F[column],
        base,
        modifier,
        level: risk_level(i32::from(base) + modifier),
    }
}

#[must_use]
pub fn compute_risk(
    temp_f: f64,
    pet: &PetProfile,
    shade_available: bool,
    wet_weather: bool,
) -> &'static RiskLevel {
    assess_risk(temp_f, pet, shade_available, wet_weather).level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PetAttribute;
    use rstest::rstest;

    fn sweep() -> impl Iterator<Item = f64> {
        (-40..=240).map(|t| f64::from(t) * 0.5)
    }

    #[rstest]
    #[case(150.0, 0)]
    #[case(100.0, 0)]
    #[case(99.9, 1)]
    #[case(95.0, 1)]
    #[case(72.0, 6)]
    #[case(70.0, 6)]
    #[case(69.99, 7)]
    #[case(10.0, 18)]
    #[case(0.0, 20)]
    #[case(-0.1, 20)]
    #[case(-40.0, 20)]
    fn test_temperature_column(#[case] temp_f: f64, #[case] column: usize) {
        assert_eq!(temperature_column(temp_f), column);
    }

    #[test]
    fn test_nan_resolves_to_last_column() {
        assert_eq!(temperature_column(f64::NAN), TEMP_STEPS_F.len() - 1);
        let level = compute_risk(f64::NAN, &PetProfile::default(), false, false);
        assert_eq!(level.level, 5);
    }

    #[test]
    fn test_hot_end_is_always_maximum() {
        for size in PetSize::ALL {
            for temp in [95.0, 97.5, 100.0, 120.0] {
                assert_eq!(base_risk(size, temp), 5);
            }
        }
    }

    #[test]
    fn test_medium_dog_on_a_warm_day() {
        let pet = PetProfile::new(PetSize::Medium);
        let level = compute_risk(72.0, &pet, false, false);
        assert_eq!(level.level, 2);
        assert_eq!(level.title, "Risk is unlikely");
    }

    #[test]
    fn test_small_senior_obese_dog_in_freezing_rain() {
        let pet = PetProfile::new(PetSize::Small)
            .with(PetAttribute::Obese, true)
            .with(PetAttribute::Senior, true);
        let assessment = assess_risk(10.0, &pet, false, true);
        assert_eq!(assessment.column, 18);
        assert_eq!(assessment.base, 5);
        assert_eq!(assessment.modifier, 4);
        assert_eq!(assessment.level.level, 5);
        assert_eq!(assessment.level.title, "Life-Threatening");
    }

    #[test]
    fn test_no_flags_equals_matrix_lookup() {
        for size in PetSize::ALL {
            let pet = PetProfile::new(size);
            for temp in sweep() {
                let level = compute_risk(temp, &pet, false, false);
                assert_eq!(level.level, base_risk(size, temp), "size {size} at {temp}");
            }
        }
    }

    #[test]
    fn test_risk_flags_never_lower_risk() {
        let attributes = [
            PetAttribute::Obese,
            PetAttribute::Brachycephalic,
            PetAttribute::Senior,
        ];
        for size in PetSize::ALL {
            for temp in sweep() {
                let mut pet = PetProfile::new(size);
                let mut previous = compute_risk(temp, &pet, false, false).level;
                for attribute in attributes {
                    pet.set(attribute, true);
                    let current = compute_risk(temp, &pet, false, false).level;
                    assert!(current >= previous, "size {size} at {temp}");
                    previous = current;
                }
            }
        }
    }

    #[test]
    fn test_shade_never_raises_risk() {
        let pet = PetProfile::new(PetSize::Large).with(PetAttribute::Brachycephalic, true);
        for temp in sweep() {
            for wet in [false, true] {
                let shaded = compute_risk(temp, &pet, true, wet).level;
                let exposed = compute_risk(temp, &pet, false, wet).level;
                assert!(shaded <= exposed, "at {temp}");
            }
        }
    }

    #[rstest]
    #[case(30.0, 2)]
    #[case(35.0, 0)]
    #[case(70.0, 0)]
    #[case(71.0, -2)]
    fn test_wet_weather_modifier_by_band(#[case] temp_f: f64, #[case] expected: i32) {
        let pet = PetProfile::default();
        assert_eq!(assess_risk(temp_f, &pet, false, true).modifier, expected);
    }

    #[rstest]
    #[case(20.0, -2)]
    #[case(50.0, 0)]
    #[case(85.0, 2)]
    fn test_cold_breed_modifiers_by_band(#[case] temp_f: f64, #[case] expected: i32) {
        let pet = PetProfile::default()
            .with(PetAttribute::NorthernBreed, true)
            .with(PetAttribute::ColdAcclimated, true);
        assert_eq!(assess_risk(temp_f, &pet, false, false).modifier, expected);
    }

    #[test]
    fn test_result_is_clamped() {
        let pet = PetProfile::new(PetSize::Large)
            .with(PetAttribute::NorthernBreed, true)
            .with(PetAttribute::ColdAcclimated, true);
        // base 1 at 55F, shade -1 keeps it at the floor
        let level = compute_risk(55.0, &pet, true, false);
        assert_eq!(level.level, 1);

        assert_eq!(risk_level(-3).level, 1);
        assert_eq!(risk_level(9).level, 5);
    }
}
