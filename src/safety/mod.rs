//! Walk safety decision core
//!
//! Pure, synchronous classifiers that turn a temperature, a pet profile and a
//! few weather flags into the advice shown to the owner:
//! - Risk matrix engine: 1-5 risk level per pet
//! - Temperature classification: card colors, quick status, walk-time guidance
//! - Pavement advisory: ground-surface heat guidance
//! - Walk window: best 2-hour slot of a forecast day
//! - Color utilities: contrast and tinting helpers for the palette above

pub mod color;
pub mod pavement;
pub mod risk;
pub mod temperature;
pub mod walk_window;

pub use color::{is_perceptually_dark, lighten, pastelize, text_color_on};
pub use pavement::{
    PavementAdvisory, PavementRange, convert_range_label_to_celsius, night_pavement_advisory,
    pavement_advisory,
};
pub use risk::{RiskAssessment, RiskLevel, assess_risk, compute_risk};
pub use temperature::{QuickStatus, WalkGuidance, color_for_temp, quick_status, walk_guidance};
pub use walk_window::{WalkReason, WalkScenario, WalkWindow, select_walk_window};
