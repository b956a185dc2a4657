//! Pet profile model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PawcastError;

/// Body size bucket used to select the risk matrix row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PetSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl PetSize {
    pub const ALL: [PetSize; 3] = [PetSize::Small, PetSize::Medium, PetSize::Large];

    /// Row of this size in the risk matrix
    #[must_use]
    pub fn row(self) -> usize {
        match self {
            PetSize::Small => 0,
            PetSize::Medium => 1,
            PetSize::Large => 2,
        }
    }
}

impl fmt::Display for PetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PetSize::Small => "Small",
            PetSize::Medium => "Medium",
            PetSize::Large => "Large",
        };
        f.write_str(name)
    }
}

impl FromStr for PetSize {
    type Err = PawcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(PetSize::Small),
            "medium" | "m" => Ok(PetSize::Medium),
            "large" | "l" => Ok(PetSize::Large),
            other => Err(PawcastError::validation(format!(
                "Unknown pet size '{other}', expected small, medium or large"
            ))),
        }
    }
}

/// Boolean traits of a dog that shift its risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetAttribute {
    Obese,
    Brachycephalic,
    Senior,
    NorthernBreed,
    ColdAcclimated,
}

/// Owner-supplied description of the dog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetProfile {
    pub name: String,
    pub size: PetSize,
    pub obese: bool,
    /// Short-nosed breeds (pugs, bulldogs, ...)
    pub brachycephalic: bool,
    pub senior: bool,
    /// Huskies, malamutes and other cold-weather breeds
    pub northern_breed: bool,
    pub cold_acclimated: bool,
}

impl PetProfile {
    #[must_use]
    pub fn new(size: PetSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Builder-style variant of [`PetProfile::set`]
    #[must_use]
    pub fn with(mut self, attribute: PetAttribute, value: bool) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: PetAttribute, value: bool) {
        *self.flag_mut(attribute) = value;
    }

    #[must_use]
    pub fn has(&self, attribute: PetAttribute) -> bool {
        match attribute {
            PetAttribute::Obese => self.obese,
            PetAttribute::Brachycephalic => self.brachycephalic,
            PetAttribute::Senior => self.senior,
            PetAttribute::NorthernBreed => self.northern_breed,
            PetAttribute::ColdAcclimated => self.cold_acclimated,
        }
    }

    fn flag_mut(&mut self, attribute: PetAttribute) -> &mut bool {
        match attribute {
            PetAttribute::Obese => &mut self.obese,
            PetAttribute::Brachycephalic => &mut self.brachycephalic,
            PetAttribute::Senior => &mut self.senior,
            PetAttribute::NorthernBreed => &mut self.northern_breed,
            PetAttribute::ColdAcclimated => &mut self.cold_acclimated,
        }
    }
}
