//! Body mass index

use crate::tools::input::round_to;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilograms and centimeters
    Metric,
    /// Pounds and inches
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn translation_key(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "tools.bmi.category.underweight",
            BmiCategory::Normal => "tools.bmi.category.normal",
            BmiCategory::Overweight => "tools.bmi.category.overweight",
            BmiCategory::Obese => "tools.bmi.category.obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    /// Rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
}

// Plausibility limits in the input units
const MAX_WEIGHT_KG: f64 = 700.0;
const MAX_HEIGHT_CM: f64 = 300.0;
const MAX_WEIGHT_LB: f64 = 1500.0;
const MAX_HEIGHT_IN: f64 = 120.0;

/// BMI from weight and height; `None` for non-positive or implausible input
pub fn calculate(weight: f64, height: f64, system: UnitSystem) -> Option<BmiResult> {
    let (max_weight, max_height) = match system {
        UnitSystem::Metric => (MAX_WEIGHT_KG, MAX_HEIGHT_CM),
        UnitSystem::Imperial => (MAX_WEIGHT_LB, MAX_HEIGHT_IN),
    };
    if !(weight > 0.0 && weight <= max_weight && height > 0.0 && height <= max_height) {
        return None;
    }

    let bmi = match system {
        UnitSystem::Metric => {
            let meters = height / 100.0;
            weight / (meters * meters)
        }
        UnitSystem::Imperial => 703.0 * weight / (height * height),
    };

    Some(BmiResult {
        bmi: round_to(bmi, 1),
        category: BmiCategory::from_bmi(bmi),
    })
}
