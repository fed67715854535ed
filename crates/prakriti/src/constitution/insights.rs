use serde::Serialize;

use super::domain::{Appetite, BowelPattern, Dosha, IntakeAnswers, StressLevel};

/// Display-only physical indicators derived alongside the constitution.
///
/// None of these values feed back into the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMetrics {
    pub bmi: Option<f32>,
    pub bmi_category: Option<BmiCategory>,
    pub digestive_fire: Option<Strength>,
    pub vitality: Option<Level>,
    pub toxin_load: Option<ToxinLoad>,
}

impl BodyMetrics {
    pub fn from_answers(answers: &IntakeAnswers) -> Self {
        let bmi = body_mass_index(answers.weight_kg, answers.height_cm);
        Self {
            bmi,
            bmi_category: bmi.map(BmiCategory::from_bmi),
            digestive_fire: answers.appetite.map(|appetite| match appetite {
                Appetite::Strong => Strength::Strong,
                Appetite::Poor => Strength::Weak,
                Appetite::Moderate | Appetite::Irregular => Strength::Moderate,
            }),
            vitality: answers.stress_level.map(|level| match level {
                StressLevel::Low => Level::High,
                StressLevel::High | StressLevel::Chronic => Level::Low,
                StressLevel::Moderate => Level::Medium,
            }),
            toxin_load: answers.bowel_pattern.map(|pattern| match pattern {
                BowelPattern::Regular => ToxinLoad::Low,
                _ => ToxinLoad::Moderate,
            }),
        }
    }
}

/// Weight over height squared, rounded to one decimal place.
pub fn body_mass_index(weight_kg: Option<f32>, height_cm: Option<f32>) -> Option<f32> {
    let weight = weight_kg.filter(|value| *value > 0.0)?;
    let height_m = height_cm.filter(|value| *value > 0.0)? / 100.0;
    let bmi = weight / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f32) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// Digestive fire (agni).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

/// Vitality (ojas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Accumulated toxins (ama); irregular elimination raises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToxinLoad {
    Low,
    Moderate,
}

/// Typical build and metabolism associated with a leading category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstitutionalBuild {
    pub metabolic_rate: &'static str,
    pub body_frame: &'static str,
}

impl ConstitutionalBuild {
    pub fn for_dosha(dosha: Dosha) -> Self {
        match dosha {
            Dosha::Vata => Self {
                metabolic_rate: "High (Variable)",
                body_frame: "Ectomorphic - Lean build",
            },
            Dosha::Pitta => Self {
                metabolic_rate: "High (Steady)",
                body_frame: "Mesomorphic - Athletic build",
            },
            Dosha::Kapha => Self {
                metabolic_rate: "Slow (Steady)",
                body_frame: "Endomorphic - Solid build",
            },
        }
    }
}
