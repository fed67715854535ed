use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{
    Appetite, BodyFrame, BowelPattern, Digestion, Dosha, EmotionalTendency, EnergyPattern,
    FoodPreference, HairType, SkinType, SleepPattern, StressLevel, StressResponse,
    TemperaturePreference,
};

/// Scored questions, used as weight table keys and in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Age,
    Sex,
    BodyWeight,
    BodyFrame,
    SkinType,
    HairType,
    BowelPattern,
    SleepPattern,
    Appetite,
    Digestion,
    StressLevel,
    StressResponse,
    EnergyPattern,
    TemperaturePreference,
    EmotionalTendency,
    MedicalHistory,
    FoodPreference,
}

impl Question {
    pub fn label(&self) -> &'static str {
        match self {
            Question::Age => "age",
            Question::Sex => "sex",
            Question::BodyWeight => "body weight",
            Question::BodyFrame => "body frame",
            Question::SkinType => "skin type",
            Question::HairType => "hair type",
            Question::BowelPattern => "bowel pattern",
            Question::SleepPattern => "sleep pattern",
            Question::Appetite => "appetite",
            Question::Digestion => "digestion",
            Question::StressLevel => "stress level",
            Question::StressResponse => "stress response",
            Question::EnergyPattern => "energy pattern",
            Question::TemperaturePreference => "temperature preference",
            Question::EmotionalTendency => "emotional tendency",
            Question::MedicalHistory => "medical history",
            Question::FoodPreference => "food preference",
        }
    }
}

/// A single weighted push toward one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Increment {
    pub category: Dosha,
    pub weight: u32,
}

/// Age brackets: young leans Vata, middle Pitta, older Kapha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBrackets {
    pub young_below: u32,
    pub older_from: u32,
    pub weight: u32,
}

impl AgeBrackets {
    pub fn category(&self, age: u32) -> Dosha {
        if age < self.young_below {
            Dosha::Vata
        } else if age >= self.older_from {
            Dosha::Kapha
        } else {
            Dosha::Pitta
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SexWeights {
    pub male: Option<Increment>,
    pub female: Option<Increment>,
}

/// Body weight brackets in kilograms. Bounds are exclusive on both ends of
/// the medium bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightBrackets {
    pub light_below_kg: f32,
    pub heavy_above_kg: f32,
    pub light: u32,
    pub medium: u32,
    pub heavy: u32,
}

impl BodyWeightBrackets {
    pub fn increment(&self, weight_kg: f32) -> Increment {
        if weight_kg < self.light_below_kg {
            Increment {
                category: Dosha::Vata,
                weight: self.light,
            }
        } else if weight_kg > self.heavy_above_kg {
            Increment {
                category: Dosha::Kapha,
                weight: self.heavy,
            }
        } else {
            Increment {
                category: Dosha::Pitta,
                weight: self.medium,
            }
        }
    }
}

/// Free-text keywords that push toward a category when any of them appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub category: Dosha,
    pub weight: u32,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    /// Case-insensitive substring match; returns the first keyword found.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| {
                let needle = keyword.trim().to_lowercase();
                !needle.is_empty() && haystack.contains(&needle)
            })
            .map(String::as_str)
    }
}

/// Mapping from answered questions to per-category increments.
///
/// The table only decides magnitudes; which category an option leans toward
/// is fixed by [`Categorized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    #[serde(default)]
    pub age: Option<AgeBrackets>,
    #[serde(default)]
    pub sex: SexWeights,
    #[serde(default)]
    pub body_weight: Option<BodyWeightBrackets>,
    #[serde(default)]
    pub questions: BTreeMap<Question, u32>,
    #[serde(default)]
    pub keyword_groups: Vec<KeywordGroup>,
    #[serde(default)]
    pub food_preference: u32,
}

impl WeightTable {
    /// Demographic-weighted table used when a patient is registered.
    pub fn intake() -> Self {
        let questions = BTreeMap::from([
            (Question::BodyFrame, 3),
            (Question::SkinType, 5),
            (Question::HairType, 5),
            (Question::BowelPattern, 15),
            (Question::SleepPattern, 15),
            (Question::Appetite, 10),
            (Question::Digestion, 5),
            (Question::StressLevel, 10),
            (Question::StressResponse, 5),
            (Question::EnergyPattern, 5),
            (Question::TemperaturePreference, 5),
        ]);

        Self {
            age: Some(AgeBrackets {
                young_below: 30,
                older_from: 50,
                weight: 10,
            }),
            sex: SexWeights {
                male: Some(Increment {
                    category: Dosha::Pitta,
                    weight: 5,
                }),
                female: Some(Increment {
                    category: Dosha::Kapha,
                    weight: 5,
                }),
            },
            body_weight: Some(BodyWeightBrackets {
                light_below_kg: 60.0,
                heavy_above_kg: 80.0,
                light: 15,
                medium: 10,
                heavy: 15,
            }),
            questions,
            keyword_groups: vec![
                keyword_group(
                    Dosha::Vata,
                    &[
                        "dry",
                        "constipation",
                        "anxiety",
                        "insomnia",
                        "irregular",
                        "arthritis",
                        "tremor",
                    ],
                ),
                keyword_group(
                    Dosha::Pitta,
                    &[
                        "inflammation",
                        "acidity",
                        "heartburn",
                        "ulcer",
                        "rash",
                        "fever",
                        "heat",
                    ],
                ),
                keyword_group(
                    Dosha::Kapha,
                    &[
                        "congestion",
                        "heaviness",
                        "lethargy",
                        "asthma",
                        "sinus",
                        "obesity",
                        "diabetes",
                    ],
                ),
            ],
            food_preference: 5,
        }
    }

    /// Constitutional questionnaire used by the standalone assessment.
    pub fn assessment() -> Self {
        let questions = BTreeMap::from([
            (Question::BodyFrame, 3),
            (Question::SkinType, 2),
            (Question::Appetite, 2),
            (Question::Digestion, 2),
            (Question::SleepPattern, 2),
            (Question::EnergyPattern, 2),
            (Question::StressResponse, 2),
            (Question::TemperaturePreference, 2),
            (Question::EmotionalTendency, 2),
        ]);

        Self {
            age: None,
            sex: SexWeights::default(),
            body_weight: None,
            questions,
            keyword_groups: Vec::new(),
            food_preference: 0,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WeightTableError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn question_weight(&self, question: Question) -> u32 {
        self.questions.get(&question).copied().unwrap_or(0)
    }
}

fn keyword_group(category: Dosha, keywords: &[&str]) -> KeywordGroup {
    KeywordGroup {
        category,
        weight: 10,
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

/// Named presets selectable through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    #[default]
    Intake,
    Assessment,
}

impl WeightProfile {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "intake" | "simple" | "registration" => Some(Self::Intake),
            "assessment" | "elaborate" | "prakriti" => Some(Self::Assessment),
            _ => None,
        }
    }

    pub fn table(&self) -> WeightTable {
        match self {
            WeightProfile::Intake => WeightTable::intake(),
            WeightProfile::Assessment => WeightTable::assessment(),
        }
    }
}

impl fmt::Display for WeightProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightProfile::Intake => f.write_str("intake"),
            WeightProfile::Assessment => f.write_str("assessment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeightTableError {
    #[error("failed to read weight table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid weight table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Category an answered option leans toward, independent of magnitude.
pub trait Categorized {
    const QUESTION: Question;

    fn category(&self) -> Dosha;
}

impl Categorized for BodyFrame {
    const QUESTION: Question = Question::BodyFrame;

    fn category(&self) -> Dosha {
        match self {
            BodyFrame::Thin => Dosha::Vata,
            BodyFrame::Medium => Dosha::Pitta,
            BodyFrame::Heavy => Dosha::Kapha,
        }
    }
}

impl Categorized for SkinType {
    const QUESTION: Question = Question::SkinType;

    fn category(&self) -> Dosha {
        match self {
            SkinType::Dry => Dosha::Vata,
            SkinType::Oily => Dosha::Pitta,
            SkinType::Normal => Dosha::Kapha,
        }
    }
}

impl Categorized for HairType {
    const QUESTION: Question = Question::HairType;

    fn category(&self) -> Dosha {
        match self {
            HairType::Dry => Dosha::Vata,
            HairType::Fine => Dosha::Pitta,
            HairType::Thick => Dosha::Kapha,
        }
    }
}

impl Categorized for BowelPattern {
    const QUESTION: Question = Question::BowelPattern;

    fn category(&self) -> Dosha {
        match self {
            BowelPattern::Irregular | BowelPattern::Constipated => Dosha::Vata,
            BowelPattern::Loose => Dosha::Pitta,
            BowelPattern::Regular => Dosha::Kapha,
        }
    }
}

impl Categorized for SleepPattern {
    const QUESTION: Question = Question::SleepPattern;

    fn category(&self) -> Dosha {
        match self {
            SleepPattern::Light | SleepPattern::Insomnia => Dosha::Vata,
            SleepPattern::Disturbed | SleepPattern::Moderate => Dosha::Pitta,
            SleepPattern::Sound => Dosha::Kapha,
        }
    }
}

impl Categorized for Appetite {
    const QUESTION: Question = Question::Appetite;

    fn category(&self) -> Dosha {
        match self {
            Appetite::Irregular => Dosha::Vata,
            Appetite::Strong => Dosha::Pitta,
            Appetite::Moderate | Appetite::Poor => Dosha::Kapha,
        }
    }
}

impl Categorized for Digestion {
    const QUESTION: Question = Question::Digestion;

    fn category(&self) -> Dosha {
        match self {
            Digestion::Irregular => Dosha::Vata,
            Digestion::Strong => Dosha::Pitta,
            Digestion::Slow => Dosha::Kapha,
        }
    }
}

impl Categorized for StressLevel {
    const QUESTION: Question = Question::StressLevel;

    fn category(&self) -> Dosha {
        match self {
            StressLevel::High | StressLevel::Chronic => Dosha::Vata,
            StressLevel::Moderate => Dosha::Pitta,
            StressLevel::Low => Dosha::Kapha,
        }
    }
}

impl Categorized for StressResponse {
    const QUESTION: Question = Question::StressResponse;

    fn category(&self) -> Dosha {
        match self {
            StressResponse::Anxious => Dosha::Vata,
            StressResponse::Irritable => Dosha::Pitta,
            StressResponse::Calm => Dosha::Kapha,
        }
    }
}

impl Categorized for EnergyPattern {
    const QUESTION: Question = Question::EnergyPattern;

    fn category(&self) -> Dosha {
        match self {
            EnergyPattern::Variable => Dosha::Vata,
            EnergyPattern::Intense => Dosha::Pitta,
            EnergyPattern::Steady => Dosha::Kapha,
        }
    }
}

impl Categorized for TemperaturePreference {
    const QUESTION: Question = Question::TemperaturePreference;

    fn category(&self) -> Dosha {
        match self {
            TemperaturePreference::Warm => Dosha::Vata,
            TemperaturePreference::Cool => Dosha::Pitta,
            TemperaturePreference::Moderate => Dosha::Kapha,
        }
    }
}

impl Categorized for EmotionalTendency {
    const QUESTION: Question = Question::EmotionalTendency;

    fn category(&self) -> Dosha {
        match self {
            EmotionalTendency::Creative => Dosha::Vata,
            EmotionalTendency::Focused => Dosha::Pitta,
            EmotionalTendency::Stable => Dosha::Kapha,
        }
    }
}

impl Categorized for FoodPreference {
    const QUESTION: Question = Question::FoodPreference;

    fn category(&self) -> Dosha {
        match self {
            FoodPreference::Salty
            | FoodPreference::Bitter
            | FoodPreference::Astringent
            | FoodPreference::HotFoods => Dosha::Vata,
            FoodPreference::Sour
            | FoodPreference::Pungent
            | FoodPreference::Spicy
            | FoodPreference::ColdFoods => Dosha::Pitta,
            FoodPreference::Sweet => Dosha::Kapha,
        }
    }
}
