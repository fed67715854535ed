use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The three constitutional categories a patient's profile is distributed across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    pub fn label(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_option(raw).as_str() {
            "vata" | "a" => Some(Dosha::Vata),
            "pitta" | "b" => Some(Dosha::Pitta),
            "kapha" | "c" => Some(Dosha::Kapha),
            _ => None,
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed set of options for a single intake question.
///
/// Parsing is lenient on case, surrounding whitespace, and spaces versus
/// underscores so that values coming straight from form labels ("Cold foods")
/// resolve to the same option as their canonical key (`cold_foods`).
pub trait AnswerOption: Sized + Copy {
    fn parse(raw: &str) -> Option<Self>;
    fn as_str(&self) -> &'static str;
}

pub(crate) fn normalize_option(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch == ' ' || ch == '-' { '_' } else { ch })
        .collect()
}

macro_rules! answer_option {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $canonical:literal $(| $alias:literal)*,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl AnswerOption for $name {
            fn parse(raw: &str) -> Option<Self> {
                match normalize_option(raw).as_str() {
                    $($canonical $(| $alias)* => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $canonical,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$name as AnswerOption>::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unrecognized {} option '{}'",
                        stringify!($name),
                        raw
                    ))
                })
            }
        }
    };
}

answer_option! {
    /// Sex category captured during registration.
    Sex {
        Male => "male" | "m",
        Female => "female" | "f",
        Other => "other" | "unspecified",
    }
}

answer_option! {
    /// Overall body frame as self-reported on the assessment.
    BodyFrame {
        Thin => "thin" | "lean",
        Medium => "medium" | "athletic",
        Heavy => "heavy" | "solid",
    }
}

answer_option! {
    SkinType {
        Dry => "dry" | "rough",
        Oily => "oily" | "warm",
        Normal => "normal" | "smooth",
    }
}

answer_option! {
    HairType {
        Dry => "dry" | "brittle",
        Fine => "fine",
        Thick => "thick" | "lustrous",
    }
}

answer_option! {
    BowelPattern {
        Regular => "regular",
        Irregular => "irregular",
        Constipated => "constipated",
        Loose => "loose" | "frequent",
    }
}

answer_option! {
    SleepPattern {
        Sound => "sound" | "deep",
        Light => "light",
        Moderate => "moderate",
        Disturbed => "disturbed",
        Insomnia => "insomnia",
    }
}

answer_option! {
    Appetite {
        Strong => "strong" | "good",
        Moderate => "moderate" | "steady",
        Poor => "poor" | "low",
        Irregular => "irregular" | "variable",
    }
}

answer_option! {
    Digestion {
        Irregular => "irregular",
        Strong => "strong",
        Slow => "slow",
    }
}

answer_option! {
    StressLevel {
        Low => "low",
        Moderate => "moderate",
        High => "high",
        Chronic => "chronic",
    }
}

answer_option! {
    /// How the patient tends to react when under pressure.
    StressResponse {
        Anxious => "anxious",
        Irritable => "irritable",
        Calm => "calm",
    }
}

answer_option! {
    EnergyPattern {
        Variable => "variable",
        Intense => "intense",
        Steady => "steady",
    }
}

answer_option! {
    TemperaturePreference {
        Warm => "warm",
        Cool => "cool",
        Moderate => "moderate",
    }
}

answer_option! {
    EmotionalTendency {
        Creative => "creative",
        Focused => "focused",
        Stable => "stable",
    }
}

answer_option! {
    /// Taste and temperature preferences offered as a multi-select.
    FoodPreference {
        Sweet => "sweet",
        Sour => "sour",
        Salty => "salty",
        Pungent => "pungent",
        Bitter => "bitter",
        Astringent => "astringent",
        Spicy => "spicy",
        ColdFoods => "cold_foods" | "cold",
        HotFoods => "hot_foods" | "hot",
    }
}

/// Self-reported intake questionnaire submitted once per assessment.
///
/// Every field is optional. Categorical answers that do not match a known
/// option are kept as "unanswered" rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeAnswers {
    #[serde(deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(alias = "gender", deserialize_with = "lenient_option")]
    pub sex: Option<Sex>,
    #[serde(alias = "weight", deserialize_with = "lenient_measure")]
    pub weight_kg: Option<f32>,
    #[serde(alias = "height", deserialize_with = "lenient_measure")]
    pub height_cm: Option<f32>,
    #[serde(
        alias = "bodyType",
        alias = "body_type",
        deserialize_with = "lenient_option"
    )]
    pub body_frame: Option<BodyFrame>,
    #[serde(alias = "skinType", deserialize_with = "lenient_option")]
    pub skin_type: Option<SkinType>,
    #[serde(alias = "hairType", deserialize_with = "lenient_option")]
    pub hair_type: Option<HairType>,
    #[serde(
        alias = "bowelPattern",
        alias = "bowelHabits",
        alias = "bowel_habits",
        deserialize_with = "lenient_option"
    )]
    pub bowel_pattern: Option<BowelPattern>,
    #[serde(alias = "sleepPattern", deserialize_with = "lenient_option")]
    pub sleep_pattern: Option<SleepPattern>,
    #[serde(deserialize_with = "lenient_option")]
    pub appetite: Option<Appetite>,
    #[serde(deserialize_with = "lenient_option")]
    pub digestion: Option<Digestion>,
    #[serde(alias = "stressLevel", deserialize_with = "lenient_option")]
    pub stress_level: Option<StressLevel>,
    #[serde(alias = "stressResponse", deserialize_with = "lenient_option")]
    pub stress_response: Option<StressResponse>,
    #[serde(
        alias = "energyLevel",
        alias = "energy_level",
        deserialize_with = "lenient_option"
    )]
    pub energy_pattern: Option<EnergyPattern>,
    #[serde(
        alias = "weatherPreference",
        alias = "weather_preference",
        deserialize_with = "lenient_option"
    )]
    pub temperature_preference: Option<TemperaturePreference>,
    #[serde(alias = "emotionalTendency", deserialize_with = "lenient_option")]
    pub emotional_tendency: Option<EmotionalTendency>,
    #[serde(alias = "medicalConditions", alias = "medical_conditions")]
    pub medical_history: Option<String>,
    #[serde(alias = "foodPreferences", deserialize_with = "lenient_list")]
    pub food_preferences: Vec<FoodPreference>,
    #[serde(alias = "physicalActivity")]
    pub physical_activity: Option<String>,
    #[serde(alias = "currentDiet")]
    pub current_diet: Option<String>,
    #[serde(alias = "digestiveIssues")]
    pub digestive_issues: Vec<String>,
}

impl IntakeAnswers {
    /// True when no scored question carries an answer.
    pub fn is_blank(&self) -> bool {
        self.age.is_none()
            && self.sex.is_none()
            && self.weight_kg.is_none()
            && self.body_frame.is_none()
            && self.skin_type.is_none()
            && self.hair_type.is_none()
            && self.bowel_pattern.is_none()
            && self.sleep_pattern.is_none()
            && self.appetite.is_none()
            && self.digestion.is_none()
            && self.stress_level.is_none()
            && self.stress_response.is_none()
            && self.energy_pattern.is_none()
            && self.temperature_preference.is_none()
            && self.emotional_tendency.is_none()
            && self
                .medical_history
                .as_deref()
                .map(|text| text.trim().is_empty())
                .unwrap_or(true)
            && self.food_preferences.is_empty()
    }
}

/// Accepts either a JSON number or the string a form field produced.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl NumberOrText {
    fn into_f64(self) -> Option<f64> {
        let value = match self {
            NumberOrText::Number(value) => value,
            NumberOrText::Text(text) => text.trim().parse::<f64>().ok()?,
            NumberOrText::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

fn measure_from(value: f64) -> Option<f32> {
    (value > 0.0).then_some(value as f32)
}

fn age_from(value: f64) -> Option<u32> {
    (value >= 0.0 && value < f64::from(u32::MAX)).then_some(value as u32)
}

pub(crate) fn parse_measure(raw: &str) -> Option<f32> {
    NumberOrText::Text(raw.to_string())
        .into_f64()
        .and_then(measure_from)
}

pub(crate) fn parse_age(raw: &str) -> Option<u32> {
    NumberOrText::Text(raw.to_string())
        .into_f64()
        .and_then(age_from)
}

/// A categorical answer as submitted; anything but a string counts as unanswered.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerText {
    Text(String),
    Other(IgnoredAny),
}

impl AnswerText {
    fn as_text(&self) -> Option<&str> {
        match self {
            AnswerText::Text(text) => Some(text),
            AnswerText::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerList {
    Many(Vec<AnswerText>),
    One(AnswerText),
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: AnswerOption,
{
    let raw = Option::<AnswerText>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(AnswerText::as_text).and_then(T::parse))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: AnswerOption + PartialEq,
{
    let raw = match Option::<AnswerList>::deserialize(deserializer)? {
        Some(AnswerList::Many(values)) => values,
        Some(AnswerList::One(value)) => vec![value],
        None => Vec::new(),
    };
    let mut selected = Vec::new();
    for option in raw
        .iter()
        .filter_map(|value| value.as_text())
        .filter_map(|value| T::parse(value))
    {
        if !selected.contains(&option) {
            selected.push(option);
        }
    }
    Ok(selected)
}

fn lenient_measure<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(NumberOrText::into_f64).and_then(measure_from))
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(NumberOrText::into_f64).and_then(age_from))
}
