use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{parse_age, parse_measure, AnswerOption, FoodPreference, IntakeAnswers};

/// One intake form recovered from a spreadsheet export.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeRow {
    pub line: u64,
    pub name: Option<String>,
    pub answers: IntakeAnswers,
}

#[derive(Debug)]
pub enum IntakeImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for IntakeImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeImportError::Io(err) => write!(f, "failed to read intake export: {}", err),
            IntakeImportError::Csv(err) => write!(f, "invalid intake CSV data: {}", err),
        }
    }
}

impl std::error::Error for IntakeImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeImportError::Io(err) => Some(err),
            IntakeImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for IntakeImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IntakeImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads intake forms exported as CSV, one patient per row.
///
/// Columns are matched by header name; missing columns and empty cells are
/// treated as unanswered. Multi-select cells separate options with `;`.
pub struct IntakeImporter;

impl IntakeImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IntakeRow>, IntakeImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<IntakeRow>, IntakeImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();

        let headers = csv_reader.headers()?.clone();

        for record in csv_reader.records() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or_default();
            let row: IntakeCsvRow = record.deserialize(Some(&headers))?;
            rows.push(row.into_intake(line));
        }

        Ok(rows)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IntakeCsvRow {
    #[serde(alias = "full_name", deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(alias = "gender", deserialize_with = "empty_string_as_none")]
    sex: Option<String>,
    #[serde(alias = "weight", deserialize_with = "empty_string_as_none")]
    weight_kg: Option<String>,
    #[serde(alias = "height", deserialize_with = "empty_string_as_none")]
    height_cm: Option<String>,
    #[serde(alias = "body_type", deserialize_with = "empty_string_as_none")]
    body_frame: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    skin_type: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    hair_type: Option<String>,
    #[serde(alias = "bowel_habits", deserialize_with = "empty_string_as_none")]
    bowel_pattern: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    sleep_pattern: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    appetite: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    digestion: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    stress_level: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    stress_response: Option<String>,
    #[serde(alias = "energy_level", deserialize_with = "empty_string_as_none")]
    energy_pattern: Option<String>,
    #[serde(
        alias = "weather_preference",
        deserialize_with = "empty_string_as_none"
    )]
    temperature_preference: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    emotional_tendency: Option<String>,
    #[serde(
        alias = "medical_conditions",
        deserialize_with = "empty_string_as_none"
    )]
    medical_history: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    food_preferences: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    physical_activity: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    current_diet: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    digestive_issues: Option<String>,
}

impl IntakeCsvRow {
    fn into_intake(self, line: u64) -> IntakeRow {
        let answers = IntakeAnswers {
            age: self.age.as_deref().and_then(parse_age),
            sex: option(&self.sex),
            weight_kg: self.weight_kg.as_deref().and_then(parse_measure),
            height_cm: self.height_cm.as_deref().and_then(parse_measure),
            body_frame: option(&self.body_frame),
            skin_type: option(&self.skin_type),
            hair_type: option(&self.hair_type),
            bowel_pattern: option(&self.bowel_pattern),
            sleep_pattern: option(&self.sleep_pattern),
            appetite: option(&self.appetite),
            digestion: option(&self.digestion),
            stress_level: option(&self.stress_level),
            stress_response: option(&self.stress_response),
            energy_pattern: option(&self.energy_pattern),
            temperature_preference: option(&self.temperature_preference),
            emotional_tendency: option(&self.emotional_tendency),
            medical_history: self.medical_history,
            food_preferences: multi_select(self.food_preferences.as_deref())
                .filter_map(FoodPreference::parse)
                .fold(Vec::new(), |mut selected, option| {
                    if !selected.contains(&option) {
                        selected.push(option);
                    }
                    selected
                }),
            physical_activity: self.physical_activity,
            current_diet: self.current_diet,
            digestive_issues: multi_select(self.digestive_issues.as_deref())
                .map(str::to_string)
                .collect(),
        };

        IntakeRow {
            line,
            name: self.name,
            answers,
        }
    }
}

fn option<T: AnswerOption>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(T::parse)
}

fn multi_select(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
