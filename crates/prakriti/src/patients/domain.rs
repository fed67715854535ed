use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constitution::domain::Sex;
use crate::constitution::insights::body_mass_index;
use crate::constitution::{ConstitutionResult, Dosha, IntakeAnswers};

/// Identifier wrapper for registered patients.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Registration form: contact details plus the intake questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientSubmission {
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "chiefComplaints")]
    pub chief_complaints: Option<String>,
    #[serde(flatten)]
    pub answers: IntakeAnswers,
}

/// Demographic and contact details kept on the patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub full_name: String,
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    pub weight_kg: Option<f32>,
    pub height_cm: Option<f32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub medical_history: Option<String>,
    pub chief_complaints: Option<String>,
}

impl PatientProfile {
    /// Carries over measurements and history from a newer questionnaire.
    pub fn refresh_from(&mut self, answers: &IntakeAnswers) {
        if answers.age.is_some() {
            self.age = answers.age;
        }
        if answers.sex.is_some() {
            self.gender = answers.sex;
        }
        if answers.weight_kg.is_some() {
            self.weight_kg = answers.weight_kg;
        }
        if answers.height_cm.is_some() {
            self.height_cm = answers.height_cm;
        }
        if answers.medical_history.is_some() {
            self.medical_history = answers.medical_history.clone();
        }
    }
}

/// The four fields the scorer contributes to a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstitutionFields {
    pub vata_percentage: u8,
    pub pitta_percentage: u8,
    pub kapha_percentage: u8,
    pub dominant_dosha: Dosha,
}

impl From<&ConstitutionResult> for ConstitutionFields {
    fn from(result: &ConstitutionResult) -> Self {
        Self {
            vata_percentage: result.vata_percentage(),
            pitta_percentage: result.pitta_percentage(),
            kapha_percentage: result.kapha_percentage(),
            dominant_dosha: result.dominant(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub profile: PatientProfile,
    pub constitution: Option<ConstitutionFields>,
    pub created_at: DateTime<Utc>,
    pub assessed_at: Option<DateTime<Utc>>,
}

impl PatientRecord {
    pub fn view(&self) -> PatientView {
        PatientView {
            patient_id: self.id.clone(),
            full_name: self.profile.full_name.clone(),
            age: self.profile.age,
            gender: self.profile.gender,
            bmi: body_mass_index(self.profile.weight_kg, self.profile.height_cm),
            constitution: self.constitution,
            assessed_at: self.assessed_at,
        }
    }
}

/// Serializable snapshot returned by the HTTP endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientView {
    pub patient_id: PatientId,
    pub full_name: String,
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    pub bmi: Option<f32>,
    pub constitution: Option<ConstitutionFields>,
    pub assessed_at: Option<DateTime<Utc>>,
}
