use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::constitution::domain::{BowelPattern, Sex, SleepPattern};
use crate::constitution::{ConstitutionScorer, IntakeAnswers};
use crate::patients::domain::{PatientId, PatientRecord, PatientSubmission};
use crate::patients::repository::{PatientRepository, RepositoryError};
use crate::patients::PatientAssessmentService;

/// Young, light, constipated, light sleeper: Vata 55, Kapha 5.
pub(super) fn vata_answers() -> IntakeAnswers {
    IntakeAnswers {
        age: Some(25),
        sex: Some(Sex::Female),
        weight_kg: Some(55.0),
        height_cm: Some(165.0),
        bowel_pattern: Some(BowelPattern::Constipated),
        sleep_pattern: Some(SleepPattern::Light),
        ..IntakeAnswers::default()
    }
}

/// Older, heavy, male: Kapha 25, Pitta 5.
pub(super) fn kapha_answers() -> IntakeAnswers {
    IntakeAnswers {
        age: Some(55),
        sex: Some(Sex::Male),
        weight_kg: Some(90.0),
        ..IntakeAnswers::default()
    }
}

pub(super) fn submission() -> PatientSubmission {
    PatientSubmission {
        full_name: Some("Asha Rao".to_string()),
        email: Some("asha@example.com".to_string()),
        phone: None,
        chief_complaints: Some("Poor sleep".to_string()),
        answers: vata_answers(),
    }
}

pub(super) fn build_service() -> (
    PatientAssessmentService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service =
        PatientAssessmentService::new(repository.clone(), Arc::new(ConstitutionScorer::default()));
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<PatientId, PatientRecord>>>,
}

impl PatientRepository for MemoryRepository {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PatientRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl PatientRepository for UnavailableRepository {
    fn insert(&self, _record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: PatientRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
