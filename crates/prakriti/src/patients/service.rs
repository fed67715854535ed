use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::constitution::{AssessmentReport, ConstitutionScorer, IntakeAnswers};

use super::domain::{
    ConstitutionFields, PatientId, PatientProfile, PatientRecord, PatientSubmission,
};
use super::repository::{PatientRepository, RepositoryError};

/// Registers patients, scores their intake, and persists the derived fields.
pub struct PatientAssessmentService<R> {
    repository: Arc<R>,
    scorer: Arc<ConstitutionScorer>,
}

static PATIENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_patient_id() -> PatientId {
    let id = PATIENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PatientId(format!("pat-{id:06}"))
}

/// A persisted record together with the full report it was derived from.
#[derive(Debug, Clone)]
pub struct AssessedPatient {
    pub record: PatientRecord,
    pub report: AssessmentReport,
}

impl<R> PatientAssessmentService<R>
where
    R: PatientRepository + 'static,
{
    pub fn new(repository: Arc<R>, scorer: Arc<ConstitutionScorer>) -> Self {
        Self { repository, scorer }
    }

    pub fn scorer(&self) -> &ConstitutionScorer {
        &self.scorer
    }

    /// Validate the registration form, score it, and store the new patient.
    pub fn register(
        &self,
        submission: PatientSubmission,
    ) -> Result<AssessedPatient, PatientServiceError> {
        let PatientSubmission {
            full_name,
            email,
            phone,
            chief_complaints,
            answers,
        } = submission;

        let full_name = full_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(PatientServiceError::MissingField("full_name"))?;
        if answers.age.is_none() {
            return Err(PatientServiceError::MissingField("age"));
        }
        if answers.sex.is_none() {
            return Err(PatientServiceError::MissingField("gender"));
        }

        let report = self.assess(&answers);
        let now = Utc::now();
        let record = PatientRecord {
            id: next_patient_id(),
            profile: PatientProfile {
                full_name,
                age: answers.age,
                gender: answers.sex,
                weight_kg: answers.weight_kg,
                height_cm: answers.height_cm,
                email,
                phone,
                medical_history: answers.medical_history.clone(),
                chief_complaints,
            },
            constitution: Some(ConstitutionFields::from(&report.result)),
            created_at: now,
            assessed_at: Some(now),
        };

        let record = self.repository.insert(record)?;
        info!(
            patient_id = %record.id.0,
            dominant = %report.result.dominant(),
            "patient registered"
        );

        Ok(AssessedPatient { record, report })
    }

    /// Score a fresh questionnaire for an existing patient and overwrite the stored fields.
    pub fn reassess(
        &self,
        id: &PatientId,
        answers: IntakeAnswers,
    ) -> Result<AssessedPatient, PatientServiceError> {
        let mut record = self.get(id)?;
        let report = self.assess(&answers);

        record.profile.refresh_from(&answers);
        record.constitution = Some(ConstitutionFields::from(&report.result));
        record.assessed_at = Some(Utc::now());

        self.repository.update(record.clone())?;
        info!(
            patient_id = %record.id.0,
            dominant = %report.result.dominant(),
            "patient reassessed"
        );

        Ok(AssessedPatient { record, report })
    }

    pub fn get(&self, id: &PatientId) -> Result<PatientRecord, PatientServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(PatientServiceError::Repository(RepositoryError::NotFound))
    }

    pub fn list(&self) -> Result<Vec<PatientRecord>, PatientServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(records)
    }

    fn assess(&self, answers: &IntakeAnswers) -> AssessmentReport {
        let report = AssessmentReport::generate(&self.scorer, answers);
        if report.result.is_fallback() {
            debug!(
                blank = answers.is_blank(),
                "no weighted answers supplied; using neutral constitution split"
            );
        }
        report
    }
}

/// Errors surfaced by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum PatientServiceError {
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
