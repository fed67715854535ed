//! Patient records as seen from the scorer: registration, reassessment, and the
//! four constitution fields persisted per patient.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ConstitutionFields, PatientId, PatientProfile, PatientRecord, PatientSubmission, PatientView,
};
pub use repository::{PatientRepository, RepositoryError};
pub use router::{patient_router, AssessedPatientResponse};
pub use service::{AssessedPatient, PatientAssessmentService, PatientServiceError};
