use super::domain::{PatientId, PatientRecord};

/// Storage abstraction owned by the surrounding application.
///
/// The scoring core never reads or writes patients itself; the assessment
/// service hands finished records to whichever store implements this trait.
pub trait PatientRepository: Send + Sync {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError>;
    fn update(&self, record: PatientRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
