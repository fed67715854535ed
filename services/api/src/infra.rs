use metrics_exporter_prometheus::PrometheusHandle;
use prakriti::constitution::ConstitutionScorer;
use prakriti::patients::{PatientId, PatientRecord, PatientRepository, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scorer: Arc<ConstitutionScorer>,
}

/// Process-local patient store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPatientRepository {
    records: Arc<Mutex<HashMap<PatientId, PatientRecord>>>,
}

impl InMemoryPatientRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PatientId, PatientRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("patient store lock poisoned".to_string()))
    }
}

impl PatientRepository for InMemoryPatientRepository {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PatientRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
