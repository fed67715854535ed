use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use prakriti::constitution::{ConstitutionScorer, ScorerConfig, WeightProfile};
use prakriti::patients::{
    patient_router, PatientAssessmentService, PatientId, PatientRecord, PatientRepository,
    RepositoryError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Default)]
struct MemoryStore {
    records: Mutex<HashMap<PatientId, PatientRecord>>,
}

impl PatientRepository for MemoryStore {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PatientRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect())
    }
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json payload")
    };
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn register_fetch_and_reassess_over_http() {
    let store = Arc::new(MemoryStore::default());
    let service = PatientAssessmentService::new(store.clone(), Arc::new(ConstitutionScorer::default()));
    let router = patient_router(Arc::new(service));

    let (status, created) = send(
        &router,
        post(
            "/api/v1/patients",
            json!({
                "full_name": "Dev Patel",
                "age": 35,
                "gender": "male",
                "weight": "74",
                "height": "178",
                "appetite": "strong",
                "medicalHistory": "Recurring heartburn"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["patient"]["patient_id"]
        .as_str()
        .expect("patient id")
        .to_string();
    assert_eq!(created["patient"]["constitution"]["dominant_dosha"], "pitta");
    assert_eq!(created["patient"]["constitution"]["pitta_percentage"], 100);
    assert_eq!(created["patient"]["bmi"], json!(23.4));

    let (status, fetched) = send(&router, get(&format!("/api/v1/patients/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["full_name"], "Dev Patel");

    let (status, reassessed) = send(
        &router,
        post(
            &format!("/api/v1/patients/{id}/assessment"),
            json!({ "sleepPattern": "insomnia", "bowelPattern": "irregular" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reassessed["patient"]["constitution"]["dominant_dosha"], "vata");
    assert_eq!(reassessed["assessment"]["summary"]["constitution"], "Vata");

    let stored = store
        .fetch(&PatientId(id))
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(
        stored.constitution.map(|fields| fields.vata_percentage),
        Some(100)
    );
    // Measurements from registration survive a questionnaire that omits them.
    assert_eq!(stored.profile.weight_kg, Some(74.0));

    let (status, listed) = send(&router, get("/api/v1/patients")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_patients_and_incomplete_forms_are_rejected() {
    let service = PatientAssessmentService::new(
        Arc::new(MemoryStore::default()),
        Arc::new(ConstitutionScorer::new(
            WeightProfile::Assessment.table(),
            ScorerConfig::default(),
        )),
    );
    let router = patient_router(Arc::new(service));

    let (status, _) = send(&router, get("/api/v1/patients/pat-404404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        post("/api/v1/patients/pat-404404/assessment", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &router,
        post("/api/v1/patients", json!({ "name": "No Age", "gender": "female" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().expect("message").contains("age"));
}
