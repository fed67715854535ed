use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::constitution::{AssessmentView, IntakeAnswers};

use super::domain::{PatientId, PatientSubmission, PatientView};
use super::repository::{PatientRepository, RepositoryError};
use super::service::{AssessedPatient, PatientAssessmentService, PatientServiceError};

/// Router builder exposing registration, lookup, and reassessment endpoints.
pub fn patient_router<R>(service: Arc<PatientAssessmentService<R>>) -> Router
where
    R: PatientRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/patients",
            post(register_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/patients/:patient_id", get(fetch_handler::<R>))
        .route(
            "/api/v1/patients/:patient_id/assessment",
            post(reassess_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct AssessedPatientResponse {
    pub patient: PatientView,
    pub assessment: AssessmentView,
}

impl AssessedPatientResponse {
    fn build<R>(service: &PatientAssessmentService<R>, assessed: &AssessedPatient) -> Self
    where
        R: PatientRepository + 'static,
    {
        Self {
            patient: assessed.record.view(),
            assessment: assessed.report.view(service.scorer().config()),
        }
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<PatientAssessmentService<R>>>,
    axum::Json(submission): axum::Json<PatientSubmission>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.register(submission) {
        Ok(assessed) => {
            let body = AssessedPatientResponse::build(&service, &assessed);
            (StatusCode::CREATED, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<PatientAssessmentService<R>>>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<PatientView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<PatientAssessmentService<R>>>,
    Path(patient_id): Path<String>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.get(&PatientId(patient_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reassess_handler<R>(
    State(service): State<Arc<PatientAssessmentService<R>>>,
    Path(patient_id): Path<String>,
    axum::Json(answers): axum::Json<IntakeAnswers>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.reassess(&PatientId(patient_id), answers) {
        Ok(assessed) => {
            let body = AssessedPatientResponse::build(&service, &assessed);
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: PatientServiceError) -> Response {
    let status = match &error {
        PatientServiceError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PatientServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PatientServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PatientServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
