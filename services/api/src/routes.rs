use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use prakriti::constitution::{
    AssessmentReport, AssessmentView, ConstitutionScorer, IntakeAnswers, IntakeImporter,
    WeightProfile,
};
use prakriti::error::AppError;
use prakriti::patients::{patient_router, PatientAssessmentService, PatientRepository};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::borrow::Cow;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) answers: IntakeAnswers,
    #[serde(default)]
    pub(crate) profile: Option<WeightProfile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) profile: Option<WeightProfile>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportResponse {
    pub(crate) profile: WeightProfile,
    pub(crate) rows: Vec<ImportedAssessment>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportedAssessment {
    pub(crate) line: u64,
    pub(crate) name: Option<String>,
    pub(crate) blank: bool,
    pub(crate) assessment: AssessmentView,
}

pub(crate) fn with_assessment_routes<R>(
    service: Arc<PatientAssessmentService<R>>,
) -> axum::Router
where
    R: PatientRepository + 'static,
{
    patient_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/constitution/score",
            axum::routing::post(score_endpoint),
        )
        .route(
            "/api/v1/constitution/import",
            axum::routing::post(import_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores answers without touching the patient store.
pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Json<AssessmentView> {
    let scorer = scorer_for(&state, payload.profile);
    let report = AssessmentReport::generate(&scorer, &payload.answers);
    Json(report.view(scorer.config()))
}

pub(crate) async fn import_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let ImportRequest { csv, profile } = payload;

    let rows = IntakeImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let scorer = scorer_for(&state, profile);
    let rows = rows
        .into_iter()
        .map(|row| ImportedAssessment {
            line: row.line,
            blank: row.answers.is_blank(),
            assessment: AssessmentReport::generate(&scorer, &row.answers).view(scorer.config()),
            name: row.name,
        })
        .collect();

    Ok(Json(ImportResponse {
        profile: profile.unwrap_or_default(),
        rows,
    }))
}

/// Uses the configured scorer unless the request names a preset profile.
fn scorer_for(state: &AppState, profile: Option<WeightProfile>) -> Cow<'_, ConstitutionScorer> {
    match profile {
        Some(profile) => Cow::Owned(ConstitutionScorer::new(
            profile.table(),
            state.scorer.config().clone(),
        )),
        None => Cow::Borrowed(state.scorer.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryPatientRepository;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use prakriti::constitution::Dosha;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            scorer: Arc::new(ConstitutionScorer::default()),
        }
    }

    fn app(state: AppState) -> axum::Router {
        let service = Arc::new(PatientAssessmentService::new(
            Arc::new(InMemoryPatientRepository::default()),
            state.scorer.clone(),
        ));
        with_assessment_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn score_endpoint_uses_configured_scorer() {
        let request = ScoreRequest {
            answers: IntakeAnswers {
                age: Some(22),
                weight_kg: Some(52.0),
                ..IntakeAnswers::default()
            },
            profile: None,
        };

        let Json(view) = score_endpoint(Extension(state(true)), Json(request)).await;

        assert_eq!(view.summary.dominant, Dosha::Vata);
        assert_eq!(view.summary.distribution[0].percentage, 100);
        assert!(!view.summary.neutral_fallback);
    }

    #[tokio::test]
    async fn score_endpoint_honours_requested_profile() {
        let request = ScoreRequest {
            answers: IntakeAnswers {
                age: Some(22),
                weight_kg: Some(52.0),
                ..IntakeAnswers::default()
            },
            profile: Some(WeightProfile::Assessment),
        };

        let Json(view) = score_endpoint(Extension(state(true)), Json(request)).await;

        assert!(view.summary.neutral_fallback);
        assert_eq!(view.summary.dominant, Dosha::Vata);
    }

    #[tokio::test]
    async fn import_endpoint_scores_each_row() {
        let request = ImportRequest {
            csv: "name,age,weight\nRavi,55,92\nMeera,24,50\nEmpty,,\n".to_string(),
            profile: None,
        };

        let Json(body) = import_endpoint(Extension(state(true)), Json(request))
            .await
            .expect("import succeeds");

        assert_eq!(body.profile, WeightProfile::Intake);
        assert_eq!(body.rows.len(), 3);
        assert_eq!(body.rows[0].name.as_deref(), Some("Ravi"));
        assert_eq!(body.rows[0].assessment.summary.dominant, Dosha::Kapha);
        assert_eq!(body.rows[1].assessment.summary.dominant, Dosha::Vata);
        assert!(!body.rows[0].blank);
        assert!(body.rows[2].blank);
        assert!(body.rows[2].assessment.summary.neutral_fallback);
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn score_route_accepts_camel_case_payloads() {
        let body = json!({
            "answers": { "bowelPattern": "loose", "appetite": "strong" },
            "profile": "intake"
        });

        let response = app(state(true))
            .oneshot(
                Request::post("/api/v1/constitution/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["summary"]["dominant"], "pitta");
        assert_eq!(payload["summary"]["constitution"], "Pitta");
        // Loose bowels (15) and strong appetite (10) both count toward Pitta.
        assert_eq!(payload["summary"]["distribution"][0]["category"], "pitta");
        assert_eq!(payload["summary"]["distribution"][0]["raw_score"], 25);
    }

    #[tokio::test]
    async fn health_route_is_mounted_alongside_patient_routes() {
        let response = app(state(true))
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
