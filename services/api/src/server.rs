use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPatientRepository};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use prakriti::config::AppConfig;
use prakriti::error::AppError;
use prakriti::patients::PatientAssessmentService;
use prakriti::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let scorer = Arc::new(config.scoring.build_scorer()?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        scorer: scorer.clone(),
    };

    let repository = Arc::new(InMemoryPatientRepository::default());
    let patient_service = Arc::new(PatientAssessmentService::new(repository, scorer));

    let app = with_assessment_routes(patient_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        profile = %config.scoring.profile,
        custom_table = config.scoring.table_path.is_some(),
        "constitution assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
