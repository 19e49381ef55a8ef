use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::ServiceConfig;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env();
    bloomsense_instruments::require_instrument(&config.instrument_id)
        .map_err(|e| eyre::eyre!("invalid BLOOMSENSE_INSTRUMENT: {e}"))?;
    tracing::info!(
        bucket = %config.bucket,
        question_bank_key = %config.question_bank_key,
        instrument = %config.instrument_id,
        "starting screening service"
    );

    let s3 = bloomsense_storage::client::build_client().await;
    let state = AppState { s3, config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route(
            "/questionnaire/questions",
            get(routes::questionnaire::get_questions).put(routes::questionnaire::publish_questions),
        )
        .route("/screenings", post(routes::screenings::submit_screening))
        .route(
            "/screenings/score",
            post(routes::screenings::score_screening),
        )
        .route(
            "/screenings/report",
            post(routes::screenings::download_report),
        )
        .route("/assessments", get(routes::assessments::list_assessments))
        .route(
            "/assessments/{id}",
            get(routes::assessments::get_assessment),
        )
        .route(
            "/patients/{patient_id}/assessments",
            get(routes::assessments::list_patient_assessments),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
