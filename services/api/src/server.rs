use crate::cli::ServeArgs;
use crate::infra::{
    normalizer_config, recommendation_config, AppState, InMemorySurveyStore, PhraseTranslator,
    SeededCatalog, SeededRuleRepository,
};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use verdia::config::AppConfig;
use verdia::error::AppError;
use verdia::survey::{LanguageNormalizer, SurveyService};
use verdia::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let normalizer = LanguageNormalizer::new(
        Arc::new(PhraseTranslator),
        normalizer_config(&config.survey),
    );
    let survey_service = Arc::new(SurveyService::new(
        normalizer,
        Arc::new(InMemorySurveyStore::default()),
        Arc::new(SeededRuleRepository::default()),
        Arc::new(SeededCatalog::load()?),
        recommendation_config(&config.survey),
    ));

    let app = with_survey_routes(survey_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "verdia survey backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
