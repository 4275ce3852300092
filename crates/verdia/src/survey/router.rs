use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use super::domain::ResponseId;
use super::normalizer::Translator;
use super::repository::{RecommendationCatalog, RepositoryError, ResponseRepository, RuleRepository};
use super::service::{AnswerSubmission, SurveyService, SurveyServiceError};

/// Uniform response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiEnvelope<Value> {
    pub fn failure(message: impl Into<String>, errors: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

/// Router builder exposing HTTP endpoints for submission and recommendations.
pub fn survey_router<T, S, R, C>(service: Arc<SurveyService<T, S, R, C>>) -> Router
where
    T: Translator + 'static,
    S: ResponseRepository + 'static,
    R: RuleRepository + 'static,
    C: RecommendationCatalog + 'static,
{
    Router::new()
        .route("/api/v1/answers", post(submit_handler::<T, S, R, C>))
        .route(
            "/api/v1/answers/:response_id/plants",
            get(plants_handler::<T, S, R, C>),
        )
        .route(
            "/api/v1/answers/:response_id/partners",
            get(partners_handler::<T, S, R, C>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<T, S, R, C>(
    State(service): State<Arc<SurveyService<T, S, R, C>>>,
    axum::Json(submission): axum::Json<AnswerSubmission>,
) -> Response
where
    T: Translator + 'static,
    S: ResponseRepository + 'static,
    R: RuleRepository + 'static,
    C: RecommendationCatalog + 'static,
{
    match service.submit(submission) {
        Ok(response) => {
            let envelope = ApiEnvelope::ok("survey response recorded", response.receipt());
            (StatusCode::CREATED, axum::Json(envelope)).into_response()
        }
        Err(SurveyServiceError::Validation(err)) => {
            let envelope = ApiEnvelope::failure(
                "invalid submission",
                Some(json!({ "answers": err.to_string() })),
            );
            (StatusCode::BAD_REQUEST, axum::Json(envelope)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn plants_handler<T, S, R, C>(
    State(service): State<Arc<SurveyService<T, S, R, C>>>,
    Path(response_id): Path<String>,
) -> Response
where
    T: Translator + 'static,
    S: ResponseRepository + 'static,
    R: RuleRepository + 'static,
    C: RecommendationCatalog + 'static,
{
    let id = ResponseId(response_id);
    match service.plant_recommendations(&id) {
        Ok(recommendations) => {
            let message = recommendations.status.message();
            let envelope = ApiEnvelope::ok(message, recommendations);
            (StatusCode::OK, axum::Json(envelope)).into_response()
        }
        Err(err) => recommendation_error(&id, err),
    }
}

pub(crate) async fn partners_handler<T, S, R, C>(
    State(service): State<Arc<SurveyService<T, S, R, C>>>,
    Path(response_id): Path<String>,
) -> Response
where
    T: Translator + 'static,
    S: ResponseRepository + 'static,
    R: RuleRepository + 'static,
    C: RecommendationCatalog + 'static,
{
    let id = ResponseId(response_id);
    match service.partner_recommendations(&id) {
        Ok(recommendations) => {
            let message = recommendations.status.message();
            let envelope = ApiEnvelope::ok(message, recommendations);
            (StatusCode::OK, axum::Json(envelope)).into_response()
        }
        Err(err) => recommendation_error(&id, err),
    }
}

fn recommendation_error(id: &ResponseId, err: SurveyServiceError) -> Response {
    match err {
        SurveyServiceError::Repository(RepositoryError::NotFound) => {
            let envelope = ApiEnvelope::failure(
                format!("no answers found for response '{}'", id.0),
                None,
            );
            (StatusCode::NOT_FOUND, axum::Json(envelope)).into_response()
        }
        other => internal_error(other),
    }
}

/// Uncaught failures get a generic message; the original error is only
/// written to the log, never leaked to the caller.
fn internal_error(err: SurveyServiceError) -> Response {
    error!(error = %err, "survey request failed");
    let envelope = ApiEnvelope::failure("something went wrong", None);
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(envelope)).into_response()
}
