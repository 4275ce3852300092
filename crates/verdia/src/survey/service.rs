use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use super::domain::{AnswerValue, ResponseId, SurveyAnswer, SurveyResponse};
use super::matcher::match_rules;
use super::normalizer::{LanguageNormalizer, TranslationError, Translator};
use super::recommendation::{
    select_partners, select_plants, PartnerRecommendations, PlantRecommendations,
    RecommendationConfig,
};
use super::repository::{
    RecommendationCatalog, RepositoryError, ResponseRepository, RuleRepository,
};

/// Inbound submission payload for `POST /api/v1/answers`. Anonymous
/// submissions are allowed, so `user_id` is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    #[serde(default)]
    pub user_id: Option<String>,
    pub answers: Vec<SurveyAnswer>,
}

/// Service composing the language normalizer, response store, rule snapshot,
/// and recommendation selectors.
pub struct SurveyService<T, S, R, C> {
    normalizer: LanguageNormalizer<T>,
    responses: Arc<S>,
    rules: Arc<R>,
    catalog: Arc<C>,
    config: RecommendationConfig,
}

static RESPONSE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_response_id() -> ResponseId {
    let id = RESPONSE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResponseId(format!("resp-{id:06}"))
}

impl<T, S, R, C> SurveyService<T, S, R, C>
where
    T: Translator + 'static,
    S: ResponseRepository + 'static,
    R: RuleRepository + 'static,
    C: RecommendationCatalog + 'static,
{
    pub fn new(
        normalizer: LanguageNormalizer<T>,
        responses: Arc<S>,
        rules: Arc<R>,
        catalog: Arc<C>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            normalizer,
            responses,
            rules,
            catalog,
            config,
        }
    }

    /// Submit a new response: validate, normalize to the canonical language,
    /// then persist. Normalization must complete before the insert because
    /// responses are immutable once stored.
    pub fn submit(
        &self,
        submission: AnswerSubmission,
    ) -> Result<SurveyResponse, SurveyServiceError> {
        validate(&submission)?;

        let answers = self.normalizer.normalize(submission.answers)?;
        let response = SurveyResponse {
            id: next_response_id(),
            user_id: submission.user_id,
            answers,
            created_at: Utc::now(),
            is_deleted: false,
        };

        let stored = self.responses.insert(response)?;
        Ok(stored)
    }

    /// Ranked plant recommendations for a previously stored response.
    pub fn plant_recommendations(
        &self,
        id: &ResponseId,
    ) -> Result<PlantRecommendations, SurveyServiceError> {
        let answers = self.stored_answers(id)?;
        let plants = self.catalog.list_plants()?;
        Ok(select_plants(&answers, &plants))
    }

    /// Ranked partner recommendations for a previously stored response. The
    /// eligibility gate short-circuits before any rule or partner fetch.
    pub fn partner_recommendations(
        &self,
        id: &ResponseId,
    ) -> Result<PartnerRecommendations, SurveyServiceError> {
        let answers = self.stored_answers(id)?;
        if !self.config.gate_open(&answers) {
            return Ok(PartnerRecommendations::not_applicable());
        }

        // Independent reads; combined only once both are in hand.
        let rules = self.rules.list_active()?;
        let partners = self.catalog.list_partners()?;

        let matched = match_rules(&rules, &answers);
        Ok(select_partners(&answers, &matched, &partners, &self.config))
    }

    fn stored_answers(&self, id: &ResponseId) -> Result<Vec<SurveyAnswer>, SurveyServiceError> {
        let answers = self
            .responses
            .answers_for(id)?
            .ok_or(RepositoryError::NotFound)?;
        if answers.is_empty() {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(answers)
    }
}

fn validate(submission: &AnswerSubmission) -> Result<(), ValidationError> {
    if submission.answers.is_empty() {
        return Err(ValidationError::EmptyAnswers);
    }

    for (index, answer) in submission.answers.iter().enumerate() {
        match &answer.value {
            AnswerValue::Option { selected_option } if selected_option.trim().is_empty() => {
                return Err(ValidationError::BlankOption {
                    index,
                    question_id: answer.question_id.0.clone(),
                });
            }
            AnswerValue::Address { selected_address }
                if selected_address.city.trim().is_empty() =>
            {
                return Err(ValidationError::BlankAddress {
                    index,
                    question_id: answer.question_id.0.clone(),
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Malformed submissions, reported with enough detail for field-level client
/// errors. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("answers must not be empty")]
    EmptyAnswers,
    #[error("answer {index} for question '{question_id}' has a blank selected option")]
    BlankOption { index: usize, question_id: String },
    #[error("answer {index} for question '{question_id}' has a blank city")]
    BlankAddress { index: usize, question_id: String },
}

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
