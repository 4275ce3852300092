use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::survey::domain::{
    Condition, ConditionOperator, PartnerProfile, PartnerStatus, Plant, PlantCare, QuestionId,
    ResponseId, Rule, SurveyAnswer, SurveyResponse,
};
use crate::survey::normalizer::{
    LanguageNormalizer, NormalizerConfig, TranslationError, Translator,
};
use crate::survey::recommendation::RecommendationConfig;
use crate::survey::repository::{
    RecommendationCatalog, RepositoryError, ResponseRepository, RuleRepository,
};
use crate::survey::service::{AnswerSubmission, SurveyService};

pub(super) fn qid(raw: &str) -> QuestionId {
    QuestionId(raw.to_string())
}

pub(super) fn option_answer(question_id: &str, value: &str) -> SurveyAnswer {
    SurveyAnswer::option(qid(question_id), value)
}

pub(super) fn address_answer(question_id: &str, state: &str, city: &str) -> SurveyAnswer {
    SurveyAnswer::address(qid(question_id), state, city)
}

/// Five answers aligned with the `FieldIndex` ordinals: space type, area
/// size, challenge, tech preference, location.
pub(super) fn survey_answers() -> Vec<SurveyAnswer> {
    vec![
        option_answer("q1", "Indoor"),
        option_answer("q2", "Medium"),
        option_answer("q3", "Low light"),
        option_answer("q4", "Self-watering pots"),
        option_answer("q5", "Living room"),
    ]
}

/// Same shape, but the third answer carries the aesthetic-intent signal.
pub(super) fn aesthetic_answers() -> Vec<SurveyAnswer> {
    let mut answers = survey_answers();
    answers[2] = option_answer("q3", "I love aesthetic design");
    answers
}

pub(super) fn equals_condition(question_id: &str, values: &[&str]) -> Condition {
    Condition {
        question_id: qid(question_id),
        operator: ConditionOperator::Equals,
        values: values.iter().map(ToString::to_string).collect(),
    }
}

pub(super) fn rule(id: &str, name: &str, conditions: Vec<Condition>, affiliate: Option<&str>) -> Rule {
    Rule {
        id: id.to_string(),
        name: name.to_string(),
        conditions,
        affiliate_for: affiliate.map(ToString::to_string),
        is_deleted: false,
    }
}

pub(super) fn active_rules() -> Vec<Rule> {
    vec![
        rule(
            "rule-1",
            "aesthetic intent",
            vec![equals_condition("q3", &["I love aesthetic design"])],
            Some("aesthetic design"),
        ),
        rule(
            "rule-2",
            "indoor gardeners",
            vec![equals_condition("q1", &["Indoor", "Balcony"])],
            Some("garden design"),
        ),
    ]
}

pub(super) fn plant(
    common_name: &str,
    space_types: &[&str],
    area_sizes: &[&str],
    challenges: &[&str],
    tech_preferences: &[&str],
    locations: &[&str],
) -> Plant {
    let owned = |raw: &[&str]| raw.iter().map(ToString::to_string).collect::<Vec<_>>();
    Plant {
        scientific_name: format!("{common_name} (sci)"),
        common_name: common_name.to_string(),
        space_types: owned(space_types),
        area_sizes: owned(area_sizes),
        challenges: owned(challenges),
        tech_preferences: owned(tech_preferences),
        locations: owned(locations),
        care: PlantCare {
            watering: "Weekly".to_string(),
            sunlight: "Indirect".to_string(),
            maintenance: "Low".to_string(),
        },
    }
}

pub(super) fn plant_catalog() -> Vec<Plant> {
    vec![
        plant(
            "Golden Pothos",
            &["Indoor"],
            &["Medium"],
            &["Low light"],
            &["Self-watering pots"],
            &["Living room"],
        ),
        plant(
            "Snake Plant",
            &["Indoor"],
            &["Small"],
            &["Low light"],
            &[],
            &["Bedroom"],
        ),
        plant(
            "Lavender",
            &["Outdoor"],
            &["Large"],
            &[],
            &[],
            &["Garden"],
        ),
    ]
}

pub(super) fn partner(id: &str, speciality: &[&str], rating: f32) -> PartnerProfile {
    PartnerProfile {
        id: id.to_string(),
        email: format!("{id}@partners.example"),
        mobile_number: "+1-555-0100".to_string(),
        company_name: Some(format!("{id} studio")),
        speciality: speciality.iter().map(ToString::to_string).collect(),
        address: None,
        rating,
        status: PartnerStatus::Active,
    }
}

pub(super) fn partner_pool() -> Vec<PartnerProfile> {
    vec![
        partner("atelier-verde", &["aesthetic design"], 4.5),
        partner("bloomworks", &["garden design"], 4.9),
        partner("casa-folha", &["aesthetic design"], 4.5),
        partner("dirt-cheap", &["irrigation"], 4.9),
    ]
}

/// Translator that never detects a non-canonical language.
#[derive(Default)]
pub(super) struct NoopTranslator;

impl Translator for NoopTranslator {
    fn detect_language(&self, _sample: &str) -> Result<Option<String>, TranslationError> {
        Ok(None)
    }

    fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}

/// Phrase-table translator covering the Portuguese fixtures.
pub(super) struct PhraseTranslator {
    phrases: HashMap<&'static str, &'static str>,
}

impl Default for PhraseTranslator {
    fn default() -> Self {
        let phrases = HashMap::from([
            ("Jardim", "Garden"),
            ("Interior", "Indoor"),
            ("Pequeno", "Small"),
            ("Pouca luz", "Low light"),
            ("Sala de estar", "Living room"),
            ("São Paulo", "Sao Paulo"),
        ]);
        Self { phrases }
    }
}

impl Translator for PhraseTranslator {
    fn detect_language(&self, sample: &str) -> Result<Option<String>, TranslationError> {
        if self.phrases.contains_key(sample) {
            Ok(Some("pt-BR".to_string()))
        } else {
            Ok(Some("en".to_string()))
        }
    }

    fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
        Ok(self
            .phrases
            .get(text)
            .map(ToString::to_string)
            .unwrap_or_else(|| text.to_string()))
    }
}

/// Translator whose detection call always fails.
pub(super) struct FailingDetector;

impl Translator for FailingDetector {
    fn detect_language(&self, _sample: &str) -> Result<Option<String>, TranslationError> {
        Err(TranslationError::Detection("detector offline".to_string()))
    }

    fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}

/// Translator that detects Portuguese but cannot translate.
pub(super) struct FailingTranslator;

impl Translator for FailingTranslator {
    fn detect_language(&self, _sample: &str) -> Result<Option<String>, TranslationError> {
        Ok(Some("pt".to_string()))
    }

    fn translate(&self, _text: &str, target: &str) -> Result<String, TranslationError> {
        Err(TranslationError::Translation {
            target: target.to_string(),
            detail: "quota exhausted".to_string(),
        })
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryResponses {
    pub(super) records: Arc<Mutex<HashMap<ResponseId, SurveyResponse>>>,
}

impl ResponseRepository for MemoryResponses {
    fn insert(&self, response: SurveyResponse) -> Result<SurveyResponse, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&response.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(response.id.clone(), response.clone());
        Ok(response)
    }

    fn answers_for(&self, id: &ResponseId) -> Result<Option<Vec<SurveyAnswer>>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(id)
            .filter(|response| !response.is_deleted)
            .map(|response| response.answers.clone()))
    }
}

pub(super) struct UnavailableResponses;

impl ResponseRepository for UnavailableResponses {
    fn insert(&self, _response: SurveyResponse) -> Result<SurveyResponse, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn answers_for(&self, _id: &ResponseId) -> Result<Option<Vec<SurveyAnswer>>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRules {
    pub(super) rules: Arc<Mutex<Vec<Rule>>>,
}

impl MemoryRules {
    pub(super) fn seeded(rules: Vec<Rule>) -> Self {
        Self {
            rules: Arc::new(Mutex::new(rules)),
        }
    }
}

impl RuleRepository for MemoryRules {
    fn list_active(&self) -> Result<Vec<Rule>, RepositoryError> {
        let guard = self.rules.lock().expect("rules mutex poisoned");
        Ok(guard.iter().filter(|rule| !rule.is_deleted).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    pub(super) plants: Vec<Plant>,
    pub(super) partners: Vec<PartnerProfile>,
}

impl RecommendationCatalog for MemoryCatalog {
    fn list_plants(&self) -> Result<Vec<Plant>, RepositoryError> {
        Ok(self.plants.clone())
    }

    fn list_partners(&self) -> Result<Vec<PartnerProfile>, RepositoryError> {
        Ok(self.partners.clone())
    }
}

pub(super) type TestService<T> = SurveyService<T, MemoryResponses, MemoryRules, MemoryCatalog>;

pub(super) fn build_service() -> (TestService<NoopTranslator>, Arc<MemoryResponses>) {
    build_service_with_translator(NoopTranslator)
}

pub(super) fn build_service_with_translator<T: Translator + 'static>(
    translator: T,
) -> (TestService<T>, Arc<MemoryResponses>) {
    let responses = Arc::new(MemoryResponses::default());
    let normalizer = LanguageNormalizer::new(Arc::new(translator), NormalizerConfig::default());
    let service = SurveyService::new(
        normalizer,
        responses.clone(),
        Arc::new(MemoryRules::seeded(active_rules())),
        Arc::new(MemoryCatalog {
            plants: plant_catalog(),
            partners: partner_pool(),
        }),
        RecommendationConfig::default(),
    );
    (service, responses)
}

pub(super) fn submission(answers: Vec<SurveyAnswer>) -> AnswerSubmission {
    AnswerSubmission {
        user_id: None,
        answers,
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
