use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use verdia::config::SurveyConfig;
use verdia::survey::{
    load_plants, Condition, ConditionOperator, NormalizerConfig, PartnerProfile, PartnerStatus,
    Plant, QuestionId, RecommendationCatalog, RecommendationConfig, RepositoryError, ResponseId,
    ResponseRepository, Rule, RuleRepository, SurveyAnswer, SurveyResponse, TranslationError,
    Translator,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mutex-guarded response store standing in for the document database.
#[derive(Default, Clone)]
pub(crate) struct InMemorySurveyStore {
    records: Arc<Mutex<HashMap<ResponseId, SurveyResponse>>>,
}

impl ResponseRepository for InMemorySurveyStore {
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

/// Rule set normally administered through the back office; fetched fresh on
/// every evaluation so edits land on the next request.
#[derive(Clone)]
pub(crate) struct SeededRuleRepository {
    rules: Arc<Mutex<Vec<Rule>>>,
}

impl Default for SeededRuleRepository {
    fn default() -> Self {
        Self {
            rules: Arc::new(Mutex::new(seed_rules())),
        }
    }
}

impl RuleRepository for SeededRuleRepository {
    fn list_active(&self) -> Result<Vec<Rule>, RepositoryError> {
        let guard = self.rules.lock().expect("rules mutex poisoned");
        Ok(guard.iter().filter(|rule| !rule.is_deleted).cloned().collect())
    }
}

#[derive(Clone)]
pub(crate) struct SeededCatalog {
    plants: Vec<Plant>,
    partners: Vec<PartnerProfile>,
}

impl SeededCatalog {
    pub(crate) fn load() -> Result<Self, verdia::survey::CatalogError> {
        let plants = load_plants(PLANT_CATALOG_CSV.as_bytes())?;
        Ok(Self {
            plants,
            partners: seed_partners(),
        })
    }
}

impl RecommendationCatalog for SeededCatalog {
    fn list_plants(&self) -> Result<Vec<Plant>, RepositoryError> {
        Ok(self.plants.clone())
    }

    fn list_partners(&self) -> Result<Vec<PartnerProfile>, RepositoryError> {
        Ok(self.partners.clone())
    }
}

const PLANT_CATALOG_CSV: &str = include_str!("../data/plant_catalog.csv");

/// Phrase-table translator used until the external translation service is
/// wired in. Detection is membership in the Portuguese phrase list.
#[derive(Default)]
pub(crate) struct PhraseTranslator;

const PT_PHRASES: &[(&str, &str)] = &[
    ("Jardim", "Garden"),
    ("Interior", "Indoor"),
    ("Exterior", "Outdoor"),
    ("Pequeno", "Small"),
    ("Grande", "Large"),
    ("Pouca luz", "Low light"),
    ("Sala de estar", "Living room"),
    ("Varanda", "Balcony"),
];

impl Translator for PhraseTranslator {
    fn detect_language(&self, sample: &str) -> Result<Option<String>, TranslationError> {
        if PT_PHRASES.iter().any(|(pt, _)| *pt == sample) {
            Ok(Some("pt-BR".to_string()))
        } else {
            Ok(Some("en".to_string()))
        }
    }

    fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
        Ok(PT_PHRASES
            .iter()
            .find(|(pt, _)| *pt == text)
            .map(|(_, en)| en.to_string())
            .unwrap_or_else(|| text.to_string()))
    }
}

pub(crate) fn recommendation_config(survey: &SurveyConfig) -> RecommendationConfig {
    RecommendationConfig {
        gate_question_id: survey.gate_question_id.clone().map(QuestionId),
        gate_signal: survey.gate_signal.clone(),
        ..RecommendationConfig::default()
    }
}

pub(crate) fn normalizer_config(survey: &SurveyConfig) -> NormalizerConfig {
    NormalizerConfig {
        canonical_language: survey.canonical_language.clone(),
        translate_from: survey.translate_from.clone(),
    }
}

fn seed_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "rule-aesthetic".to_string(),
            name: "aesthetic intent".to_string(),
            conditions: vec![Condition {
                question_id: QuestionId("q3".to_string()),
                operator: ConditionOperator::Equals,
                values: vec![
                    "I love aesthetic design".to_string(),
                    "Aesthetics matter most".to_string(),
                ],
            }],
            affiliate_for: Some("aesthetic design".to_string()),
            is_deleted: false,
        },
        Rule {
            id: "rule-indoor".to_string(),
            name: "indoor gardeners".to_string(),
            conditions: vec![Condition {
                question_id: QuestionId("q1".to_string()),
                operator: ConditionOperator::Or,
                values: vec!["Indoor".to_string(), "Balcony".to_string()],
            }],
            affiliate_for: Some("garden design".to_string()),
            is_deleted: false,
        },
    ]
}

fn seed_partners() -> Vec<PartnerProfile> {
    vec![
        PartnerProfile {
            id: "atelier-verde".to_string(),
            email: "hello@atelier-verde.example".to_string(),
            mobile_number: "+1-555-0101".to_string(),
            company_name: Some("Atelier Verde".to_string()),
            speciality: vec!["aesthetic design".to_string()],
            address: None,
            rating: 4.7,
            status: PartnerStatus::Active,
        },
        PartnerProfile {
            id: "bloomworks".to_string(),
            email: "studio@bloomworks.example".to_string(),
            mobile_number: "+1-555-0102".to_string(),
            company_name: Some("Bloomworks".to_string()),
            speciality: vec!["garden design".to_string(), "landscaping".to_string()],
            address: None,
            rating: 4.9,
            status: PartnerStatus::Active,
        },
        PartnerProfile {
            id: "casa-folha".to_string(),
            email: "contact@casa-folha.example".to_string(),
            mobile_number: "+1-555-0103".to_string(),
            company_name: Some("Casa Folha".to_string()),
            speciality: vec!["aesthetic design".to_string()],
            address: None,
            rating: 4.4,
            status: PartnerStatus::Active,
        },
    ]
}
