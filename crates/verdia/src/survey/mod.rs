//! Survey intake, language normalization, rule matching, and recommendation
//! selection.
//!
//! Control flow mirrors the product: a submission is normalized and then
//! persisted; later reads fetch the stored answers by response id, evaluate
//! the rules and heuristics, and rank recommendations. Persistence, rule
//! authoring, and translation are injected through the traits in
//! [`repository`] and [`normalizer`].

pub mod catalog;
pub mod domain;
pub mod matcher;
pub mod normalizer;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{load_plants, load_plants_from_path, CatalogError};
pub use domain::{
    Address, AnswerValue, Condition, ConditionOperator, FieldIndex, PartnerProfile, PartnerStatus,
    Plant, PlantCare, Question, QuestionId, ResponseId, Rule, SubmissionReceipt, SurveyAnswer,
    SurveyResponse,
};
pub use matcher::{condition_holds, first_affiliate, match_rules, rule_matches};
pub use normalizer::{LanguageNormalizer, NormalizerConfig, TranslationError, Translator};
pub use recommendation::{
    select_partners, select_plants, PartnerRecommendation, PartnerRecommendations,
    PlantRecommendation, PlantRecommendations, RecommendationConfig, RecommendationStatus,
};
pub use repository::{
    RecommendationCatalog, RepositoryError, ResponseRepository, RuleRepository,
};
pub use router::{survey_router, ApiEnvelope};
pub use service::{AnswerSubmission, SurveyService, SurveyServiceError, ValidationError};
