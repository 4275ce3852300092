use super::domain::{PartnerProfile, Plant, ResponseId, Rule, SurveyAnswer, SurveyResponse};

/// Storage abstraction for submitted responses so the service module can be
/// exercised in isolation. Responses are write-once; there is no update.
pub trait ResponseRepository: Send + Sync {
    fn insert(&self, response: SurveyResponse) -> Result<SurveyResponse, RepositoryError>;
    /// Answers of a stored, non-deleted response; `None` for unknown ids.
    fn answers_for(&self, id: &ResponseId) -> Result<Option<Vec<SurveyAnswer>>, RepositoryError>;
}

/// Read contract over administrator-authored rules. Implementations exclude
/// soft-deleted rows; callers fetch fresh per evaluation, so a newly authored
/// rule takes effect on the next request.
pub trait RuleRepository: Send + Sync {
    fn list_active(&self) -> Result<Vec<Rule>, RepositoryError>;
}

/// Candidate pools for the recommendation selectors, in catalog order.
pub trait RecommendationCatalog: Send + Sync {
    fn list_plants(&self) -> Result<Vec<Plant>, RepositoryError>;
    fn list_partners(&self) -> Result<Vec<PartnerProfile>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
