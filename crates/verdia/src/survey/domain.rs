use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for survey questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for persisted survey responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

/// A survey question as administered. Questions are soft-deleted, never
/// removed, so historical answers keep a valid referent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    pub order: i32,
    pub is_deleted: bool,
}

/// Free-form address payload carried by `ADDRESS` answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub state: String,
    pub city: String,
}

/// Payload of a single answer. The OPTION/ADDRESS exclusivity from the wire
/// contract is carried by the enum itself rather than re-checked at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerValue {
    Option {
        #[serde(rename = "selectedOption")]
        selected_option: String,
    },
    Address {
        #[serde(rename = "selectedAddress")]
        selected_address: Address,
    },
}

/// One answer to one question, owned by exactly one [`SurveyResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    #[serde(rename = "questionId")]
    pub question_id: QuestionId,
    #[serde(flatten)]
    pub value: AnswerValue,
}

impl SurveyAnswer {
    pub fn option(question_id: QuestionId, selected_option: impl Into<String>) -> Self {
        Self {
            question_id,
            value: AnswerValue::Option {
                selected_option: selected_option.into(),
            },
        }
    }

    pub fn address(question_id: QuestionId, state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            question_id,
            value: AnswerValue::Address {
                selected_address: Address {
                    state: state.into(),
                    city: city.into(),
                },
            },
        }
    }

    /// Textual value the matcher and gate compare against: the selected
    /// option, or the city for address answers.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            AnswerValue::Option { selected_option } => Some(selected_option.as_str()),
            AnswerValue::Address { selected_address } => Some(selected_address.city.as_str()),
        }
    }

    pub fn selected_option(&self) -> Option<&str> {
        match &self.value {
            AnswerValue::Option { selected_option } => Some(selected_option.as_str()),
            AnswerValue::Address { .. } => None,
        }
    }
}

/// A complete submission. Created once, immutable thereafter; a new response
/// supersedes rather than edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub user_id: Option<String>,
    pub answers: Vec<SurveyAnswer>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl SurveyResponse {
    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            response_id: self.id.clone(),
            answer_count: self.answers.len(),
            created_at: self.created_at,
        }
    }
}

/// What the submission endpoint exposes back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub response_id: ResponseId,
    pub answer_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Intra-condition comparison operator. `OR` currently evaluates the same as
/// `EQUALS`; both are kept distinct because rule authors already use both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionOperator {
    Equals,
    And,
    Or,
}

/// A single comparison clause referencing one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub question_id: QuestionId,
    pub operator: ConditionOperator,
    pub values: Vec<String>,
}

/// An administrator-authored rule: all conditions must hold for a match.
/// `affiliate_for` tags the affiliate pool a matched rule unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub conditions: Vec<Condition>,
    pub affiliate_for: Option<String>,
    pub is_deleted: bool,
}

/// Lifecycle status for a professional partner profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    Active,
    Suspended,
}

/// A professional partner eligible for recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerProfile {
    pub id: String,
    pub email: String,
    pub mobile_number: String,
    pub company_name: Option<String>,
    pub speciality: Vec<String>,
    pub address: Option<Address>,
    pub rating: f32,
    pub status: PartnerStatus,
}

/// Care metadata attached to a catalog plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantCare {
    pub watering: String,
    pub sunlight: String,
    pub maintenance: String,
}

/// A catalog plant eligible for recommendation. The five attribute lists map
/// positionally onto survey answers through [`FieldIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub scientific_name: String,
    pub common_name: String,
    pub space_types: Vec<String>,
    pub area_sizes: Vec<String>,
    pub challenges: Vec<String>,
    pub tech_preferences: Vec<String>,
    pub locations: Vec<String>,
    pub care: PlantCare,
}

impl Plant {
    pub fn field(&self, index: FieldIndex) -> &[String] {
        match index {
            FieldIndex::SpaceTypes => &self.space_types,
            FieldIndex::AreaSizes => &self.area_sizes,
            FieldIndex::Challenges => &self.challenges,
            FieldIndex::TechPreferences => &self.tech_preferences,
            FieldIndex::Locations => &self.locations,
        }
    }
}

/// Ordinal mapping between submitted answer positions and plant attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIndex {
    SpaceTypes,
    AreaSizes,
    Challenges,
    TechPreferences,
    Locations,
}

impl FieldIndex {
    pub const ALL: [FieldIndex; 5] = [
        FieldIndex::SpaceTypes,
        FieldIndex::AreaSizes,
        FieldIndex::Challenges,
        FieldIndex::TechPreferences,
        FieldIndex::Locations,
    ];

    pub const fn ordinal(self) -> usize {
        match self {
            FieldIndex::SpaceTypes => 0,
            FieldIndex::AreaSizes => 1,
            FieldIndex::Challenges => 2,
            FieldIndex::TechPreferences => 3,
            FieldIndex::Locations => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldIndex::SpaceTypes => "space type",
            FieldIndex::AreaSizes => "area size",
            FieldIndex::Challenges => "challenge",
            FieldIndex::TechPreferences => "tech preference",
            FieldIndex::Locations => "location",
        }
    }
}
