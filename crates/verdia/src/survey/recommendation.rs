//! Recommendation selection: the partner eligibility gate, plant attribute
//! scoring, and partner affiliate ranking. Selectors are read-only over the
//! answers, rules, and candidate pools they receive.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{FieldIndex, PartnerProfile, Plant, QuestionId, Rule, SurveyAnswer};

/// Gate settings for partner recommendations. Resolution prefers
/// `gate_question_id`; the positional index is the fallback for deployments
/// that still rely on submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub gate_question_id: Option<QuestionId>,
    pub gate_answer_index: usize,
    pub gate_signal: String,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            gate_question_id: None,
            gate_answer_index: 2,
            gate_signal: "aesthetic".to_string(),
        }
    }
}

impl RecommendationConfig {
    fn gate_answer<'a>(&self, answers: &'a [SurveyAnswer]) -> Option<&'a SurveyAnswer> {
        if let Some(question_id) = &self.gate_question_id {
            return answers
                .iter()
                .find(|answer| answer.question_id == *question_id);
        }
        // Fewer answers than the index means the gate is closed, not a fault.
        answers.get(self.gate_answer_index)
    }

    /// Case-insensitive substring check on the designated answer.
    pub fn gate_open(&self, answers: &[SurveyAnswer]) -> bool {
        let signal = self.gate_signal.to_lowercase();
        self.gate_answer(answers)
            .and_then(SurveyAnswer::text)
            .map(|text| text.to_lowercase().contains(&signal))
            .unwrap_or(false)
    }
}

/// Distinguishes "the gate said no" from "nothing in the pool matched".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Ranked,
    NoMatches,
    NotApplicable,
}

impl RecommendationStatus {
    pub const fn message(self) -> &'static str {
        match self {
            RecommendationStatus::Ranked => "recommendations ranked",
            RecommendationStatus::NoMatches => "no matching candidates found",
            RecommendationStatus::NotApplicable => {
                "partner recommendations are not applicable for this response"
            }
        }
    }
}

/// A recommended plant with the mandatory explanation the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecommendation {
    pub plant: Plant,
    pub why_recommended: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantRecommendations {
    pub status: RecommendationStatus,
    #[serde(rename = "plantRecommendations")]
    pub items: Vec<PlantRecommendation>,
}

/// A recommended partner with the mandatory explanation the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRecommendation {
    pub partner: PartnerProfile,
    pub why_recommended: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerRecommendations {
    pub status: RecommendationStatus,
    #[serde(rename = "partnerRecommendations")]
    pub items: Vec<PartnerRecommendation>,
}

impl PartnerRecommendations {
    pub fn not_applicable() -> Self {
        Self {
            status: RecommendationStatus::NotApplicable,
            items: Vec::new(),
        }
    }
}

/// Score catalog plants against the structured attributes carried
/// positionally by the answers ([`FieldIndex`] ordinals). Plants matching at
/// least one attribute are ranked by match count; the stable sort breaks ties
/// by catalog insertion order.
pub fn select_plants(answers: &[SurveyAnswer], catalog: &[Plant]) -> PlantRecommendations {
    let wanted: Vec<(FieldIndex, &str)> = FieldIndex::ALL
        .iter()
        .filter_map(|&field| {
            answers
                .get(field.ordinal())
                .and_then(SurveyAnswer::text)
                .map(|text| (field, text))
        })
        .collect();

    let mut ranked: Vec<(usize, PlantRecommendation)> = Vec::new();
    for plant in catalog {
        let matched: Vec<String> = wanted
            .iter()
            .filter(|(field, want)| {
                plant
                    .field(*field)
                    .iter()
                    .any(|have| have.eq_ignore_ascii_case(want))
            })
            .map(|(field, want)| format!("{} '{}'", field.label(), want))
            .collect();

        if matched.is_empty() {
            continue;
        }

        let why_recommended = format!(
            "{} matches your {}",
            plant.common_name,
            matched.join(", ")
        );
        ranked.push((
            matched.len(),
            PlantRecommendation {
                plant: plant.clone(),
                why_recommended,
            },
        ));
    }

    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let items: Vec<PlantRecommendation> = ranked.into_iter().map(|(_, item)| item).collect();
    let status = if items.is_empty() {
        RecommendationStatus::NoMatches
    } else {
        RecommendationStatus::Ranked
    };
    PlantRecommendations { status, items }
}

/// Rank partners whose speciality overlaps an affiliate tag carried by the
/// matched rules. The gate short-circuits to `NotApplicable` regardless of
/// rule matches. Ranking is rating descending; the stable sort preserves
/// profile creation order on ties.
pub fn select_partners(
    answers: &[SurveyAnswer],
    matched_rules: &[&Rule],
    partners: &[PartnerProfile],
    config: &RecommendationConfig,
) -> PartnerRecommendations {
    if !config.gate_open(answers) {
        return PartnerRecommendations::not_applicable();
    }

    let affiliates: Vec<(&str, &str)> = matched_rules
        .iter()
        .filter_map(|rule| {
            rule.affiliate_for
                .as_deref()
                .map(|tag| (tag, rule.name.as_str()))
        })
        .collect();

    let mut items: Vec<PartnerRecommendation> = Vec::new();
    for partner in partners {
        let Some((speciality, tag, rule_name)) = affiliate_overlap(partner, &affiliates) else {
            continue;
        };
        items.push(PartnerRecommendation {
            partner: partner.clone(),
            why_recommended: format!(
                "speciality '{speciality}' aligns with '{tag}' from rule '{rule_name}'"
            ),
        });
    }

    items.sort_by(|a, b| {
        b.partner
            .rating
            .partial_cmp(&a.partner.rating)
            .unwrap_or(Ordering::Equal)
    });

    let status = if items.is_empty() {
        RecommendationStatus::NoMatches
    } else {
        RecommendationStatus::Ranked
    };
    PartnerRecommendations { status, items }
}

/// Loose speciality match: either string contains the other,
/// case-insensitively. First-matched affiliate wins, preserving rule order.
fn affiliate_overlap<'a>(
    partner: &'a PartnerProfile,
    affiliates: &[(&'a str, &'a str)],
) -> Option<(&'a str, &'a str, &'a str)> {
    for (tag, rule_name) in affiliates {
        let tag_lower = tag.to_lowercase();
        for speciality in &partner.speciality {
            let speciality_lower = speciality.to_lowercase();
            if speciality_lower.contains(&tag_lower) || tag_lower.contains(&speciality_lower) {
                return Some((speciality.as_str(), tag, rule_name));
            }
        }
    }
    None
}
