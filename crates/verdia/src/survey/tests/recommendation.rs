use super::common::*;
use crate::survey::matcher::match_rules;
use crate::survey::recommendation::{
    select_partners, select_plants, RecommendationConfig, RecommendationStatus,
};

#[test]
fn gate_closed_without_the_signal_substring() {
    let config = RecommendationConfig::default();
    let mut answers = survey_answers();
    answers[2] = option_answer("q3", "I love durability");

    let rules = active_rules();
    let matched = match_rules(&rules, &answers);
    let result = select_partners(&answers, &matched, &partner_pool(), &config);

    assert_eq!(result.status, RecommendationStatus::NotApplicable);
    assert!(result.items.is_empty());
}

#[test]
fn gate_is_case_insensitive_substring() {
    let config = RecommendationConfig::default();
    let mut answers = survey_answers();
    answers[2] = option_answer("q3", "AESTHETIC above all");
    assert!(config.gate_open(&answers));
}

#[test]
fn fewer_answers_than_the_gate_index_closes_the_gate() {
    let config = RecommendationConfig::default();
    let answers = vec![option_answer("q1", "aesthetic")];
    assert!(!config.gate_open(&answers));
}

#[test]
fn gate_resolves_by_question_id_when_configured() {
    let config = RecommendationConfig {
        gate_question_id: Some(qid("q1")),
        ..RecommendationConfig::default()
    };
    // Signal sits in the first answer, not at index 2.
    let answers = vec![option_answer("q1", "aesthetic please")];
    assert!(config.gate_open(&answers));
}

#[test]
fn gate_overrides_rule_matches() {
    let config = RecommendationConfig::default();
    let answers = survey_answers();

    // rule-2 matches these answers, but the gate answer says "Low light".
    let rules = active_rules();
    let matched = match_rules(&rules, &answers);
    assert!(!matched.is_empty());

    let result = select_partners(&answers, &matched, &partner_pool(), &config);
    assert_eq!(result.status, RecommendationStatus::NotApplicable);
}

#[test]
fn plants_are_ranked_by_attribute_overlap() {
    let result = select_plants(&survey_answers(), &plant_catalog());

    assert_eq!(result.status, RecommendationStatus::Ranked);
    let names: Vec<&str> = result
        .items
        .iter()
        .map(|item| item.plant.common_name.as_str())
        .collect();
    // Pothos matches all five attributes, Snake Plant two, Lavender none.
    assert_eq!(names, vec!["Golden Pothos", "Snake Plant"]);
    assert!(result.items[0].why_recommended.contains("space type 'Indoor'"));
}

#[test]
fn plant_ties_keep_catalog_order() {
    let catalog = vec![
        plant("First Fern", &["Indoor"], &[], &[], &[], &[]),
        plant("Second Fern", &["Indoor"], &[], &[], &[], &[]),
    ];
    let result = select_plants(&survey_answers(), &catalog);

    let names: Vec<&str> = result
        .items
        .iter()
        .map(|item| item.plant.common_name.as_str())
        .collect();
    assert_eq!(names, vec!["First Fern", "Second Fern"]);
}

#[test]
fn no_plant_overlap_reports_no_matches() {
    let answers = vec![option_answer("q1", "Spaceship")];
    let result = select_plants(&answers, &plant_catalog());
    assert_eq!(result.status, RecommendationStatus::NoMatches);
    assert!(result.items.is_empty());
}

#[test]
fn partners_are_filtered_by_affiliate_and_ranked_by_rating() {
    let config = RecommendationConfig::default();
    let answers = aesthetic_answers();
    let rules = active_rules();
    let matched = match_rules(&rules, &answers);

    let result = select_partners(&answers, &matched, &partner_pool(), &config);

    assert_eq!(result.status, RecommendationStatus::Ranked);
    let ids: Vec<&str> = result
        .items
        .iter()
        .map(|item| item.partner.id.as_str())
        .collect();
    // bloomworks (4.9) outranks the two 4.5 aesthetic studios, whose tie
    // keeps pool order; the irrigation shop never overlaps an affiliate.
    assert_eq!(ids, vec!["bloomworks", "atelier-verde", "casa-folha"]);
    assert!(result.items[0]
        .why_recommended
        .contains("indoor gardeners"));
}

#[test]
fn no_matched_affiliate_reports_no_matches() {
    let config = RecommendationConfig::default();
    let answers = aesthetic_answers();

    let untagged = vec![rule(
        "rule-x",
        "untagged",
        vec![equals_condition("q3", &["I love aesthetic design"])],
        None,
    )];
    let matched = match_rules(&untagged, &answers);
    assert_eq!(matched.len(), 1);

    let result = select_partners(&answers, &matched, &partner_pool(), &config);
    assert_eq!(result.status, RecommendationStatus::NoMatches);
    assert!(result.items.is_empty());
}

#[test]
fn selectors_leave_inputs_untouched() {
    let answers = aesthetic_answers();
    let catalog = plant_catalog();
    let partners = partner_pool();
    let rules = active_rules();
    let matched = match_rules(&rules, &answers);

    select_plants(&answers, &catalog);
    select_partners(&answers, &matched, &partners, &RecommendationConfig::default());

    assert_eq!(catalog, plant_catalog());
    assert_eq!(partners, partner_pool());
    assert_eq!(answers, aesthetic_answers());
}
