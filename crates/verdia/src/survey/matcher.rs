//! Condition and rule evaluation. Everything here is a pure function of the
//! (rules snapshot, answers) pair: no hidden state, no caching, and "zero
//! matches" is a successful result rather than an error.

use super::domain::{Condition, ConditionOperator, Rule, SurveyAnswer};

/// Evaluate one condition against the answer set. The condition binds to the
/// answer sharing its `question_id`; a missing answer is unsatisfied.
pub fn condition_holds(condition: &Condition, answers: &[SurveyAnswer]) -> bool {
    let Some(answer) = answers
        .iter()
        .find(|answer| answer.question_id == condition.question_id)
    else {
        return false;
    };
    let Some(value) = answer.text() else {
        return false;
    };

    match condition.operator {
        // EQUALS is membership over the value list, not single-value
        // equality; OR is evaluated identically today but stays a distinct
        // operator for rule authors.
        ConditionOperator::Equals | ConditionOperator::Or => {
            condition.values.iter().any(|candidate| candidate == value)
        }
        // Literal AND semantics: the single answer value must equal every
        // listed entry, so more than one distinct entry can never pass.
        // Preserved as authored; changing it would alter which historical
        // rules still match.
        ConditionOperator::And => {
            !condition.values.is_empty()
                && condition.values.iter().all(|candidate| candidate == value)
        }
    }
}

/// A rule is satisfied iff all of its conditions hold. A rule with no
/// conditions never matches.
pub fn rule_matches(rule: &Rule, answers: &[SurveyAnswer]) -> bool {
    !rule.conditions.is_empty()
        && rule
            .conditions
            .iter()
            .all(|condition| condition_holds(condition, answers))
}

/// Order-preserving matched subset of the rule snapshot.
pub fn match_rules<'a>(rules: &'a [Rule], answers: &[SurveyAnswer]) -> Vec<&'a Rule> {
    rules
        .iter()
        .filter(|rule| rule_matches(rule, answers))
        .collect()
}

/// First-matched affiliate tag, preserving rule storage order.
pub fn first_affiliate<'a>(matched: &[&'a Rule]) -> Option<&'a str> {
    matched.iter().find_map(|rule| rule.affiliate_for.as_deref())
}
