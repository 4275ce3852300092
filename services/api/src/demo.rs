use crate::infra::{
    normalizer_config, recommendation_config, InMemorySurveyStore, PhraseTranslator,
    SeededCatalog, SeededRuleRepository,
};
use clap::Args;
use std::sync::Arc;
use verdia::config::SurveyConfig;
use verdia::error::AppError;
use verdia::survey::{AnswerSubmission, LanguageNormalizer, QuestionId, SurveyAnswer, SurveyService};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the gate answer (third survey answer)
    #[arg(long, default_value = "I love aesthetic design")]
    pub(crate) intent: String,
    /// Submit the sample survey in Portuguese to show normalization
    #[arg(long)]
    pub(crate) portuguese: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let survey_config = SurveyConfig::default();
    let service = SurveyService::new(
        LanguageNormalizer::new(Arc::new(PhraseTranslator), normalizer_config(&survey_config)),
        Arc::new(InMemorySurveyStore::default()),
        Arc::new(SeededRuleRepository::default()),
        Arc::new(SeededCatalog::load()?),
        recommendation_config(&survey_config),
    );

    let answers = if args.portuguese {
        portuguese_answers(&args.intent)
    } else {
        english_answers(&args.intent)
    };

    println!("Verdia survey demo");
    println!("Submitting {} answers...", answers.len());

    let stored = service.submit(AnswerSubmission {
        user_id: None,
        answers,
    })?;
    println!("Stored response {} ({} answers)", stored.id.0, stored.answers.len());
    for answer in &stored.answers {
        println!("  - {}: {}", answer.question_id.0, answer.text().unwrap_or("<none>"));
    }

    let plants = service.plant_recommendations(&stored.id)?;
    println!("\nPlant recommendations [{}]", plants.status.message());
    for item in &plants.items {
        println!("  - {}: {}", item.plant.common_name, item.why_recommended);
    }

    let partners = service.partner_recommendations(&stored.id)?;
    println!("\nPartner recommendations [{}]", partners.status.message());
    for item in &partners.items {
        println!(
            "  - {} (rating {:.1}): {}",
            item.partner.id, item.partner.rating, item.why_recommended
        );
    }

    Ok(())
}

fn english_answers(intent: &str) -> Vec<SurveyAnswer> {
    vec![
        SurveyAnswer::option(QuestionId("q1".to_string()), "Indoor"),
        SurveyAnswer::option(QuestionId("q2".to_string()), "Medium"),
        SurveyAnswer::option(QuestionId("q3".to_string()), intent),
        SurveyAnswer::option(QuestionId("q4".to_string()), "Self-watering pots"),
        SurveyAnswer::option(QuestionId("q5".to_string()), "Living room"),
    ]
}

fn portuguese_answers(intent: &str) -> Vec<SurveyAnswer> {
    vec![
        SurveyAnswer::option(QuestionId("q1".to_string()), "Interior"),
        SurveyAnswer::option(QuestionId("q2".to_string()), "Pequeno"),
        SurveyAnswer::option(QuestionId("q3".to_string()), intent),
        SurveyAnswer::option(QuestionId("q4".to_string()), "Pouca luz"),
        SurveyAnswer::option(QuestionId("q5".to_string()), "Sala de estar"),
    ]
}
