use std::sync::Arc;

use super::domain::{AnswerValue, SurveyAnswer};

/// Errors raised during language detection or translation. Submissions abort
/// on either: rule matching assumes canonical-language string equality, so a
/// partially translated response must never reach the store.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("language detection failed: {0}")]
    Detection(String),
    #[error("translation to '{target}' failed: {detail}")]
    Translation { target: String, detail: String },
}

/// Seam for the external translation collaborator so tests and the demo
/// binary can inject a phrase-table fake.
pub trait Translator: Send + Sync {
    /// Best-effort language detection; `None` when the sample is inconclusive.
    fn detect_language(&self, sample: &str) -> Result<Option<String>, TranslationError>;

    /// Translate a single string into the target language.
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError>;
}

/// Which languages get translated into the canonical one before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub canonical_language: String,
    pub translate_from: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            canonical_language: "en".to_string(),
            translate_from: vec!["pt".to_string()],
        }
    }
}

impl NormalizerConfig {
    /// A detected tag triggers translation when it names a configured source
    /// language or a regional variant of one (`pt-BR` matches `pt`).
    fn needs_translation(&self, detected: &str) -> bool {
        let detected = detected.to_ascii_lowercase();
        if detected == self.canonical_language.to_ascii_lowercase() {
            return false;
        }
        self.translate_from.iter().any(|source| {
            let source = source.to_ascii_lowercase();
            detected == source || detected.starts_with(&format!("{source}-"))
        })
    }
}

/// Normalizes a submission's textual content into the canonical language.
/// Runs exactly once, before persistence; responses are immutable afterwards.
pub struct LanguageNormalizer<T> {
    translator: Arc<T>,
    config: NormalizerConfig,
}

impl<T: Translator> LanguageNormalizer<T> {
    pub fn new(translator: Arc<T>, config: NormalizerConfig) -> Self {
        Self { translator, config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Detect from the first free-text fragment and, when a configured
    /// non-canonical language is found, translate every textual field of
    /// every answer. No sample or canonical text is a no-op.
    pub fn normalize(
        &self,
        answers: Vec<SurveyAnswer>,
    ) -> Result<Vec<SurveyAnswer>, TranslationError> {
        let Some(sample) = detection_sample(&answers) else {
            return Ok(answers);
        };

        let detected = self.translator.detect_language(sample)?;
        match detected {
            Some(language) if self.config.needs_translation(&language) => {
                self.translate_all(answers)
            }
            _ => Ok(answers),
        }
    }

    fn translate_all(
        &self,
        answers: Vec<SurveyAnswer>,
    ) -> Result<Vec<SurveyAnswer>, TranslationError> {
        let target = self.config.canonical_language.as_str();
        answers
            .into_iter()
            .map(|mut answer| {
                match &mut answer.value {
                    AnswerValue::Option { selected_option } => {
                        *selected_option = self.translator.translate(selected_option, target)?;
                    }
                    AnswerValue::Address { selected_address } => {
                        selected_address.state =
                            self.translator.translate(&selected_address.state, target)?;
                        selected_address.city =
                            self.translator.translate(&selected_address.city, target)?;
                    }
                }
                Ok(answer)
            })
            .collect()
    }
}

/// Heuristic detection sample: the first selected option, else the first
/// address city. A proxy for the whole response's language, not per-field.
pub(crate) fn detection_sample(answers: &[SurveyAnswer]) -> Option<&str> {
    if let Some(option) = answers.iter().find_map(SurveyAnswer::selected_option) {
        return Some(option);
    }
    answers.iter().find_map(|answer| match &answer.value {
        AnswerValue::Address { selected_address } => Some(selected_address.city.as_str()),
        AnswerValue::Option { .. } => None,
    })
}
