//! Grading of submitted answers against the active card.
//!
//! [`Validator::validate`] decides exact and fuzzy correctness for one answer
//! set, [`Validator::check_cross_mode`] spots answers given for the wrong
//! question type, and [`Validator::grade`] composes both into the verdict
//! the quiz acts on. None of them fail: malformed input is logged and
//! graded as a miss.

mod cross_mode;
mod grade;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use kana_core::romaji::RomajiTable;
use kana_core::settings::Settings;
use tracing::{debug, debug_span, warn};

use crate::card::{Modality, ValidationVerdict};
use crate::fuzzy::{find_best_fuzzy_match, DEFAULT_THRESHOLD};
use crate::normalize::normalize;
use crate::scoring::{EditRatio, SimilarityScorer};

pub use grade::Grade;

pub struct Validator {
    table: Arc<RomajiTable>,
    threshold: u8,
    scorer: Option<Arc<dyn SimilarityScorer>>,
}

impl Validator {
    /// Fuzzy matching with [`EditRatio`] at the default threshold.
    pub fn new(table: Arc<RomajiTable>) -> Self {
        Self {
            table,
            threshold: DEFAULT_THRESHOLD,
            scorer: Some(Arc::new(EditRatio)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let table = Arc::new(RomajiTable::with_options(settings.romaji_options()));
        let validator = Self::new(table).with_threshold(settings.matching.threshold);
        if settings.matching.fuzzy {
            validator
        } else {
            validator.without_fuzzy()
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold.min(100);
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Exact matching only.
    pub fn without_fuzzy(mut self) -> Self {
        self.scorer = None;
        self
    }

    pub fn table(&self) -> &RomajiTable {
        &self.table
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Grade `submission` against `answers`.
    ///
    /// Any normalized-equal answer is correct. For meanings, a near miss at
    /// or above the threshold is correct with a typo. `matched_answer` is
    /// the answer as it appears in `answers`.
    pub fn validate(
        &self,
        submission: &str,
        answers: &[String],
        modality: Modality,
    ) -> ValidationVerdict {
        let _span = debug_span!("validate", ?modality, answers = answers.len()).entered();

        let normalized = normalize(submission);
        if normalized.is_empty() {
            warn!("validate: submission is empty");
            return ValidationVerdict::no_match();
        }
        if answers.is_empty() {
            warn!(?modality, "validate: no accepted answers");
            return ValidationVerdict::no_match();
        }

        if let Some(answer) = answers.iter().find(|a| normalize(a) == normalized) {
            debug!("exact match");
            return ValidationVerdict::exact(answer);
        }

        if modality != Modality::Meaning {
            return ValidationVerdict::no_match();
        }
        let Some(scorer) = self.scorer.as_deref() else {
            return ValidationVerdict::no_match();
        };

        let candidates: Vec<String> = answers.iter().map(|a| normalize(a)).collect();
        let found = find_best_fuzzy_match(&normalized, &candidates, self.threshold, scorer);
        match found.best_match {
            Some(index) if found.is_match => ValidationVerdict {
                is_correct: true,
                has_typo: found.has_typo,
                matched_answer: Some(answers[index].clone()),
            },
            _ => ValidationVerdict::no_match(),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
