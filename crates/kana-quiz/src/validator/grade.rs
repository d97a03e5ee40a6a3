use kana_core::romaji::{finalize_kana, kana_to_romanized};
use kana_core::unicode::contains_latin;
use tracing::{debug, debug_span};

use super::Validator;
use crate::card::{CrossModeVerdict, OtherMode, QuestionCard};

/// What the quiz should do with a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grade {
    /// Nothing typed. Keep waiting.
    Blank,
    Correct {
        has_typo: bool,
        matched_answer: String,
    },
    /// Right answer for the other question type. The user retries without a strike.
    WrongMode {
        verdict: CrossModeVerdict,
        /// How to type the reading, when the reading is what was matched.
        hint: Option<String>,
    },
    /// A kana answer still has romaji in it. Re-prompt without a strike.
    Incomplete,
    Incorrect,
}

impl Grade {
    /// Whether the submission ends the attempt (right or wrong).
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Correct { .. } | Self::Incorrect)
    }
}

impl Validator {
    /// Grade the raw input-box value for `card`.
    ///
    /// Precedence: correct (exact, then fuzzy for meanings), then right
    /// answer in the wrong mode, then unfinished romaji, then wrong.
    pub fn grade(&self, card: &QuestionCard, raw: &str) -> Grade {
        let _span = debug_span!("grade", question_type = ?card.question_type).entered();

        if raw.trim().is_empty() {
            return Grade::Blank;
        }

        let modality = card.question_type.modality();
        let submission = if modality.converts_input() {
            finalize_kana(self.table(), raw)
        } else {
            raw.to_string()
        };

        let verdict = self.validate(&submission, &card.accepted_answers(), modality);
        if let (true, Some(matched_answer)) = (verdict.is_correct, verdict.matched_answer) {
            return Grade::Correct {
                has_typo: verdict.has_typo,
                matched_answer,
            };
        }

        if let Some(verdict) = self.check_cross_mode(card, raw) {
            let hint = (verdict.other_mode == OtherMode::Reading)
                .then(|| self.reading_hint(&verdict.correct_answer));
            return Grade::WrongMode { verdict, hint };
        }

        if modality.converts_input() && contains_latin(&submission) {
            debug!("romaji left in a kana answer");
            return Grade::Incomplete;
        }

        Grade::Incorrect
    }

    /// Romaji to type for `reading`.
    pub fn reading_hint(&self, reading: &str) -> String {
        kana_to_romanized(self.table(), reading)
    }
}
