use kana_core::romaji::{finalize_kana, kana_to_plain_romaji};
use kana_core::unicode::{contains_latin, is_kana, is_latin};
use tracing::{debug, debug_span, warn};

use super::Validator;
use crate::card::{CrossModeVerdict, OtherMode, QuestionCard, QuestionType};
use crate::normalize::normalize;

impl Validator {
    /// Whether `submission`, wrong for the card's question, answers the card's
    /// other question: a reading typed for a meaning question or a meaning
    /// typed for a reading question.
    ///
    /// Meaning and reading questions each have the other as their other
    /// mode. Kanji-answer questions have none.
    pub fn check_cross_mode(
        &self,
        card: &QuestionCard,
        submission: &str,
    ) -> Option<CrossModeVerdict> {
        let _span = debug_span!("check_cross_mode", question_type = ?card.question_type).entered();

        let normalized = normalize(submission);
        if normalized.is_empty() {
            warn!("check_cross_mode: submission is empty");
            return None;
        }

        let verdict = match card.question_type {
            QuestionType::KanjiToMeaning => self.match_reading(card, submission, &normalized),
            QuestionType::KanjiToReading => self.match_meaning(card, submission, &normalized),
            QuestionType::MeaningToKanji | QuestionType::MeaningToReadingOrKanji => None,
        };
        if let Some(v) = &verdict {
            debug!(other_mode = ?v.other_mode, "answer belongs to the other mode");
        }
        verdict
    }

    /// Readings compare against the answer as typed and as kana, since a
    /// meaning box does not convert while typing.
    fn match_reading(
        &self,
        card: &QuestionCard,
        submission: &str,
        normalized: &str,
    ) -> Option<CrossModeVerdict> {
        let as_kana = normalize(&finalize_kana(self.table(), submission));
        card.readings
            .iter()
            .find(|r| {
                let r = normalize(r);
                r == normalized || r == as_kana
            })
            .map(|r| verdict(OtherMode::Reading, r))
    }

    /// A reading box converts while typing, so an English word arrives
    /// partly or fully as kana (`dog` shows as `どg`). Spell the kana back
    /// before comparing.
    fn match_meaning(
        &self,
        card: &QuestionCard,
        submission: &str,
        normalized: &str,
    ) -> Option<CrossModeVerdict> {
        let mut spellings = vec![normalized.to_string()];
        if submission.chars().any(is_kana) {
            spellings.push(normalize(&self.respell_in_place(submission)));
            if contains_latin(submission) {
                spellings.push(normalize(&self.respell_kana_then_latin(submission)));
            }
        }

        card.meanings
            .iter()
            .find(|m| spellings.contains(&normalize(m)))
            .map(|m| verdict(OtherMode::Meaning, m))
    }

    /// Romanize each kana run where it stands.
    fn respell_in_place(&self, submission: &str) -> String {
        let mut out = String::with_capacity(submission.len());
        let mut run = String::new();
        for c in submission.chars() {
            if is_kana(c) {
                run.push(c);
                continue;
            }
            if !run.is_empty() {
                out.push_str(&kana_to_plain_romaji(self.table(), &run));
                run.clear();
            }
            out.push(c);
        }
        out.push_str(&kana_to_plain_romaji(self.table(), &run));
        out
    }

    /// Romanize everything but the Latin letters, then append the letters.
    fn respell_kana_then_latin(&self, submission: &str) -> String {
        let (latin, rest): (String, String) = submission.chars().partition(|&c| is_latin(c));
        kana_to_plain_romaji(self.table(), &rest) + &latin
    }
}

fn verdict(other_mode: OtherMode, correct_answer: &str) -> CrossModeVerdict {
    CrossModeVerdict {
        is_correct_in_other_mode: true,
        other_mode,
        correct_answer: correct_answer.to_string(),
    }
}
