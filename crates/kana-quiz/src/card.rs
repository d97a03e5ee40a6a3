//! Plain data exchanged with the quiz orchestrator.

use serde::{Deserialize, Serialize};

/// What the prompt shows and what the answer box expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// Kanji shown, English meaning typed.
    #[serde(rename = "kanji-to-english")]
    KanjiToMeaning,
    /// Kanji shown, kana reading typed.
    #[serde(rename = "kanji-to-reading")]
    KanjiToReading,
    /// Meaning shown, kanji literal typed.
    #[serde(rename = "english-to-kanji")]
    MeaningToKanji,
    /// Meaning shown, kanji literal or any reading typed.
    #[serde(rename = "english-to-reading-or-kanji")]
    MeaningToReadingOrKanji,
}

/// Kind of answer a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modality {
    Meaning,
    Reading,
    Kanji,
    KanjiOrReading,
}

impl Modality {
    /// Whether the answer box converts romaji to kana while typing.
    pub fn converts_input(self) -> bool {
        matches!(self, Self::Reading | Self::KanjiOrReading)
    }
}

impl QuestionType {
    pub fn modality(self) -> Modality {
        match self {
            Self::KanjiToMeaning => Modality::Meaning,
            Self::KanjiToReading => Modality::Reading,
            Self::MeaningToKanji => Modality::Kanji,
            Self::MeaningToReadingOrKanji => Modality::KanjiOrReading,
        }
    }
}

/// Read-only view of the card being asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCard {
    pub kanji: String,
    #[serde(default)]
    pub meanings: Vec<String>,
    #[serde(default)]
    pub readings: Vec<String>,
    pub question_type: QuestionType,
}

impl QuestionCard {
    /// The strings that count as correct for this card's question type.
    pub fn accepted_answers(&self) -> Vec<String> {
        match self.question_type {
            QuestionType::KanjiToMeaning => self.meanings.clone(),
            QuestionType::KanjiToReading => self.readings.clone(),
            QuestionType::MeaningToKanji => vec![self.kanji.clone()],
            QuestionType::MeaningToReadingOrKanji => std::iter::once(&self.kanji)
                .chain(&self.readings)
                .cloned()
                .collect(),
        }
    }
}

/// Result of grading one answer against one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_correct: bool,
    pub has_typo: bool,
    pub matched_answer: Option<String>,
}

impl ValidationVerdict {
    pub fn no_match() -> Self {
        Self {
            is_correct: false,
            has_typo: false,
            matched_answer: None,
        }
    }

    pub fn exact(answer: &str) -> Self {
        Self {
            is_correct: true,
            has_typo: false,
            matched_answer: Some(answer.to_string()),
        }
    }
}

/// The mode a cross-mode answer belongs to. Only meaning and reading
/// questions have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtherMode {
    Meaning,
    Reading,
}

impl OtherMode {
    pub fn modality(self) -> Modality {
        match self {
            Self::Meaning => Modality::Meaning,
            Self::Reading => Modality::Reading,
        }
    }
}

/// An answer that is wrong for the question but right for the card's other mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossModeVerdict {
    pub is_correct_in_other_mode: bool,
    pub other_mode: OtherMode,
    pub correct_answer: String,
}
