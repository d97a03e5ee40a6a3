//! Answer checking for a kanji flashcard quiz.
//!
//! The quiz front end calls in with plain data and gets plain verdicts
//! back: [`romanized_to_kana`] on every keystroke of a reading answer,
//! [`Validator::grade`] (or its parts, [`Validator::validate`] and
//! [`Validator::check_cross_mode`]) on submit, and
//! [`kana_to_romanized`] for hints.

pub mod card;
pub mod fuzzy;
pub mod normalize;
pub mod scoring;
pub mod validator;

pub use card::{CrossModeVerdict, Modality, OtherMode, QuestionCard, QuestionType, ValidationVerdict};
pub use kana_core::romaji::{kana_to_romanized, romanized_to_kana, RomajiTable};
pub use validator::{Grade, Validator};
