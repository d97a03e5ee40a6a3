use std::sync::Arc;

use kana_core::romaji::{romanized_to_kana, RomajiTable};
use kana_core::settings::parse_settings_toml;

use super::{Grade, Validator};
use crate::card::{Modality, OtherMode, QuestionCard, QuestionType, ValidationVerdict};
use crate::scoring::{ScoreError, SimilarityScorer};

struct Fixed(u8);

impl SimilarityScorer for Fixed {
    fn score(&self, _: &str, _: &str) -> Result<u8, ScoreError> {
        Ok(self.0)
    }
}

struct Broken;

impl SimilarityScorer for Broken {
    fn score(&self, left: &str, right: &str) -> Result<u8, ScoreError> {
        Err(ScoreError::Failed {
            left: left.to_string(),
            right: right.to_string(),
            reason: "backend crashed".to_string(),
        })
    }
}

fn validator() -> Validator {
    Validator::new(Arc::new(RomajiTable::default()))
}

fn answers(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn dog_card(question_type: QuestionType) -> QuestionCard {
    QuestionCard {
        kanji: "犬".to_string(),
        meanings: answers(&["Dog"]),
        readings: answers(&["いぬ", "けん"]),
        question_type,
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn exact_match_ignores_case() {
    let v = validator().validate("Dog", &answers(&["dog"]), Modality::Meaning);
    assert_eq!(v, ValidationVerdict::exact("dog"));
}

#[test]
fn exact_match_normalizes_whitespace() {
    let v = validator().validate("  one   PIECE ", &answers(&["One Piece"]), Modality::Meaning);
    assert!(v.is_correct);
    assert!(!v.has_typo);
    assert_eq!(v.matched_answer.as_deref(), Some("One Piece"));
}

#[test]
fn near_miss_meaning_is_a_typo() {
    let v = validator().validate("dgo", &answers(&["dog"]), Modality::Meaning);
    assert!(v.is_correct);
    assert!(v.has_typo);
    assert_eq!(v.matched_answer.as_deref(), Some("dog"));
}

#[test]
fn typo_reports_the_original_answer_text() {
    let v = validator().validate("elephnt", &answers(&["cat", "Elephant"]), Modality::Meaning);
    assert!(v.has_typo);
    assert_eq!(v.matched_answer.as_deref(), Some("Elephant"));
}

#[test]
fn unrelated_meaning_is_no_match() {
    let v = validator().validate("xyz", &answers(&["dog", "canine"]), Modality::Meaning);
    assert_eq!(v, ValidationVerdict::no_match());
}

#[test]
fn readings_are_never_fuzzy() {
    let v = validator().validate("いね", &answers(&["いぬ"]), Modality::Reading);
    assert!(!v.is_correct);
    let v = validator().validate("いぬ", &answers(&["いぬ"]), Modality::Reading);
    assert!(v.is_correct);
}

#[test]
fn degenerate_calls_are_no_match() {
    let v = validator();
    assert_eq!(v.validate("", &[], Modality::Meaning), ValidationVerdict::no_match());
    assert_eq!(v.validate("dog", &[], Modality::Meaning), ValidationVerdict::no_match());
    assert_eq!(v.validate("   ", &answers(&["dog"]), Modality::Meaning), ValidationVerdict::no_match());
    assert_eq!(v.validate("dog", &answers(&["", " "]), Modality::Meaning), ValidationVerdict::no_match());
}

#[test]
fn threshold_boundary() {
    let at = validator().with_scorer(Arc::new(Fixed(80)));
    let v = at.validate("abc", &answers(&["xyz"]), Modality::Meaning);
    assert!(v.is_correct);
    assert!(v.has_typo);

    let below = validator().with_scorer(Arc::new(Fixed(79)));
    assert!(!below.validate("abc", &answers(&["xyz"]), Modality::Meaning).is_correct);
}

#[test]
fn custom_threshold() {
    let strict = validator().with_threshold(90);
    assert_eq!(strict.threshold(), 90);
    assert!(!strict.validate("dgo", &answers(&["dog"]), Modality::Meaning).is_correct);
}

#[test]
fn broken_scorer_degrades_to_exact() {
    let v = validator().with_scorer(Arc::new(Broken));
    assert!(!v.validate("dgo", &answers(&["dog"]), Modality::Meaning).is_correct);
    assert!(v.validate("DOG", &answers(&["dog"]), Modality::Meaning).is_correct);
}

#[test]
fn fuzzy_can_be_disabled() {
    let v = validator().without_fuzzy();
    assert!(!v.validate("dgo", &answers(&["dog"]), Modality::Meaning).is_correct);
}

#[test]
fn from_settings_applies_matching_section() {
    let settings = parse_settings_toml(
        r#"
[romaji]
alternate_spellings = false

[matching]
fuzzy = false
threshold = 80
"#,
    )
    .unwrap();
    let v = Validator::from_settings(&settings);
    assert!(!v.table().options().alternate_spellings);
    assert!(!v.validate("dgo", &answers(&["dog"]), Modality::Meaning).is_correct);

    let default = Validator::default();
    assert_eq!(default.threshold(), 80);
    assert!(default.validate("dgo", &answers(&["dog"]), Modality::Meaning).is_correct);
}

// ---------------------------------------------------------------------------
// check_cross_mode
// ---------------------------------------------------------------------------

#[test]
fn meaning_typed_for_reading_question() {
    let card = QuestionCard {
        kanji: "犬".to_string(),
        meanings: answers(&["dog"]),
        readings: answers(&["いぬ"]),
        question_type: QuestionType::KanjiToReading,
    };
    let v = validator().check_cross_mode(&card, "dog").unwrap();
    assert!(v.is_correct_in_other_mode);
    assert_eq!(v.other_mode, OtherMode::Meaning);
    assert_eq!(v.correct_answer, "dog");
}

#[test]
fn meaning_partly_converted_to_kana() {
    let card = dog_card(QuestionType::KanjiToReading);
    let v = validator().check_cross_mode(&card, "どg").unwrap();
    assert_eq!(v.correct_answer, "Dog");

    let ten = QuestionCard {
        kanji: "十".to_string(),
        meanings: answers(&["Ten"]),
        readings: answers(&["じゅう"]),
        question_type: QuestionType::KanjiToReading,
    };
    assert!(validator().check_cross_mode(&ten, "てn").is_some());
    assert!(validator().check_cross_mode(&ten, "てん").is_some());
}

#[test]
fn meaning_fully_converted_to_kana() {
    let one = QuestionCard {
        kanji: "一".to_string(),
        meanings: answers(&["One"]),
        readings: answers(&["いち"]),
        question_type: QuestionType::KanjiToReading,
    };
    let v = validator().check_cross_mode(&one, "おね").unwrap();
    assert_eq!(v.other_mode, OtherMode::Meaning);
    assert_eq!(v.correct_answer, "One");
}

#[test]
fn latin_before_kana_is_respelled_in_place() {
    let fire = QuestionCard {
        kanji: "火".to_string(),
        meanings: answers(&["Fire"]),
        readings: answers(&["ひ"]),
        question_type: QuestionType::KanjiToReading,
    };
    assert!(validator().check_cross_mode(&fire, "fいれ").is_some());
}

#[test]
fn kana_run_then_latin_run() {
    let card = dog_card(QuestionType::KanjiToReading);
    assert!(validator().check_cross_mode(&card, "gど").is_some());
}

#[test]
fn reading_typed_for_meaning_question() {
    let card = dog_card(QuestionType::KanjiToMeaning);
    let v = validator();

    let kana = v.check_cross_mode(&card, "いぬ").unwrap();
    assert_eq!(kana.other_mode, OtherMode::Reading);
    assert_eq!(kana.correct_answer, "いぬ");

    let romaji = v.check_cross_mode(&card, "inu").unwrap();
    assert_eq!(romaji.correct_answer, "いぬ");

    let trailing_n = v.check_cross_mode(&card, "Ken").unwrap();
    assert_eq!(trailing_n.correct_answer, "けん");
}

#[test]
fn no_other_mode_match() {
    let v = validator();
    assert_eq!(v.check_cross_mode(&dog_card(QuestionType::KanjiToMeaning), "cat"), None);
    assert_eq!(v.check_cross_mode(&dog_card(QuestionType::KanjiToReading), "ねこ"), None);
    assert_eq!(v.check_cross_mode(&dog_card(QuestionType::KanjiToReading), "   "), None);
}

#[test]
fn kanji_questions_have_no_other_mode() {
    let v = validator();
    assert_eq!(v.check_cross_mode(&dog_card(QuestionType::MeaningToKanji), "dog"), None);
    assert_eq!(v.check_cross_mode(&dog_card(QuestionType::MeaningToReadingOrKanji), "dog"), None);
}

// ---------------------------------------------------------------------------
// grade
// ---------------------------------------------------------------------------

#[test]
fn blank_submission() {
    assert_eq!(validator().grade(&dog_card(QuestionType::KanjiToMeaning), "  "), Grade::Blank);
    assert!(!Grade::Blank.is_final());
}

#[test]
fn correct_meaning_with_and_without_typo() {
    let card = dog_card(QuestionType::KanjiToMeaning);
    let v = validator();
    assert_eq!(
        v.grade(&card, "dog"),
        Grade::Correct {
            has_typo: false,
            matched_answer: "Dog".to_string()
        }
    );
    assert_eq!(
        v.grade(&card, "dgo"),
        Grade::Correct {
            has_typo: true,
            matched_answer: "Dog".to_string()
        }
    );
}

#[test]
fn correct_reading_finalizes_trailing_n() {
    let card = dog_card(QuestionType::KanjiToReading);
    assert_eq!(
        validator().grade(&card, "けn"),
        Grade::Correct {
            has_typo: false,
            matched_answer: "けん".to_string()
        }
    );
}

#[test]
fn reading_or_kanji_accepts_both() {
    let card = dog_card(QuestionType::MeaningToReadingOrKanji);
    let v = validator();
    assert!(matches!(v.grade(&card, "犬"), Grade::Correct { .. }));
    assert!(matches!(v.grade(&card, "いぬ"), Grade::Correct { .. }));
    assert_eq!(v.grade(&card, "ねこ"), Grade::Incorrect);
}

#[test]
fn kanji_question_is_exact_only() {
    let card = dog_card(QuestionType::MeaningToKanji);
    let v = validator();
    assert!(matches!(v.grade(&card, " 犬 "), Grade::Correct { .. }));
    assert_eq!(v.grade(&card, "大"), Grade::Incorrect);
}

#[test]
fn wrong_mode_reading_carries_hint() {
    let card = dog_card(QuestionType::KanjiToMeaning);
    match validator().grade(&card, "inu") {
        Grade::WrongMode { verdict, hint } => {
            assert_eq!(verdict.other_mode, OtherMode::Reading);
            assert_eq!(verdict.correct_answer, "いぬ");
            assert_eq!(hint.as_deref(), Some("inu"));
        }
        other => panic!("expected WrongMode, got {other:?}"),
    }
}

#[test]
fn wrong_mode_meaning_has_no_hint() {
    let card = dog_card(QuestionType::KanjiToReading);
    match validator().grade(&card, "どg") {
        Grade::WrongMode { verdict, hint } => {
            assert_eq!(verdict.other_mode, OtherMode::Meaning);
            assert_eq!(hint, None);
        }
        other => panic!("expected WrongMode, got {other:?}"),
    }
}

#[test]
fn romaji_residue_is_incomplete() {
    let card = dog_card(QuestionType::KanjiToReading);
    let grade = validator().grade(&card, "いq");
    assert_eq!(grade, Grade::Incomplete);
    assert!(!grade.is_final());
}

#[test]
fn wrong_kana_is_incorrect() {
    let card = dog_card(QuestionType::KanjiToReading);
    let grade = validator().grade(&card, "いね");
    assert_eq!(grade, Grade::Incorrect);
    assert!(grade.is_final());
}

#[test]
fn latin_in_meaning_answer_is_just_wrong() {
    let card = dog_card(QuestionType::KanjiToMeaning);
    assert_eq!(validator().grade(&card, "xyz"), Grade::Incorrect);
}

#[test]
fn keystroke_session_then_submit() {
    let v = validator();
    let card: QuestionCard = serde_json::from_str(
        r#"{"kanji": "漢字", "meanings": ["Kanji"], "readings": ["かんじ"], "questionType": "kanji-to-reading"}"#,
    )
    .unwrap();

    let mut display = String::new();
    for key in "kanji".chars() {
        display.push(key);
        display = romanized_to_kana(v.table(), &display);
    }
    assert_eq!(display, "かんじ");
    assert!(matches!(v.grade(&card, &display), Grade::Correct { has_typo: false, .. }));
}

fn type_live(v: &Validator, keys: &str) -> String {
    let mut display = String::new();
    for key in keys.chars() {
        display.push(key);
        display = romanized_to_kana(v.table(), &display);
    }
    display
}

#[test]
fn live_doubled_n_before_vowel_grades_correct() {
    let v = validator();
    let card = QuestionCard {
        kanji: "女".to_string(),
        meanings: answers(&["Woman"]),
        readings: answers(&["おんな"]),
        question_type: QuestionType::KanjiToReading,
    };
    let display = type_live(&v, "onna");
    assert_eq!(display, "おんな");
    assert!(matches!(v.grade(&card, &display), Grade::Correct { has_typo: false, .. }));
}

#[test]
fn live_doubled_n_meaning_is_other_mode() {
    let v = validator();
    let card = QuestionCard {
        kanji: "夕食".to_string(),
        meanings: answers(&["Dinner"]),
        readings: answers(&["ゆうしょく"]),
        question_type: QuestionType::KanjiToReading,
    };
    let display = type_live(&v, "dinner");
    let verdict = v.check_cross_mode(&card, &display).unwrap();
    assert_eq!(verdict.correct_answer, "Dinner");
    assert!(matches!(v.grade(&card, &display), Grade::WrongMode { hint: None, .. }));
}

#[test]
fn pending_doubled_n_is_settled_on_submit() {
    let v = validator();
    let card = dog_card(QuestionType::KanjiToReading);
    let display = type_live(&v, "kenn");
    assert_eq!(display, "けnn");
    assert!(matches!(v.grade(&card, &display), Grade::Correct { .. }));
}

#[test]
fn reading_hint_round_trips() {
    let v = validator();
    for reading in ["いぬ", "けん", "がっこう", "ほんや"] {
        let hint = v.reading_hint(reading);
        assert_eq!(romanized_to_kana(v.table(), &hint), reading, "hint {hint}");
    }
}

// ---------------------------------------------------------------------------
// properties
// ---------------------------------------------------------------------------

mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::scoring::edit_ratio;

    fn arb_reading() -> impl Strategy<Value = String> {
        let glyphs = RomajiTable::shared().glyphs();
        prop::collection::vec(prop::sample::select(glyphs), 1..8).prop_map(|g| g.concat())
    }

    fn reading_card(reading: &str) -> QuestionCard {
        QuestionCard {
            kanji: "語".to_string(),
            meanings: answers(&["word"]),
            readings: vec![reading.to_string()],
            question_type: QuestionType::KanjiToReading,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn typing_the_hint_is_correct(reading in arb_reading()) {
            let v = validator();
            let hint = v.reading_hint(&reading);
            let grade = v.grade(&reading_card(&reading), &hint);
            prop_assert!(matches!(grade, Grade::Correct { has_typo: false, .. }), "{} via {}: {:?}", reading, hint, grade);
        }

        #[test]
        fn meaning_case_and_spacing_never_matter(word in "[a-z]{1,8}( [a-z]{1,8}){0,2}") {
            let typed = format!("  {}  ", word.to_uppercase().replace(' ', "   "));
            let v = validator().validate(&typed, &[word.clone()], Modality::Meaning);
            prop_assert_eq!(v, ValidationVerdict::exact(&word));
        }

        #[test]
        fn edit_ratio_is_symmetric_and_bounded(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let ab = edit_ratio(&a, &b);
            prop_assert_eq!(ab, edit_ratio(&b, &a));
            prop_assert!(ab <= 100);
            prop_assert_eq!(ab == 100, a == b);
        }
    }
}
