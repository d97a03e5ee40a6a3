//! Character-level classification for mixed kana/Latin answers.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF), prolonged sound mark ー included.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Whether any romaji is still unconverted in `s`.
pub fn contains_latin(s: &str) -> bool {
    s.chars().any(is_latin)
}

/// Convert a katakana string to hiragana.
///
/// Only the letters with a hiragana counterpart (ァ U+30A1..ヶ U+30F6) move;
/// ー, the middle dot, and everything outside the block are passed through.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
