use tracing::debug_span;

use super::convert::{is_geminable, is_vowel};
use super::table::{RomajiTable, NASAL, SOKUON};
use crate::unicode::katakana_to_hiragana;

enum Piece<'a> {
    Glyph(&'a str),
    Nasal,
    Sokuon,
    Other(char),
}

/// Spell a kana string in romaji, for display in hints.
///
/// Each glyph gets its canonical spelling, combined glyphs first. The nasal
/// and the small tsu depend on what follows, and are spelled so that typing
/// the hint back into [`romanized_to_kana`](super::romanized_to_kana)
/// reproduces the kana. Katakana is read as hiragana; anything else is
/// copied through.
pub fn kana_to_romanized(table: &RomajiTable, input: &str) -> String {
    let _span = debug_span!("kana_to_romanized", len = input.len()).entered();
    spell(table, input, false)
}

/// Spell a kana string the way it reads, with ん always as `n`.
///
/// Not reversible (`きんえん` gives `kinen`), but it is what someone typing
/// an English word into a kana box meant: `てん` is `ten`, not `tenn`.
pub fn kana_to_plain_romaji(table: &RomajiTable, input: &str) -> String {
    let _span = debug_span!("kana_to_plain_romaji", len = input.len()).entered();
    spell(table, input, true)
}

fn spell(table: &RomajiTable, input: &str, plain: bool) -> String {
    let chars: Vec<char> = katakana_to_hiragana(input).chars().collect();
    let mut pieces = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let rest = &chars[i..];
        let (piece, len) = match rest[0] {
            NASAL => (Piece::Nasal, 1),
            SOKUON => (Piece::Sokuon, 1),
            c => match table.match_glyph(rest) {
                Some(entry) => (Piece::Glyph(entry.romaji.as_str()), entry.len()),
                None => (Piece::Other(c), 1),
            },
        };
        pieces.push(piece);
        i += len;
    }

    // Walk backwards so each piece knows how the following one is spelled.
    let mut spelled: Vec<String> = Vec::with_capacity(pieces.len());
    let mut next_lead: Option<char> = None;
    for piece in pieces.iter().rev() {
        let text = match piece {
            Piece::Glyph(romaji) => romaji.to_string(),
            Piece::Other(c) => c.to_string(),
            Piece::Nasal if plain => "n".to_string(),
            Piece::Nasal => spell_nasal(next_lead).to_string(),
            Piece::Sokuon => match next_lead {
                Some(c) if is_geminable(c) => c.to_string(),
                _ => table.sokuon_romaji().to_string(),
            },
        };
        next_lead = text.chars().next().map(|c| c.to_ascii_lowercase());
        spelled.push(text);
    }
    spelled.reverse();
    spelled.concat()
}

fn spell_nasal(next_lead: Option<char>) -> &'static str {
    match next_lead {
        Some(c) if c.is_whitespace() => "n",
        Some(c) if is_vowel(c) || c == 'y' => "n'",
        Some(c) if c.is_ascii_lowercase() && c != 'n' => "n",
        // A trailing nn is still pending on input; n' is not.
        None => "n'",
        _ => "nn",
    }
}
