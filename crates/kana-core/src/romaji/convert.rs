use tracing::debug_span;

use super::table::{RomajiTable, NASAL, SOKUON};

pub(super) fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Consonants that double into a small tsu. A doubled `n` is the nasal instead.
pub(super) fn is_geminable(ch: char) -> bool {
    ch.is_ascii_lowercase() && !is_vowel(ch) && ch != 'n'
}

/// Whether a standalone `n` followed by `next` is already the nasal.
///
/// A vowel or `y` could still complete a syllable (`na`, `nya`), so those
/// never settle it. Without `force`, neither does the end of input.
fn settles_nasal(next: Option<char>, force: bool) -> bool {
    match next {
        Some(c) if c.is_whitespace() => true,
        Some(c) if c.is_ascii_lowercase() => !is_vowel(c) && c != 'y',
        _ => force,
    }
}

/// Convert the full current contents of an input box to kana.
///
/// Called on every keystroke with the whole value, kana already placed
/// included. Syllables that are not complete yet (a trailing `n` or `nn`,
/// `k`, `sh`, ...) are left as typed so the next call can finish them, so
/// converting after each key gives the same text as converting once.
pub fn romanized_to_kana(table: &RomajiTable, input: &str) -> String {
    convert(table, input, false)
}

/// Like [`romanized_to_kana`], for a submitted answer: a trailing `n` or
/// `nn`, or a standalone `n` that no further letter follows, becomes ん.
pub fn finalize_kana(table: &RomajiTable, input: &str) -> String {
    convert(table, input, true)
}

fn convert(table: &RomajiTable, input: &str, force: bool) -> String {
    let _span = debug_span!("romanized_to_kana", len = input.len(), force).entered();

    let chars: Vec<char> = input.to_lowercase().chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let rest = &chars[i..];
        let next = rest.get(1).copied();

        if rest[0] == 'n' {
            match next {
                Some('n') => {
                    let after = rest.get(2).copied();
                    if after.is_none() && !force {
                        // ん or ん plus an n-syllable; the next key decides.
                        out.push_str("nn");
                        i += 2;
                        continue;
                    }
                    out.push(NASAL);
                    // Before a vowel or y the second n opens the next syllable.
                    let opens_next = after.is_some_and(|c| is_vowel(c) || c == 'y');
                    i += if opens_next { 1 } else { 2 };
                    continue;
                }
                Some('\'') => {
                    out.push(NASAL);
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }

        if let Some(entry) = table.match_token(rest) {
            out.push_str(&entry.kana);
            i += entry.len();
            continue;
        }

        match rest[0] {
            'n' if settles_nasal(next, force) => out.push(NASAL),
            c if is_geminable(c) && next == Some(c) => out.push(SOKUON),
            't' if next == Some('c') && rest.get(2) == Some(&'h') => out.push(SOKUON),
            c => out.push(c),
        }
        i += 1;
    }

    out
}
