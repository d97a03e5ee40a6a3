//! Romaji/kana transliteration.
//!
//! A single immutable [`RomajiTable`] drives both directions: the forward
//! converter rewrites a whole input-box value on every keystroke, handling
//! sokuon (っ), hatsuon (ん), and yōon (きゃ); the reverse converter spells
//! a known reading for hints.

mod config;
mod convert;
mod reverse;
mod table;


pub use config::{parse_romaji_toml, RomajiConfigError, RomajiMappings, MAX_TOKEN_LEN};
pub use convert::{finalize_kana, romanized_to_kana};
pub use reverse::{kana_to_plain_romaji, kana_to_romanized};
pub use table::{RomajiOptions, RomajiTable, DEFAULT_TOML, NASAL, SOKUON};
