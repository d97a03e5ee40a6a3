use std::cmp::Reverse;
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiConfigError, RomajiMappings};

pub const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

/// Syllabic nasal.
pub const NASAL: char = 'ん';
/// Small tsu, the geminate marker.
pub const SOKUON: char = 'っ';

/// Build-time switches for a [`RomajiTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomajiOptions {
    /// Accept the `[alternates]` spellings (`si`, `ti`, `tu`, `hu`, ...) on input.
    pub alternate_spellings: bool,
}

impl Default for RomajiOptions {
    fn default() -> Self {
        Self {
            alternate_spellings: true,
        }
    }
}

/// One romaji token and the kana it produces.
#[derive(Debug, Clone)]
pub(crate) struct ForwardEntry {
    pub token: Box<[char]>,
    pub kana: String,
}

impl ForwardEntry {
    pub fn len(&self) -> usize {
        self.token.len()
    }
}

/// One kana glyph (or combined glyph) and its canonical spelling.
#[derive(Debug, Clone)]
pub(crate) struct ReverseEntry {
    pub glyph: Box<[char]>,
    pub romaji: String,
}

impl ReverseEntry {
    pub fn len(&self) -> usize {
        self.glyph.len()
    }
}

/// Immutable bidirectional romaji/kana lookup.
///
/// Both lists are sorted once here and scanned top-down by the converters,
/// so the first hit is always the longest one. The nasal never appears in
/// the forward list, and neither the nasal nor the small tsu appears in the
/// reverse list: the converters resolve those from context.
#[derive(Debug, Clone)]
pub struct RomajiTable {
    forward: Vec<ForwardEntry>,
    reverse: Vec<ReverseEntry>,
    sokuon_romaji: String,
    options: RomajiOptions,
}

fn default_mappings() -> &'static RomajiMappings {
    static MAPPINGS: OnceLock<RomajiMappings> = OnceLock::new();
    MAPPINGS.get_or_init(|| parse_romaji_toml(DEFAULT_TOML).expect("romaji TOML must be valid"))
}

fn is_contextual(kana: &str) -> bool {
    let mut chars = kana.chars();
    matches!((chars.next(), chars.next()), (Some(NASAL | SOKUON), None))
}

impl RomajiTable {
    pub fn new(mappings: &RomajiMappings, options: RomajiOptions) -> Self {
        let alternates = mappings
            .alternates
            .iter()
            .filter(|_| options.alternate_spellings);

        let mut forward: Vec<ForwardEntry> = mappings
            .canonical
            .iter()
            .chain(alternates)
            .filter(|(_, kana)| kana.as_str() != "ん")
            .map(|(romaji, kana)| ForwardEntry {
                token: romaji.chars().collect(),
                kana: kana.clone(),
            })
            .collect();
        forward.sort_by(|a, b| (Reverse(a.len()), &a.token).cmp(&(Reverse(b.len()), &b.token)));

        let mut reverse: Vec<ReverseEntry> = mappings
            .canonical
            .iter()
            .filter(|(_, kana)| !is_contextual(kana))
            .map(|(romaji, kana)| ReverseEntry {
                glyph: kana.chars().collect(),
                romaji: romaji.clone(),
            })
            .collect();
        reverse.sort_by(|a, b| (Reverse(a.len()), &a.glyph).cmp(&(Reverse(b.len()), &b.glyph)));

        let sokuon_romaji = mappings
            .canonical
            .iter()
            .find(|(_, kana)| kana.as_str() == "っ")
            .map(|(romaji, _)| romaji.clone())
            .unwrap_or_else(|| "xtsu".to_string());

        Self {
            forward,
            reverse,
            sokuon_romaji,
            options,
        }
    }

    /// Build from a custom TOML document.
    pub fn from_toml(toml_str: &str, options: RomajiOptions) -> Result<Self, RomajiConfigError> {
        let mappings = parse_romaji_toml(toml_str)?;
        Ok(Self::new(&mappings, options))
    }

    /// The embedded default table with the given options.
    pub fn with_options(options: RomajiOptions) -> Self {
        Self::new(default_mappings(), options)
    }

    /// The embedded default table with default options, built on first use.
    pub fn shared() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| RomajiTable::with_options(RomajiOptions::default()))
    }

    pub fn options(&self) -> RomajiOptions {
        self.options
    }

    /// Exact lookup of one input token. The nasal `n` is not a token.
    pub fn lookup(&self, romaji: &str) -> Option<&str> {
        self.forward
            .iter()
            .find(|e| e.token.iter().copied().eq(romaji.chars()))
            .map(|e| e.kana.as_str())
    }

    /// Canonical spelling of a kana glyph.
    pub fn romaji_for(&self, kana: &str) -> Option<&str> {
        match kana {
            "ん" => Some("n"),
            "っ" => Some(self.sokuon_romaji.as_str()),
            _ => self
                .reverse
                .iter()
                .find(|e| e.glyph.iter().copied().eq(kana.chars()))
                .map(|e| e.romaji.as_str()),
        }
    }

    /// Every glyph reverse conversion knows about, nasal and small tsu included.
    pub fn glyphs(&self) -> Vec<String> {
        let mut glyphs: Vec<String> = self
            .reverse
            .iter()
            .map(|e| e.glyph.iter().collect())
            .collect();
        glyphs.push(NASAL.to_string());
        glyphs.push(SOKUON.to_string());
        glyphs
    }

    /// Longest input token that `rest` starts with.
    pub(crate) fn match_token(&self, rest: &[char]) -> Option<&ForwardEntry> {
        self.forward.iter().find(|e| rest.starts_with(&e.token))
    }

    /// Longest glyph that `rest` starts with.
    pub(crate) fn match_glyph(&self, rest: &[char]) -> Option<&ReverseEntry> {
        self.reverse.iter().find(|e| rest.starts_with(&e.glyph))
    }

    pub(crate) fn sokuon_romaji(&self) -> &str {
        &self.sokuon_romaji
    }
}

impl Default for RomajiTable {
    fn default() -> Self {
        Self::with_options(RomajiOptions::default())
    }
}
