use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Marker in a phonetic transcription flagging a non-standard tone transition.
///
/// Transcriptions containing it are exempt from the syllable count check.
pub const MULTI_TONE_MARKER: &str = "::";

//
// ─── PHRASE ALPHABET ───────────────────────────────────────────────────────────
//

/// Characters allowed in a source phrase: one code point range plus
/// individually whitelisted characters outside of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseAlphabet {
    range: RangeInclusive<char>,
    exceptions: BTreeSet<char>,
}

impl PhraseAlphabet {
    #[must_use]
    pub fn new(range: RangeInclusive<char>, exceptions: impl IntoIterator<Item = char>) -> Self {
        Self {
            range,
            exceptions: exceptions.into_iter().collect(),
        }
    }

    /// CJK Unified Ideographs, plus the ideographic zero and the full-width
    /// comma and full stop which sit outside that block.
    #[must_use]
    pub fn cjk() -> Self {
        Self::new('\u{4E00}'..='\u{9FFF}', ['〇', '，', '。'])
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.range.contains(&ch) || self.exceptions.contains(&ch)
    }

    /// Returns the first character of `text` outside the alphabet.
    #[must_use]
    pub fn first_invalid(&self, text: &str) -> Option<char> {
        text.chars().find(|ch| !self.contains(*ch))
    }
}

impl Default for PhraseAlphabet {
    fn default() -> Self {
        Self::cjk()
    }
}

//
// ─── PHONETIC ALPHABET ─────────────────────────────────────────────────────────
//

/// Characters allowed in a phonetic transcription.
///
/// The stock alphabet is numbered pinyin: lowercase letters, tone digits 1-4,
/// a space between syllables and `:` for the multi-tone marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticAlphabet {
    allowed: BTreeSet<char>,
}

impl PhoneticAlphabet {
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = char>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn numbered_pinyin() -> Self {
        Self::new(('a'..='z').chain('1'..='4').chain([' ', ':']))
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.allowed.contains(&ch)
    }

    #[must_use]
    pub fn first_invalid(&self, text: &str) -> Option<char> {
        text.chars().find(|ch| !self.contains(*ch))
    }
}

impl Default for PhoneticAlphabet {
    fn default() -> Self {
        Self::numbered_pinyin()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
