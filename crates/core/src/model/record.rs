use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::model::alphabet::{MULTI_TONE_MARKER, PhoneticAlphabet, PhraseAlphabet};
use crate::model::ids::RecordId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Which column of a record a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Phrase,
    Phonetic,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Phrase => "phrase",
            Field::Phonetic => "phonetic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("{field} contains invalid character {ch:?} ({})", .ch.escape_unicode())]
    InvalidCharacter { field: Field, ch: char },

    #[error("phrase has {characters} characters but phonetic has {syllables} syllables")]
    StructuralMismatch { characters: usize, syllables: usize },
}

//
// ─── VALIDATION RULES ──────────────────────────────────────────────────────────
//

/// Constraints every record must satisfy before it can be studied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub phrase_alphabet: PhraseAlphabet,
    pub phonetic_alphabet: PhoneticAlphabet,
    /// Require one phonetic syllable per phrase character.
    pub strict: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            phrase_alphabet: PhraseAlphabet::default(),
            phonetic_alphabet: PhoneticAlphabet::default(),
            strict: true,
        }
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// Unvalidated record as read from a word list.
///
/// The serde names follow the JSON word lists (`chinese`, `pinyin`, `english`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordDraft {
    #[serde(rename = "chinese")]
    pub phrase: String,
    #[serde(rename = "pinyin")]
    pub phonetic: String,
    #[serde(rename = "english")]
    pub meaning: String,
}

impl RecordDraft {
    #[must_use]
    pub fn new(
        phrase: impl Into<String>,
        phonetic: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            phonetic: phonetic.into(),
            meaning: meaning.into(),
        }
    }

    /// Check the draft against `rules` and assign it `id`.
    ///
    /// Checks run in order: phrase alphabet, phonetic alphabet, then (strict
    /// only) the character/syllable count.
    ///
    /// # Errors
    ///
    /// Returns the first `RecordError` encountered.
    pub fn validate(self, id: RecordId, rules: &ValidationRules) -> Result<Record, RecordError> {
        if let Some(ch) = rules.phrase_alphabet.first_invalid(&self.phrase) {
            return Err(RecordError::InvalidCharacter {
                field: Field::Phrase,
                ch,
            });
        }

        if let Some(ch) = rules.phonetic_alphabet.first_invalid(&self.phonetic) {
            return Err(RecordError::InvalidCharacter {
                field: Field::Phonetic,
                ch,
            });
        }

        if rules.strict && !self.phonetic.contains(MULTI_TONE_MARKER) {
            let characters = self.phrase.chars().count();
            let syllables = self.phonetic.split(' ').count();
            if characters != syllables {
                return Err(RecordError::StructuralMismatch {
                    characters,
                    syllables,
                });
            }
        }

        Ok(Record {
            id,
            phrase: self.phrase,
            phonetic: self.phonetic,
            meaning: self.meaning,
        })
    }
}

/// A validated study item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    phrase: String,
    phonetic: String,
    meaning: String,
}

impl Record {
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.phrase, self.phonetic, self.meaning)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    #[test]
    fn valid_draft_becomes_record() {
        let record = RecordDraft::new("你好", "ni3 hao3", "hello; hi")
            .validate(RecordId::new(0), &rules())
            .unwrap();

        assert_eq!(record.id(), RecordId::new(0));
        assert_eq!(record.phrase(), "你好");
        assert_eq!(record.phonetic(), "ni3 hao3");
        assert_eq!(record.meaning(), "hello; hi");
        assert_eq!(record.to_string(), "你好,ni3 hao3,hello; hi");
    }

    #[test]
    fn phrase_outside_alphabet_is_rejected() {
        let err = RecordDraft::new("你A", "ni3 a1", "x")
            .validate(RecordId::new(0), &rules())
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidCharacter {
                field: Field::Phrase,
                ch: 'A',
            }
        );
    }

    #[test]
    fn phrase_is_checked_before_phonetic() {
        let err = RecordDraft::new("A", "BAD", "x")
            .validate(RecordId::new(0), &rules())
            .unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidCharacter {
                field: Field::Phrase,
                ..
            }
        ));
    }

    #[test]
    fn phonetic_outside_alphabet_is_rejected() {
        let err = RecordDraft::new("你", "ni5", "you")
            .validate(RecordId::new(0), &rules())
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidCharacter {
                field: Field::Phonetic,
                ch: '5',
            }
        );
    }

    #[test]
    fn strict_mode_requires_one_syllable_per_character() {
        let err = RecordDraft::new("你好", "ni3hao3", "hello")
            .validate(RecordId::new(0), &rules())
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::StructuralMismatch {
                characters: 2,
                syllables: 1,
            }
        );
    }

    #[test]
    fn multi_tone_marker_skips_structure_check() {
        let record =
            RecordDraft::new("一个", "yi2::ge4", "one").validate(RecordId::new(3), &rules());
        assert!(record.is_ok());
    }

    #[test]
    fn lenient_mode_skips_structure_check() {
        let lenient = ValidationRules {
            strict: false,
            ..ValidationRules::default()
        };
        let record =
            RecordDraft::new("你好", "ni3hao3", "hello").validate(RecordId::new(0), &lenient);
        assert!(record.is_ok());
    }
}
