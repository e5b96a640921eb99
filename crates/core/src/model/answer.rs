use crate::model::record::Record;

/// Which parts of a record the learner must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizMode {
    /// Phonetic transcription only.
    Phonetic,
    /// Phonetic transcription and meaning, separated by a comma.
    #[default]
    PhoneticAndMeaning,
}

impl QuizMode {
    /// Number of comma separated sub-answers expected per turn.
    #[must_use]
    pub fn answer_parts(self) -> usize {
        match self {
            QuizMode::Phonetic => 1,
            QuizMode::PhoneticAndMeaning => 2,
        }
    }

    #[must_use]
    pub fn asks_meaning(self) -> bool {
        matches!(self, QuizMode::PhoneticAndMeaning)
    }
}

/// A learner's structured answer for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub phonetic: String,
    pub meaning: Option<String>,
}

impl Answer {
    #[must_use]
    pub fn phonetic_only(phonetic: impl Into<String>) -> Self {
        Self {
            phonetic: phonetic.into(),
            meaning: None,
        }
    }

    #[must_use]
    pub fn with_meaning(phonetic: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            phonetic: phonetic.into(),
            meaning: Some(meaning.into()),
        }
    }

    /// Score this answer against `record`.
    ///
    /// The phonetic part must equal the reference after trimming, ignoring
    /// case. The meaning part must be non-empty and appear somewhere in the
    /// reference meaning, ignoring case.
    #[must_use]
    pub fn score(&self, record: &Record) -> Verdict {
        let phonetic =
            self.phonetic.trim().to_lowercase() == record.phonetic().trim().to_lowercase();
        let meaning = self.meaning.as_deref().map(|guess| {
            let guess = guess.trim().to_lowercase();
            !guess.is_empty() && record.meaning().to_lowercase().contains(&guess)
        });
        Verdict { phonetic, meaning }
    }
}

/// Independent per-axis outcome of scoring one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub phonetic: bool,
    /// `None` when the meaning was not asked for.
    pub meaning: Option<bool>,
}

impl Verdict {
    /// True when every scored axis is correct.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.phonetic && self.meaning.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordDraft, RecordId, ValidationRules};

    fn nihao() -> Record {
        RecordDraft::new("你好", "ni3 hao3", "hello; hi")
            .validate(RecordId::new(0), &ValidationRules::default())
            .unwrap()
    }

    #[test]
    fn phonetic_match_ignores_case_and_outer_whitespace() {
        let verdict = Answer::with_meaning("NI3 HAO3", "hi").score(&nihao());
        assert!(verdict.phonetic);
        assert_eq!(verdict.meaning, Some(true));
        assert!(verdict.is_correct());

        let verdict = Answer::phonetic_only("  ni3 hao3 ").score(&nihao());
        assert!(verdict.phonetic);
        assert_eq!(verdict.meaning, None);
        assert!(verdict.is_correct());
    }

    #[test]
    fn inner_whitespace_matters_for_phonetic() {
        let verdict = Answer::with_meaning("ni3hao3", "bye").score(&nihao());
        assert!(!verdict.phonetic);
        assert_eq!(verdict.meaning, Some(false));
        assert!(!verdict.is_correct());
    }

    #[test]
    fn meaning_matches_by_substring() {
        let verdict = Answer::with_meaning("ni3 hao3", "HELLO").score(&nihao());
        assert_eq!(verdict.meaning, Some(true));

        let verdict = Answer::with_meaning("ni3 hao3", "ell").score(&nihao());
        assert_eq!(verdict.meaning, Some(true));
    }

    #[test]
    fn empty_meaning_never_matches() {
        let verdict = Answer::with_meaning("ni3 hao3", "  ").score(&nihao());
        assert!(verdict.phonetic);
        assert_eq!(verdict.meaning, Some(false));
        assert!(!verdict.is_correct());
    }

    #[test]
    fn quiz_mode_answer_parts() {
        assert_eq!(QuizMode::Phonetic.answer_parts(), 1);
        assert_eq!(QuizMode::PhoneticAndMeaning.answer_parts(), 2);
        assert!(!QuizMode::Phonetic.asks_meaning());
    }
}
