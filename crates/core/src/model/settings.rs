use thiserror::Error;

use crate::model::answer::QuizMode;

/// Documented bounds for the narration speech rate, in words per minute.
pub const MIN_SPEECH_RATE: u16 = 90;
pub const MAX_SPEECH_RATE: u16 = 300;
pub const DEFAULT_SPEECH_RATE: u16 = 180;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("hiding the phrase, hiding the phonetic and disabling sound cannot be combined")]
    AllChannelsDisabled,

    #[error("phrase and phonetic cannot both be hidden when narration is unavailable")]
    NothingToPresent,

    #[error("speech rate must be between {MIN_SPEECH_RATE} and {MAX_SPEECH_RATE} (got {rate})")]
    SpeechRateOutOfRange { rate: u16 },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Which record fields are shown in clear text when a question is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub phrase: bool,
    pub phonetic: bool,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            phrase: true,
            phonetic: true,
        }
    }
}

/// Validated configuration for one quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    mode: QuizMode,
    reveal: Reveal,
    narrate: bool,
    speech_rate: u16,
}

impl SessionSettings {
    /// Build settings from user choices.
    ///
    /// `narration_available` reports whether the platform can speak at all;
    /// when it cannot, narration is switched off rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when every presentation channel would be off or
    /// the speech rate is outside the documented range.
    pub fn new(
        mode: QuizMode,
        reveal: Reveal,
        narrate: bool,
        speech_rate: u16,
        narration_available: bool,
    ) -> Result<Self, SettingsError> {
        if !(MIN_SPEECH_RATE..=MAX_SPEECH_RATE).contains(&speech_rate) {
            return Err(SettingsError::SpeechRateOutOfRange { rate: speech_rate });
        }

        if !reveal.phrase && !reveal.phonetic {
            if !narrate {
                return Err(SettingsError::AllChannelsDisabled);
            }
            if !narration_available {
                return Err(SettingsError::NothingToPresent);
            }
        }

        Ok(Self {
            mode,
            reveal,
            narrate: narrate && narration_available,
            speech_rate,
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn reveal(&self) -> Reveal {
        self.reveal
    }

    #[must_use]
    pub fn narrate(&self) -> bool {
        self.narrate
    }

    #[must_use]
    pub fn speech_rate(&self) -> u16 {
        self.speech_rate
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: QuizMode::default(),
            reveal: Reveal::default(),
            narrate: false,
            speech_rate: DEFAULT_SPEECH_RATE,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    const HIDE_ALL: Reveal = Reveal {
        phrase: false,
        phonetic: false,
    };

    fn full_mode(
        reveal: Reveal,
        narrate: bool,
        rate: u16,
        available: bool,
    ) -> Result<SessionSettings, SettingsError> {
        SessionSettings::new(QuizMode::default(), reveal, narrate, rate, available)
    }

    #[test]
    fn hiding_everything_without_sound_is_rejected() {
        let err = full_mode(HIDE_ALL, false, 180, true).unwrap_err();
        assert_eq!(err, SettingsError::AllChannelsDisabled);
    }

    #[test]
    fn hiding_text_requires_available_narration() {
        let err = full_mode(HIDE_ALL, true, 180, false).unwrap_err();
        assert_eq!(err, SettingsError::NothingToPresent);

        let settings = full_mode(HIDE_ALL, true, 180, true).unwrap();
        assert!(settings.narrate());
    }

    #[test]
    fn narration_is_dropped_when_unavailable() {
        let settings =
            SessionSettings::new(QuizMode::Phonetic, Reveal::default(), true, 200, false).unwrap();
        assert!(!settings.narrate());
        assert_eq!(settings.speech_rate(), 200);
        assert_eq!(settings.mode(), QuizMode::Phonetic);
    }

    #[test]
    fn speech_rate_bounds_are_inclusive() {
        for rate in [MIN_SPEECH_RATE, MAX_SPEECH_RATE] {
            assert!(full_mode(Reveal::default(), true, rate, true).is_ok());
        }
        let err = full_mode(Reveal::default(), true, 89, true).unwrap_err();
        assert_eq!(err, SettingsError::SpeechRateOutOfRange { rate: 89 });
        assert!(full_mode(Reveal::default(), true, 301, true).is_err());
    }
}
