mod alphabet;
mod answer;
mod ids;
mod record;
mod report;
mod settings;

pub use alphabet::{MULTI_TONE_MARKER, PhoneticAlphabet, PhraseAlphabet};
pub use answer::{Answer, QuizMode, Verdict};
pub use ids::RecordId;
pub use record::{Field, Record, RecordDraft, RecordError, ValidationRules};
pub use report::{SessionReport, SessionTally, TerminationReason};
pub use settings::{
    DEFAULT_SPEECH_RATE, MAX_SPEECH_RATE, MIN_SPEECH_RATE, Reveal, SessionSettings, SettingsError,
};
