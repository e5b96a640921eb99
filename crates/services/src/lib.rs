#![forbid(unsafe_code)]

pub mod dictionary;
pub mod error;
pub mod io;
pub mod narration;
pub mod sessions;

pub use drill_core::Clock;
pub use sessions as session;

pub use dictionary::{CedictDictionary, Dictionary, DictionaryMatch, MAX_GLOSSES};
pub use error::{InputFormatError, LookupError, NarrationError, SessionError};
pub use io::{Notice, Prompt, SessionIo, UnattendedIo};
pub use narration::{NarrationHandle, Narrator, SayNarrator, SilentNarrator};
pub use sessions::{
    LearnerInput, QuizSession, RecordPool, SessionEngine, SessionPhase, SessionProgress, Step,
};
