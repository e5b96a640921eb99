use drill_core::model::{Answer, QuizMode};

use crate::error::InputFormatError;

/// Ends the session without scoring the current record.
pub const QUIT_INPUT: &str = ".";
/// Looks the current phrase up in the dictionary.
pub const LOOKUP_INPUT: &str = "?";
/// Forfeits the current record; scored as incorrect on every axis.
pub const SKIP_INPUT: &str = ",";

/// One line of learner input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnerInput {
    /// Empty line: show the same record again.
    Repeat,
    Lookup,
    Quit,
    Answer(Answer),
}

/// Classify a line of input. Sentinels are recognised before any answer parsing.
///
/// # Errors
///
/// Returns `InputFormatError` when the line does not split into the number of
/// answers `mode` expects.
pub fn parse_input(line: &str, mode: QuizMode) -> Result<LearnerInput, InputFormatError> {
    let line = line.trim();
    match line {
        "" => return Ok(LearnerInput::Repeat),
        LOOKUP_INPUT => return Ok(LearnerInput::Lookup),
        QUIT_INPUT => return Ok(LearnerInput::Quit),
        _ => {}
    }

    match mode {
        QuizMode::Phonetic => Ok(LearnerInput::Answer(Answer::phonetic_only(line))),
        QuizMode::PhoneticAndMeaning => {
            let parts: Vec<&str> = line.split(',').collect();
            match parts.as_slice() {
                [phonetic, meaning] => {
                    Ok(LearnerInput::Answer(Answer::with_meaning(*phonetic, *meaning)))
                }
                _ => Err(InputFormatError::WrongPartCount {
                    expected: mode.answer_parts(),
                    found: parts.len(),
                }),
            }
        }
    }
}
