//! Narration port: speak a phrase aloud and hand back a join handle.

use std::process::{Child, Command};

use crate::error::NarrationError;

/// Speaks text at a given rate (words per minute).
pub trait Narrator {
    /// Start speaking `text`.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError` if narration cannot be started.
    fn speak(&self, text: &str, rate: u16) -> Result<NarrationHandle, NarrationError>;
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Running (or already finished) narration.
///
/// Dropping an unwaited handle blocks until the narration ends, so audio for a
/// phrase can never overlap a second request for the same phrase.
#[derive(Debug)]
pub struct NarrationHandle {
    child: Option<Child>,
}

impl NarrationHandle {
    /// A handle for narration that has nothing left to wait on.
    #[must_use]
    pub fn finished() -> Self {
        Self { child: None }
    }

    #[must_use]
    pub fn from_child(child: Child) -> Self {
        Self { child: Some(child) }
    }

    /// Block until narration completes.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Wait` if the process cannot be waited on, or
    /// `NarrationError::Failed` if it exits unsuccessfully.
    pub fn wait(mut self) -> Result<(), NarrationError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(NarrationError::Wait)?;
        if status.success() {
            Ok(())
        } else {
            Err(NarrationError::Failed(status))
        }
    }
}

impl Drop for NarrationHandle {
    fn drop(&mut self) {
        if let Some(Err(err)) = self.child.take().map(|mut child| child.wait()) {
            log::warn!("narration process could not be reaped: {err}");
        }
    }
}

//
// ─── NARRATORS ─────────────────────────────────────────────────────────────────
//

/// Narrator backed by the macOS `say` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SayNarrator {
    program: String,
    voice: String,
}

impl SayNarrator {
    pub const DEFAULT_VOICE: &'static str = "Ting-Ting";

    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "say".to_owned(),
            voice: Self::DEFAULT_VOICE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Use a different executable with the same argument layout as `say`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Whether the `say` command exists on this platform.
    #[must_use]
    pub fn is_available() -> bool {
        cfg!(target_os = "macos")
    }
}

impl Default for SayNarrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Narrator for SayNarrator {
    fn speak(&self, text: &str, rate: u16) -> Result<NarrationHandle, NarrationError> {
        log::debug!("narrating {text:?} at {rate} wpm with voice {}", self.voice);
        let child = Command::new(&self.program)
            .arg(format!("--voice={}", self.voice))
            .arg(format!("--rate={rate}"))
            .arg(text)
            .spawn()
            .map_err(|source| NarrationError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        Ok(NarrationHandle::from_child(child))
    }
}

/// Narrator for sessions with sound disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&self, _text: &str, _rate: u16) -> Result<NarrationHandle, NarrationError> {
        Ok(NarrationHandle::finished())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_narrator_finishes_immediately() {
        let handle = SilentNarrator.speak("你好", 180).unwrap();
        assert!(handle.wait().is_ok());
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let narrator = SayNarrator::new().with_program("definitely-not-a-narrator-binary");
        let err = narrator.speak("你好", 180).unwrap_err();
        assert!(matches!(err, NarrationError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn handle_waits_for_process_exit() {
        let ok = SayNarrator::new().with_program("true");
        assert!(ok.speak("你好", 180).unwrap().wait().is_ok());

        let failing = SayNarrator::new().with_program("false");
        let handle = failing.speak("你好", 180).unwrap();
        assert!(matches!(handle.wait(), Err(NarrationError::Failed(_))));
    }
}
