//! Session terminal port.

use std::io;
use std::thread;
use std::time::Duration;

use drill_core::model::{QuizMode, Record, Reveal, SessionReport, Verdict};

use crate::dictionary::DictionaryMatch;
use crate::error::{InputFormatError, LookupError};
use crate::sessions::SKIP_INPUT;

/// Everything needed to display one question.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    /// 1-based number of this question.
    pub position: usize,
    pub total: usize,
    pub record: &'a Record,
    pub reveal: Reveal,
    pub mode: QuizMode,
}

/// Non-fatal conditions reported to the learner mid-session.
#[derive(Debug)]
pub enum Notice<'a> {
    MalformedInput(&'a InputFormatError),
    LookupUnavailable,
    LookupFailed(&'a LookupError),
}

/// Where a session reads answers from and writes feedback to.
///
/// Every method may fail with an I/O error, which ends the session.
pub trait SessionIo {
    fn present(&mut self, prompt: &Prompt<'_>) -> io::Result<()>;

    /// Read one line of learner input. `Ok(None)` means the input is closed.
    fn read_answer(&mut self, prompt: &Prompt<'_>) -> io::Result<Option<String>>;

    fn show_verdict(&mut self, record: &Record, verdict: Verdict) -> io::Result<()>;

    fn show_lookup(&mut self, matches: &[DictionaryMatch]) -> io::Result<()>;

    fn notice(&mut self, notice: Notice<'_>) -> io::Result<()>;

    fn show_report(&mut self, report: &SessionReport) -> io::Result<()>;
}

/// Plays a session without a learner: every question waits for `delay` and
/// is then skipped.
#[derive(Debug)]
pub struct UnattendedIo<I> {
    inner: I,
    delay: Duration,
}

impl<I: SessionIo> UnattendedIo<I> {
    #[must_use]
    pub fn new(inner: I, delay: Duration) -> Self {
        Self { inner, delay }
    }

    #[must_use]
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: SessionIo> SessionIo for UnattendedIo<I> {
    fn present(&mut self, prompt: &Prompt<'_>) -> io::Result<()> {
        self.inner.present(prompt)
    }

    fn read_answer(&mut self, _prompt: &Prompt<'_>) -> io::Result<Option<String>> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(Some(SKIP_INPUT.to_owned()))
    }

    fn show_verdict(&mut self, record: &Record, verdict: Verdict) -> io::Result<()> {
        self.inner.show_verdict(record, verdict)
    }

    fn show_lookup(&mut self, matches: &[DictionaryMatch]) -> io::Result<()> {
        self.inner.show_lookup(matches)
    }

    fn notice(&mut self, notice: Notice<'_>) -> io::Result<()> {
        self.inner.notice(notice)
    }

    fn show_report(&mut self, report: &SessionReport) -> io::Result<()> {
        self.inner.show_report(report)
    }
}
