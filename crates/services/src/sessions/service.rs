use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use drill_core::model::{
    QuizMode, Record, RecordId, SessionReport, SessionTally, TerminationReason, Verdict,
};

use super::input::{LearnerInput, parse_input};
use super::pool::RecordPool;
use super::progress::SessionProgress;
use crate::error::{InputFormatError, SessionError};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session stands between learner inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A record must be (re)displayed before input is accepted.
    Presenting,
    AwaitingInput,
    Terminated(TerminationReason),
}

/// Outcome of submitting one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Empty input: present the same record again.
    Repeat,
    /// Lookup requested for the current record; still awaiting input.
    Lookup,
    /// Input could not be scored; still awaiting input.
    Rejected(InputFormatError),
    /// The record was scored and retired.
    Scored { record: Record, verdict: Verdict },
    Terminated(TerminationReason),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over a record pool, free of any I/O.
///
/// Call [`QuizSession::present`] to get the record to show, then feed learner
/// lines to [`QuizSession::submit`] until it reports termination.
pub struct QuizSession<R = StdRng> {
    pool: RecordPool,
    mode: QuizMode,
    rng: R,
    current: Option<RecordId>,
    phase: SessionPhase,
    tally: SessionTally,
    started_at: DateTime<Utc>,
}

impl QuizSession<StdRng> {
    /// Create a session with an OS-seeded random generator.
    #[must_use]
    pub fn new(records: Vec<Record>, mode: QuizMode, started_at: DateTime<Utc>) -> Self {
        Self::with_rng(records, mode, StdRng::from_os_rng(), started_at)
    }

    /// Create a session whose draw order is fixed by `seed`.
    #[must_use]
    pub fn seeded(
        records: Vec<Record>,
        mode: QuizMode,
        seed: u64,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self::with_rng(records, mode, StdRng::seed_from_u64(seed), started_at)
    }
}

impl<R: Rng> QuizSession<R> {
    #[must_use]
    pub fn with_rng(
        records: Vec<Record>,
        mode: QuizMode,
        rng: R,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pool: RecordPool::new(records),
            mode,
            rng,
            current: None,
            phase: SessionPhase::Presenting,
            tally: SessionTally::new(),
            started_at,
        }
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::Terminated(_))
    }

    /// The record on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Record> {
        self.current.and_then(|id| self.pool.get(id))
    }

    /// 1-based number of the question being asked.
    #[must_use]
    pub fn position(&self) -> usize {
        self.tally.asked() as usize + 1
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.pool.total(),
            asked: self.tally.asked() as usize,
            remaining: self.pool.remaining(),
            is_complete: self.is_complete(),
        }
    }

    /// Return the record to display, drawing a new one if none is pending.
    ///
    /// Returns `None` once the session has terminated; an exhausted pool
    /// terminates the session here.
    pub fn present(&mut self) -> Option<&Record> {
        if self.is_complete() {
            return None;
        }

        let id = match self.current {
            Some(id) => id,
            None => {
                let Some(id) = self.pool.draw(&mut self.rng) else {
                    self.phase = SessionPhase::Terminated(TerminationReason::Exhausted);
                    return None;
                };
                log::debug!("drew record {id}, {} remaining", self.pool.remaining());
                self.current = Some(id);
                id
            }
        };

        self.phase = SessionPhase::AwaitingInput;
        self.pool.get(id)
    }

    /// Feed one line of learner input for the presented record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after termination and
    /// `SessionError::NotPresented` if no record is awaiting an answer.
    pub fn submit(&mut self, line: &str) -> Result<Step, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let Some(id) = self.current.filter(|_| self.phase == SessionPhase::AwaitingInput) else {
            return Err(SessionError::NotPresented);
        };

        let input = match parse_input(line, self.mode) {
            Ok(input) => input,
            Err(err) => return Ok(Step::Rejected(err)),
        };

        match input {
            LearnerInput::Repeat => {
                self.phase = SessionPhase::Presenting;
                Ok(Step::Repeat)
            }
            LearnerInput::Lookup => Ok(Step::Lookup),
            LearnerInput::Quit => {
                self.quit();
                Ok(Step::Terminated(TerminationReason::Quit))
            }
            LearnerInput::Answer(answer) => {
                let record = self.pool.get(id).ok_or(SessionError::NotPresented)?.clone();
                let verdict = answer.score(&record);
                self.tally.record(&record, verdict);
                self.pool.retire(id);
                self.current = None;
                self.phase = if self.pool.is_exhausted() {
                    SessionPhase::Terminated(TerminationReason::Exhausted)
                } else {
                    SessionPhase::Presenting
                };
                Ok(Step::Scored { record, verdict })
            }
        }
    }

    /// End the session now; the pending record, if any, is discarded unscored.
    pub fn quit(&mut self) {
        if !self.is_complete() {
            self.current = None;
            self.phase = SessionPhase::Terminated(TerminationReason::Quit);
        }
    }

    /// Close the session and build its report.
    #[must_use]
    pub fn finish(self, completed_at: DateTime<Utc>) -> SessionReport {
        let reason = match self.phase {
            SessionPhase::Terminated(reason) => reason,
            _ => TerminationReason::Quit,
        };
        self.tally.into_report(reason, self.started_at, completed_at)
    }
}

impl<R> fmt::Debug for QuizSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("total", &self.pool.total())
            .field("remaining", &self.pool.remaining())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("asked", &self.tally.asked())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
