use chrono::{DateTime, Utc};

use crate::model::answer::Verdict;
use crate::model::record::Record;

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every record in the pool was asked.
    Exhausted,
    /// The learner entered the quit sentinel or closed the input.
    Quit,
}

//
// ─── TALLY ─────────────────────────────────────────────────────────────────────
//

/// Running score for a session in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTally {
    asked: u32,
    correct: u32,
    phonetic_correct: u32,
    meaning_correct: u32,
    missed: Vec<Record>,
}

impl SessionTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one scored answer. Records with any incorrect axis are kept for review.
    pub fn record(&mut self, record: &Record, verdict: Verdict) {
        self.asked = self.asked.saturating_add(1);
        if verdict.phonetic {
            self.phonetic_correct = self.phonetic_correct.saturating_add(1);
        }
        if verdict.meaning == Some(true) {
            self.meaning_correct = self.meaning_correct.saturating_add(1);
        }
        if verdict.is_correct() {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.missed.push(record.clone());
        }
    }

    #[must_use]
    pub fn asked(&self) -> u32 {
        self.asked
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Share of correct answers in percent, rounded to two decimals.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.asked == 0 {
            return 0.0;
        }
        let raw = f64::from(self.correct) * 100.0 / f64::from(self.asked);
        (raw * 100.0).round() / 100.0
    }

    /// Finish the tally into a report.
    #[must_use]
    pub fn into_report(
        self,
        reason: TerminationReason,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> SessionReport {
        let percentage = self.percentage();
        SessionReport {
            asked: self.asked,
            correct: self.correct,
            phonetic_correct: self.phonetic_correct,
            meaning_correct: self.meaning_correct,
            percentage,
            missed: self.missed,
            reason,
            started_at,
            completed_at,
        }
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Outcome of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub asked: u32,
    /// Answers with every scored axis correct.
    pub correct: u32,
    pub phonetic_correct: u32,
    pub meaning_correct: u32,
    pub percentage: f64,
    /// Mis-answered records in the order they were asked.
    pub missed: Vec<Record>,
    pub reason: TerminationReason,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
