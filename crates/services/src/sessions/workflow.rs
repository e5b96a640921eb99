use drill_core::Clock;
use drill_core::model::{Record, SessionReport, SessionSettings};

use super::service::{QuizSession, Step};
use crate::dictionary::{Dictionary, DictionaryMatch};
use crate::error::SessionError;
use crate::io::{Notice, Prompt, SessionIo};
use crate::narration::Narrator;

/// Runs a quiz session against a terminal and the optional collaborators.
///
/// Narration is synchronous: the engine waits for the narrator to finish
/// before reading input. Collaborator failures are logged and never end the
/// session.
pub struct SessionEngine<'a> {
    settings: SessionSettings,
    narrator: &'a dyn Narrator,
    dictionary: Option<&'a dyn Dictionary>,
    clock: Clock,
    seed: Option<u64>,
}

impl<'a> SessionEngine<'a> {
    #[must_use]
    pub fn new(settings: SessionSettings, narrator: &'a dyn Narrator) -> Self {
        Self {
            settings,
            narrator,
            dictionary: None,
            clock: Clock::system(),
            seed: None,
        }
    }

    /// Attach a dictionary so the lookup sentinel has something to query.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: &'a dyn Dictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fix the draw order.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Quiz the learner on `records` until the pool is empty or they quit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the terminal fails. Malformed input and
    /// collaborator failures are handled inside the loop.
    pub fn run(
        &self,
        records: Vec<Record>,
        io: &mut dyn SessionIo,
    ) -> Result<SessionReport, SessionError> {
        let mode = self.settings.mode();
        let started_at = self.clock.now();
        let mut session = match self.seed {
            Some(seed) => QuizSession::seeded(records, mode, seed, started_at),
            None => QuizSession::new(records, mode, started_at),
        };
        let total = session.progress().total;
        log::info!("starting session with {total} records");

        'questions: while let Some(record) = session.present().cloned() {
            let prompt = Prompt {
                position: session.position(),
                total,
                record: &record,
                reveal: self.settings.reveal(),
                mode,
            };
            io.present(&prompt)?;
            self.narrate(record.phrase());

            loop {
                let Some(line) = io.read_answer(&prompt)? else {
                    log::debug!("input closed, ending session");
                    session.quit();
                    break 'questions;
                };

                match session.submit(&line)? {
                    Step::Repeat => continue 'questions,
                    Step::Lookup => self.lookup(record.phrase(), io)?,
                    Step::Rejected(err) => io.notice(Notice::MalformedInput(&err))?,
                    Step::Scored { record, verdict } => {
                        io.show_verdict(&record, verdict)?;
                        continue 'questions;
                    }
                    Step::Terminated(_) => break 'questions,
                }
            }
        }

        let report = session.finish(self.clock.now());
        log::info!(
            "session finished ({:?}): {}/{} correct",
            report.reason,
            report.correct,
            report.asked
        );
        io.show_report(&report)?;
        Ok(report)
    }

    fn narrate(&self, phrase: &str) {
        if !self.settings.narrate() {
            return;
        }
        let outcome = self
            .narrator
            .speak(phrase, self.settings.speech_rate())
            .and_then(|handle| handle.wait());
        if let Err(err) = outcome {
            log::warn!("narration failed for {phrase:?}: {err}");
        }
    }

    fn lookup(&self, phrase: &str, io: &mut dyn SessionIo) -> Result<(), SessionError> {
        let Some(dictionary) = self.dictionary else {
            io.notice(Notice::LookupUnavailable)?;
            return Ok(());
        };

        match dictionary.lookup(phrase) {
            Ok(matches) => {
                let matches: Vec<DictionaryMatch> = matches.collect();
                io.show_lookup(&matches)?;
            }
            Err(err) => {
                log::warn!("dictionary lookup failed for {phrase:?}: {err}");
                io.notice(Notice::LookupFailed(&err))?;
            }
        }
        Ok(())
    }
}
