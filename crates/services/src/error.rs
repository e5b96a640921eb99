//! Shared error types for the services crate.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Learner input that cannot be scored. Never fatal; the learner is re-prompted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputFormatError {
    #[error("expected {expected} comma separated answers, found {found}")]
    WrongPartCount { expected: usize, found: usize },
}

/// Errors raised by a narration collaborator. The engine logs and ignores them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NarrationError {
    #[error("failed to start narrator `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for narrator: {0}")]
    Wait(#[source] io::Error),
    #[error("narrator exited with {0}")]
    Failed(ExitStatus),
}

/// Errors raised by a dictionary collaborator. The engine shows and ignores them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("dictionary line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,
    #[error("no record is being presented")]
    NotPresented,
    #[error("session terminal failed: {0}")]
    Io(#[from] io::Error),
}
