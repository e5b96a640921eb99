mod input;
mod pool;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use input::{LOOKUP_INPUT, LearnerInput, QUIT_INPUT, SKIP_INPUT, parse_input};
pub use pool::RecordPool;
pub use progress::SessionProgress;
pub use service::{QuizSession, SessionPhase, Step};
pub use workflow::SessionEngine;
