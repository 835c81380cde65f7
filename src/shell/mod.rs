//! Interactive layer: terminal sessions, deferred transitions, the oracle
//! hint client and the text views driven by the CLI.

pub mod app;
pub mod hint;
pub mod render;
pub mod scheduler;
pub mod terminal;

pub use app::{HuntShell, ShellAction, View};
pub use hint::HintService;
pub use scheduler::{Scheduler, TaskId};
pub use terminal::{
    HintRequest, LogLevel, LogLine, SubmitOutcome, TerminalInput, TerminalSession, TerminalStatus,
};
