use chrono::{DateTime, Local};
use log::{debug, info};

use crate::hunt::answer::verify_answer;
use crate::hunt::types::Mission;
use crate::logutil::escape_log;
use crate::metrics;

/// Query sent to the oracle when the player just asks for help.
pub const DEFAULT_HINT_QUERY: &str = "I'm stuck, I need a hint.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
    Warning,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
        }
    }
}

/// One line of the terminal transcript.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

impl LogLine {
    /// `[HH:MM:SS] LEVEL: text`
    pub fn render(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.at.format("%H:%M:%S"),
            self.level.label(),
            self.text
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Idle,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or the mission was already solved in this session
    Ignored,
    Rejected,
    Accepted,
}

/// A line typed into an interactive terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalInput<'a> {
    /// `:back`
    Back,
    /// `:hint` with an optional question after a space
    Hint(Option<&'a str>),
    Answer(&'a str),
}

impl<'a> TerminalInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed == ":back" {
            return TerminalInput::Back;
        }
        if trimmed == ":hint" {
            return TerminalInput::Hint(None);
        }
        match trimmed.strip_prefix(":hint") {
            Some(rest) if rest.starts_with(char::is_whitespace) => {
                let query = rest.trim();
                TerminalInput::Hint((!query.is_empty()).then_some(query))
            }
            _ => TerminalInput::Answer(line),
        }
    }
}

/// Arguments for the hint collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRequest {
    pub mission_title: String,
    pub mission_context: String,
    pub user_query: String,
}

/// # Mission Terminal
///
/// Simulated secure shell opened on a single mission. The session owns its
/// transcript, the verification status and the "hint in flight" flag; it
/// never touches `UserState`. An accepted answer is reported to the caller,
/// which decides when the reward is applied.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    mission: Mission,
    logs: Vec<LogLine>,
    status: TerminalStatus,
    hint_in_flight: bool,
}

impl TerminalSession {
    pub fn new(mission: &Mission) -> Self {
        let mut session = Self {
            mission: mission.clone(),
            logs: Vec::new(),
            status: TerminalStatus::Idle,
            hint_in_flight: false,
        };
        session.boot();
        session
    }

    fn boot(&mut self) {
        self.log(LogLevel::Info, "INITIALIZING SECURE LINK [SECURE_SOCKET_LAYER]...");
        let title = format!("TARGET IDENTIFIED: {}", self.mission.title);
        self.log(LogLevel::Info, &title);
        let directive = format!("PRIMARY DIRECTIVE: {}", self.mission.description);
        self.log(LogLevel::Info, &directive);
        if let Some(url) = self.mission.clue_url.clone() {
            self.log(LogLevel::Info, &format!("SIGNAL TRACE: {}", url));
        }
        self.log(LogLevel::Warning, "TERMINAL ACTIVE. AWAITING USER INPUT...");
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn logs(&self) -> &[LogLine] {
        &self.logs
    }

    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    pub fn hint_in_flight(&self) -> bool {
        self.hint_in_flight
    }

    pub fn log(&mut self, level: LogLevel, text: &str) {
        self.logs.push(LogLine {
            level,
            text: text.to_string(),
            at: Local::now(),
        });
    }

    /// Check a submitted answer against the mission.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() || self.status == TerminalStatus::Success {
            return SubmitOutcome::Ignored;
        }
        metrics::inc_answers_submitted();
        self.log(LogLevel::Info, &format!("> {}", input));

        if verify_answer(input, &self.mission) {
            self.status = TerminalStatus::Success;
            self.log(LogLevel::Success, "HASH VERIFIED. ACCESS GRANTED.");
            self.log(LogLevel::Success, "RUNNING REWARD SCRIPT...");
            metrics::inc_answers_accepted();
            info!("Mission {} solved", self.mission.id);
            SubmitOutcome::Accepted
        } else {
            self.status = TerminalStatus::Error;
            self.log(
                LogLevel::Error,
                "SYNTAX ERROR OR INVALID HASH. ACCESS DENIED.",
            );
            metrics::inc_answers_rejected();
            debug!(
                "Mission {} rejected answer '{}'",
                self.mission.id,
                escape_log(input)
            );
            SubmitOutcome::Rejected
        }
    }

    /// Start a hint request. `None` while one is already in flight or once the
    /// mission is solved.
    pub fn begin_hint(&mut self, query: Option<&str>) -> Option<HintRequest> {
        if self.hint_in_flight || self.status == TerminalStatus::Success {
            return None;
        }
        self.hint_in_flight = true;
        metrics::inc_hints_requested();
        self.log(
            LogLevel::Warning,
            "ESTABLISHING NEURAL UPLINK WITH THE ORACLE...",
        );
        let user_query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_HINT_QUERY);
        Some(HintRequest {
            mission_title: self.mission.title.clone(),
            mission_context: format!("{} {}", self.mission.description, self.mission.hint),
            user_query: user_query.to_string(),
        })
    }

    /// Record the oracle's reply (or its fallback text) and clear the flag.
    pub fn finish_hint(&mut self, text: &str) {
        self.hint_in_flight = false;
        self.log(LogLevel::Warning, &format!("ORACLE RESPONSE: {}", text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::seeds::seed_missions;

    fn first_mission() -> Mission {
        seed_missions().remove(0)
    }

    #[test]
    fn boot_sequence_mentions_target_and_clue() {
        let session = TerminalSession::new(&first_mission());
        let lines: Vec<_> = session.logs().iter().map(|l| l.text.clone()).collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("O Portal"));
        assert!(lines[3].starts_with("SIGNAL TRACE: https://"));
        assert_eq!(session.logs()[4].level, LogLevel::Warning);
    }

    #[test]
    fn boot_without_clue_skips_trace() {
        let mut mission = first_mission();
        mission.clue_url = None;
        let session = TerminalSession::new(&mission);
        assert_eq!(session.logs().len(), 4);
    }

    #[test]
    fn wrong_then_right_answer() {
        let mut session = TerminalSession::new(&first_mission());
        assert_eq!(session.submit("abre-te sesamo"), SubmitOutcome::Rejected);
        assert_eq!(session.status(), TerminalStatus::Error);

        assert_eq!(
            session.submit("O Tempo Esta A Despertar"),
            SubmitOutcome::Accepted
        );
        assert_eq!(session.status(), TerminalStatus::Success);
        assert_eq!(session.submit("again"), SubmitOutcome::Ignored);
    }

    #[test]
    fn blank_input_is_ignored_without_echo() {
        let mut session = TerminalSession::new(&first_mission());
        let before = session.logs().len();
        assert_eq!(session.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(session.logs().len(), before);
        assert_eq!(session.status(), TerminalStatus::Idle);
    }

    #[test]
    fn hint_requests_do_not_overlap() {
        let mut session = TerminalSession::new(&first_mission());
        let request = session.begin_hint(None).unwrap();
        assert_eq!(request.user_query, DEFAULT_HINT_QUERY);
        assert!(request.mission_context.contains("Inspecionar Elemento"));
        assert!(session.begin_hint(Some("again?")).is_none());

        session.finish_hint("Look deeper.");
        assert!(!session.hint_in_flight());
        assert!(session.logs().last().unwrap().render().contains("ORACLE RESPONSE: Look deeper."));
        assert_eq!(
            session.begin_hint(Some(" what is binary? ")).unwrap().user_query,
            "what is binary?"
        );
    }

    #[test]
    fn no_hints_after_success() {
        let mut session = TerminalSession::new(&first_mission());
        session.submit("o tempo esta a despertar");
        assert!(session.begin_hint(None).is_none());
    }

    #[test]
    fn input_commands_need_exact_keywords() {
        assert_eq!(TerminalInput::parse(" :back "), TerminalInput::Back);
        assert_eq!(TerminalInput::parse(":hint"), TerminalInput::Hint(None));
        assert_eq!(
            TerminalInput::parse(":hint  what is ascii? "),
            TerminalInput::Hint(Some("what is ascii?"))
        );
        assert_eq!(
            TerminalInput::parse(":hintfoo"),
            TerminalInput::Answer(":hintfoo")
        );
        assert_eq!(TerminalInput::parse(":backup"), TerminalInput::Answer(":backup"));
        assert_eq!(TerminalInput::parse("http"), TerminalInput::Answer("http"));
    }

    #[test]
    fn rendered_line_format() {
        let mut session = TerminalSession::new(&first_mission());
        session.log(LogLevel::Error, "boom");
        let rendered = session.logs().last().unwrap().render();
        assert!(rendered.starts_with('['));
        assert!(rendered.ends_with("] ERROR: boom"));
    }
}
