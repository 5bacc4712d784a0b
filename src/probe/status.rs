//! Nagios service states and the verdict a probe reports.
//!
//! A [`Verdict`] is the whole outcome of a probe: the state, the message for
//! the operator and the process exit code. The exit code normally follows
//! the state, but it can be overridden for the few cases where the plugins
//! have always exited with a different code (see [`Verdict::with_exit_code`]).
use std::fmt;

/// Tokens that let an operator, or a dashboard showing free text, classify
/// a status line without looking at the exit code.
const SEVERITY_TOKENS: [&str; 5] = ["OK", "WARNING", "ERROR", "CRITICAL", "UNKNOWN"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    state: ServiceState,
    exit_code: u8,
    message: String,
}

impl Verdict {
    #[must_use]
    pub fn new(state: ServiceState, message: impl Into<String>) -> Self {
        Self {
            state,
            exit_code: state.exit_code(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(ServiceState::Ok, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ServiceState::Warning, message)
    }

    #[must_use]
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(ServiceState::Critical, message)
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ServiceState::Unknown, message)
    }

    /// Keeps the state but exits with another code.
    #[must_use]
    pub fn with_exit_code(mut self, exit_code: u8) -> Self {
        self.exit_code = exit_code;
        self
    }

    #[must_use]
    pub fn state(&self) -> ServiceState {
        self.state
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The single line printed for the monitoring system.
    ///
    /// Messages that already start with a severity token are printed as they
    /// are. Any other message is prefixed with the state keyword, for example
    /// `OK - RSYNC last run: 2026-10-19T07:00:00Z`.
    ///
    /// Control characters, line breaks included, become spaces so the line
    /// stays a single one whatever the remote resource returned.
    #[must_use]
    pub fn status_line(&self) -> String {
        let line = if starts_with_severity_token(&self.message) {
            self.message.clone()
        } else {
            format!("{} - {}", self.state.keyword(), self.message)
        };

        line.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_line())
    }
}

fn starts_with_severity_token(message: &str) -> bool {
    SEVERITY_TOKENS.iter().any(|token| {
        message
            .strip_prefix(token)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
    })
}
