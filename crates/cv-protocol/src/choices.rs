//! Menu choices and command status.

use serde::{Deserialize, Serialize};

/// One entry in a menu prompt. The label is shown to the user; the value is
/// echoed back verbatim as the next positional argument, so it must
/// round-trip unambiguously through the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Choice whose label and value are the same token (the common case).
    pub fn plain(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            label: token.clone(),
            value: token,
        }
    }
}

/// Terminal status of one command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Succeeded,
    Failed,
}

/// Event severity levels offered by the `get-active-events` severity menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventSeverity {
    Unspecified,
    Info,
    Warning,
    Error,
    Critical,
}

impl EventSeverity {
    /// All levels, in menu order.
    pub const ALL: [EventSeverity; 5] = [
        EventSeverity::Unspecified,
        EventSeverity::Info,
        EventSeverity::Warning,
        EventSeverity::Error,
        EventSeverity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventSeverity::Unspecified => "UNSPECIFIED",
            EventSeverity::Info => "INFO",
            EventSeverity::Warning => "WARNING",
            EventSeverity::Error => "ERROR",
            EventSeverity::Critical => "CRITICAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_choice_round_trips() {
        let c = Choice::plain("sw1");
        assert_eq!(c.label, "sw1");
        assert_eq!(c.value, "sw1");
    }

    #[test]
    fn command_status_serialization() {
        assert_eq!(
            serde_json::to_string(&CommandStatus::Succeeded).unwrap(),
            r#""succeeded""#
        );
        assert_eq!(
            serde_json::to_string(&CommandStatus::Failed).unwrap(),
            r#""failed""#
        );
    }

    #[test]
    fn severity_menu_order() {
        let labels: Vec<&str> = EventSeverity::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            labels,
            vec!["UNSPECIFIED", "INFO", "WARNING", "ERROR", "CRITICAL"]
        );
    }

    #[test]
    fn severity_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&EventSeverity::Critical).unwrap(),
            r#""CRITICAL""#
        );
    }
}
