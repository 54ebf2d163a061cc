//! Structured command results handed to the response renderer.

use serde::{Deserialize, Serialize};

use crate::choices::CommandStatus;

/// The body of a rendered report: a table, a code snippet, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportBody {
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Snippet(String),
    None,
}

/// Result of one completed command invocation.
///
/// Constructed fresh per invocation, rendered once, then discarded. The
/// header fields name the subcommand and the filter values it resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub subcommand: String,
    pub status: CommandStatus,
    /// Ordered (label, value) pairs shown in the response header block.
    pub fields: Vec<(String, String)>,
    pub body: ReportBody,
}

impl Report {
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            status: CommandStatus::Succeeded,
            fields: Vec::new(),
            body: ReportBody::None,
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    pub fn table(mut self, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        self.body = ReportBody::Table { header, rows };
        self
    }

    pub fn snippet(mut self, text: impl Into<String>) -> Self {
        self.body = ReportBody::Snippet(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_fields_in_order() {
        let report = Report::new("get-applied-configlets")
            .field("Filter type", "device")
            .field("Filter value", "sw1");
        assert_eq!(report.fields[0].0, "Filter type");
        assert_eq!(report.fields[1].1, "sw1");
        assert_eq!(report.body, ReportBody::None);
    }

    #[test]
    fn snippet_body() {
        let report = Report::new("get-configlet").snippet("interface Ethernet1\n  shutdown");
        match report.body {
            ReportBody::Snippet(ref s) => assert!(s.contains("Ethernet1")),
            _ => panic!("expected snippet"),
        }
    }
}
