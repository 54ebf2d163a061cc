//! Mock dispatcher for tests — records every presentation call.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use cv_protocol::Choice;

use crate::dispatcher::Dispatcher;

/// One recorded presentation call.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatcherCall {
    Markdown(String),
    Warning(String),
    Error(String),
    Blocks(Value),
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Snippet(String),
    MenuPrompt {
        prompt_id: String,
        help_text: String,
        choices: Vec<Choice>,
    },
    TextPrompt {
        prompt_id: String,
        help_text: String,
        label: String,
    },
}

/// A dispatcher that records calls instead of rendering them.
#[derive(Default)]
pub struct MockDispatcher {
    calls: Mutex<Vec<DispatcherCall>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: DispatcherCall) {
        self.calls.lock().expect("mock lock poisoned").push(call);
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<DispatcherCall> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    /// The last menu prompt sent, if any.
    pub fn last_menu(&self) -> Option<(String, Vec<Choice>)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            DispatcherCall::MenuPrompt {
                prompt_id, choices, ..
            } => Some((prompt_id, choices)),
            _ => None,
        })
    }

    /// The last free-text prompt sent, if any.
    pub fn last_text_prompt(&self) -> Option<(String, String)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            DispatcherCall::TextPrompt {
                prompt_id, label, ..
            } => Some((prompt_id, label)),
            _ => None,
        })
    }

    /// The last table sent, if any.
    pub fn last_table(&self) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            DispatcherCall::Table { header, rows } => Some((header, rows)),
            _ => None,
        })
    }

    /// The last snippet sent, if any.
    pub fn last_snippet(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|c| match c {
            DispatcherCall::Snippet(text) => Some(text),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DispatcherCall::Warning(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DispatcherCall::Error(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// True when a prompt of either kind was sent.
    pub fn prompted(&self) -> bool {
        self.calls().iter().any(|c| {
            matches!(
                c,
                DispatcherCall::MenuPrompt { .. } | DispatcherCall::TextPrompt { .. }
            )
        })
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn send_markdown(&self, text: &str) {
        self.record(DispatcherCall::Markdown(text.to_string()));
    }

    async fn send_warning(&self, text: &str) {
        self.record(DispatcherCall::Warning(text.to_string()));
    }

    async fn send_error(&self, text: &str) {
        self.record(DispatcherCall::Error(text.to_string()));
    }

    async fn send_blocks(&self, blocks: Value) {
        self.record(DispatcherCall::Blocks(blocks));
    }

    async fn send_large_table(&self, header: &[String], rows: &[Vec<String>]) {
        self.record(DispatcherCall::Table {
            header: header.to_vec(),
            rows: rows.to_vec(),
        });
    }

    async fn send_snippet(&self, text: &str) {
        self.record(DispatcherCall::Snippet(text.to_string()));
    }

    async fn prompt_from_menu(&self, prompt_id: &str, help_text: &str, choices: &[Choice]) {
        self.record(DispatcherCall::MenuPrompt {
            prompt_id: prompt_id.to_string(),
            help_text: help_text.to_string(),
            choices: choices.to_vec(),
        });
    }

    async fn prompt_for_text(&self, prompt_id: &str, help_text: &str, label: &str) {
        self.record(DispatcherCall::TextPrompt {
            prompt_id: prompt_id.to_string(),
            help_text: help_text.to_string(),
            label: label.to_string(),
        });
    }

    fn user_mention(&self) -> String {
        "@operator".into()
    }
}
