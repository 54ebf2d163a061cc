//! Stdout dispatcher for the CLI binary.
//!
//! Stands in for the chat-platform adapter so a subcommand can be run end to
//! end from a terminal. Menus and text prompts print the re-invocation hint
//! the chat platform would otherwise handle.

use async_trait::async_trait;
use serde_json::Value;

use cv_protocol::Choice;

use crate::dispatcher::Dispatcher;

/// Renders dispatcher primitives as plain terminal output.
pub struct ConsoleDispatcher {
    user: String,
}

impl ConsoleDispatcher {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

impl Default for ConsoleDispatcher {
    fn default() -> Self {
        Self::new("operator")
    }
}

#[async_trait]
impl Dispatcher for ConsoleDispatcher {
    async fn send_markdown(&self, text: &str) {
        println!("{text}");
    }

    async fn send_warning(&self, text: &str) {
        println!("warning: {text}");
    }

    async fn send_error(&self, text: &str) {
        eprintln!("error: {text}");
    }

    async fn send_blocks(&self, blocks: Value) {
        if let Some(command) = blocks
            .get(0)
            .and_then(|b| b.get("command"))
            .and_then(Value::as_str)
        {
            println!("── {command} ──");
        }
        if let Some(fields) = blocks
            .get(0)
            .and_then(|b| b.get("fields"))
            .and_then(Value::as_array)
        {
            for field in fields {
                let label = field["label"].as_str().unwrap_or_default();
                let value = field["value"].as_str().unwrap_or_default();
                println!("{label}: {value}");
            }
        }
    }

    async fn send_large_table(&self, header: &[String], rows: &[Vec<String>]) {
        println!("{}", header.join(" | "));
        for row in rows {
            println!("{}", row.join(" | "));
        }
    }

    async fn send_snippet(&self, text: &str) {
        println!("```\n{text}\n```");
    }

    async fn prompt_from_menu(&self, prompt_id: &str, help_text: &str, choices: &[Choice]) {
        println!("{help_text}");
        for choice in choices {
            println!("  - {} ({})", choice.label, choice.value);
        }
        println!("reply with: {prompt_id} <value>");
    }

    async fn prompt_for_text(&self, prompt_id: &str, help_text: &str, label: &str) {
        println!("{help_text}");
        println!("reply with: {prompt_id} <{label}>");
    }

    fn user_mention(&self) -> String {
        format!("@{}", self.user)
    }
}
