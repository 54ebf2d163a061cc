//! Chat-platform presentation abstraction.
//!
//! `Dispatcher` is the seam between the command engine and whatever chat
//! platform renders the conversation. Two impls:
//! - `ConsoleDispatcher` — renders to stdout for the CLI binary (in `console.rs`)
//! - `MockDispatcher` — records every call for assertions (in `mock.rs`)
//!
//! Sends are fire-and-forget from the engine's point of view; a platform
//! adapter that fails to deliver logs the failure itself.

use async_trait::async_trait;
use serde_json::{Value, json};

use cv_protocol::Choice;

/// Trait for chat platform adapters.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send a markdown-formatted line.
    async fn send_markdown(&self, text: &str);

    /// Send a visually distinguished warning. Non-fatal to the session.
    async fn send_warning(&self, text: &str);

    /// Send a visually distinguished error. Non-fatal to the session.
    async fn send_error(&self, text: &str);

    /// Send a pre-built block structure (e.g. a command response header).
    async fn send_blocks(&self, blocks: Value);

    /// Send a table, one row per record.
    async fn send_large_table(&self, header: &[String], rows: &[Vec<String>]);

    /// Send code-formatted text.
    async fn send_snippet(&self, text: &str);

    /// Prompt the user to pick one of `choices`. The user's reply re-invokes
    /// the command identified by `prompt_id` with the chosen value appended.
    async fn prompt_from_menu(&self, prompt_id: &str, help_text: &str, choices: &[Choice]);

    /// Prompt the user for free-text input, correlated the same way.
    async fn prompt_for_text(&self, prompt_id: &str, help_text: &str, label: &str);

    /// Mention token for the requesting user.
    fn user_mention(&self) -> String;

    /// Absolute URL for a statically hosted asset.
    fn static_url(&self, path: &str) -> String {
        format!("/static/{path}")
    }

    /// An image block element.
    fn image_element(&self, url: &str, alt_text: &str) -> Value {
        json!({ "type": "image", "image_url": url, "alt_text": alt_text })
    }

    /// Standard response header block: logo, command name, and the resolved
    /// filter values.
    fn command_response_header(
        &self,
        namespace: &str,
        command: &str,
        fields: &[(String, String)],
    ) -> Value {
        let logo = self.image_element(
            &self.static_url("cloudvision/CloudvisionLogoSquare.png"),
            "CloudVision",
        );
        let fields: Vec<Value> = fields
            .iter()
            .map(|(label, value)| json!({ "label": label, "value": value }))
            .collect();
        json!([{
            "type": "header",
            "elements": [logo],
            "command": format!("{namespace} {command}"),
            "fields": fields,
        }])
    }
}
