//! Argument resolution over stateless multi-turn invocations.
//!
//! A subcommand may arrive with zero or more of its arguments already
//! supplied. The resolver hands them out left to right; the first missing
//! one triggers a prompt whose identifier carries the namespace, the
//! subcommand and every argument resolved so far. When the user answers,
//! the platform re-invokes the subcommand with the answer appended, so no
//! session state lives anywhere but the prompt identifier itself.

use cv_protocol::{Choice, CommandStatus};

use crate::dispatcher::Dispatcher;
use crate::error::{CommandError, CommandResult};

/// What a subcommand handler produced for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A prompt went out; the conversation continues on the next invocation.
    Pending,
    /// The command ran to completion with the given status.
    Complete(CommandStatus),
}

impl CommandOutcome {
    pub fn succeeded() -> Self {
        Self::Complete(CommandStatus::Succeeded)
    }

    pub fn failed() -> Self {
        Self::Complete(CommandStatus::Failed)
    }
}

/// Walks the supplied arguments for one invocation and issues prompts for
/// whatever is still missing.
pub struct Resolver<'a> {
    dispatcher: &'a dyn Dispatcher,
    prompt_id: String,
    args: std::vec::IntoIter<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        dispatcher: &'a dyn Dispatcher,
        namespace: &str,
        subcommand: &str,
        args: &[String],
    ) -> Self {
        Self {
            dispatcher,
            prompt_id: format!("{namespace} {subcommand}"),
            args: args.to_vec().into_iter(),
        }
    }

    /// Consume the next supplied argument, folding it into the prompt
    /// identifier. Blank arguments count as absent.
    pub fn next_arg(&mut self) -> Option<String> {
        let value = self.args.next()?.trim().to_string();
        if value.is_empty() {
            return None;
        }
        self.prompt_id.push(' ');
        self.prompt_id.push_str(&value);
        Some(value)
    }

    /// The identifier the next prompt will carry.
    pub fn prompt_id(&self) -> &str {
        &self.prompt_id
    }

    /// Prompt with a menu of choices. An empty menu is a dead end, not a
    /// question, so it fails the command instead.
    pub async fn prompt_menu(
        &self,
        help_text: &str,
        choices: Vec<Choice>,
    ) -> CommandResult<CommandOutcome> {
        if choices.is_empty() {
            return Err(CommandError::EmptyChoices);
        }
        self.dispatcher
            .prompt_from_menu(&self.prompt_id, help_text, &choices)
            .await;
        Ok(CommandOutcome::Pending)
    }

    /// Prompt for a free-text value.
    pub async fn prompt_text(&self, help_text: &str, label: &str) -> CommandOutcome {
        self.dispatcher
            .prompt_for_text(&self.prompt_id, help_text, label)
            .await;
        CommandOutcome::Pending
    }
}
