//! Conversational command engine for CloudVision network management.
//!
//! A subcommand invocation arrives with whatever arguments the user has
//! supplied so far. The engine prompts for the first missing one, encoding
//! all resolved state into the prompt identifier, and the chat platform
//! re-invokes the subcommand with the reply appended. Once every argument
//! is resolved, the handler queries CloudVision and renders a report.

pub mod choices;
pub mod commands;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod mock;
pub mod resolver;
pub mod response;
pub mod timerange;

pub use commands::{NAMESPACE, Subcommand, handle_subcommand};
pub use config::ChatopsConfig;
pub use dispatcher::Dispatcher;
pub use error::{CommandError, CommandResult};
pub use resolver::{CommandOutcome, Resolver};
