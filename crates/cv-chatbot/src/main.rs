//! CloudVision chatbot CLI — runs one subcommand invocation per call.
//!
//! Prompts print a re-invocation hint instead of interactive menus, so a
//! multi-turn resolution is a sequence of shell invocations, each carrying
//! one more argument than the last.

use anyhow::bail;
use tracing_subscriber::EnvFilter;

use cv_chatbot::commands::{self, Subcommand};
use cv_chatbot::config::ChatopsConfig;
use cv_chatbot::console::ConsoleDispatcher;
use cv_chatbot::resolver::CommandOutcome;
use cv_protocol::CommandStatus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cv-chatbot starting");

    let mut args = std::env::args().skip(1);
    let Some(subcommand) = args.next() else {
        bail!("usage: cv-chatbot <subcommand> [args...]\nsubcommands: {}", subcommand_list());
    };
    let subcommand: Subcommand = match subcommand.parse() {
        Ok(sub) => sub,
        Err(err) => bail!("{err}\nsubcommands: {}", subcommand_list()),
    };
    let supplied: Vec<String> = args.collect();

    let config = match std::env::var("CV_CHATOPS_CONFIG") {
        Ok(path) => ChatopsConfig::from_file(&path)?,
        Err(_) => ChatopsConfig::from_env(),
    };

    let backend = config.rest_client()?;
    let user = std::env::var("USER").unwrap_or_else(|_| "operator".to_string());
    let dispatcher = ConsoleDispatcher::new(user);

    let outcome =
        commands::handle_subcommand(subcommand, &supplied, &config, &backend, &dispatcher).await;
    if outcome == CommandOutcome::Complete(CommandStatus::Failed) {
        std::process::exit(1);
    }
    Ok(())
}

fn subcommand_list() -> String {
    Subcommand::ALL
        .iter()
        .map(Subcommand::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
