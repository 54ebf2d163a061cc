//! Subcommand dispatch.
//!
//! One module per subcommand; each handler walks its arguments through a
//! `Resolver`, prompting for whatever is missing, and either leaves the
//! invocation pending or renders a report.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

use cv_backend::CloudVision;

use crate::config::ChatopsConfig;
use crate::dispatcher::Dispatcher;
use crate::resolver::{CommandOutcome, Resolver};

mod active_events;
mod applied_configlets;
mod configlet;
mod device_configuration;
mod device_cve;
mod devices_in_container;
mod image_bundles;
mod tags;
mod task_logs;

/// Command namespace shared by every subcommand.
pub const NAMESPACE: &str = "cloudvision";

/// The subcommands the chatbot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    GetDevicesInContainer,
    GetConfiglet,
    GetDeviceConfiguration,
    GetTaskLogs,
    GetAppliedConfiglets,
    GetActiveEvents,
    GetAppliedImageBundles,
    GetTags,
    GetDeviceCve,
}

impl Subcommand {
    pub const ALL: [Subcommand; 9] = [
        Subcommand::GetDevicesInContainer,
        Subcommand::GetConfiglet,
        Subcommand::GetDeviceConfiguration,
        Subcommand::GetTaskLogs,
        Subcommand::GetAppliedConfiglets,
        Subcommand::GetActiveEvents,
        Subcommand::GetAppliedImageBundles,
        Subcommand::GetTags,
        Subcommand::GetDeviceCve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subcommand::GetDevicesInContainer => "get-devices-in-container",
            Subcommand::GetConfiglet => "get-configlet",
            Subcommand::GetDeviceConfiguration => "get-device-configuration",
            Subcommand::GetTaskLogs => "get-task-logs",
            Subcommand::GetAppliedConfiglets => "get-applied-configlets",
            Subcommand::GetActiveEvents => "get-active-events",
            Subcommand::GetAppliedImageBundles => "get-applied-image-bundles",
            Subcommand::GetTags => "get-tags",
            Subcommand::GetDeviceCve => "get-device-cve",
        }
    }
}

impl std::fmt::Display for Subcommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown subcommand '{0}'")]
pub struct UnknownSubcommand(pub String);

impl FromStr for Subcommand {
    type Err = UnknownSubcommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subcommand::ALL
            .into_iter()
            .find(|sub| sub.as_str() == s)
            .ok_or_else(|| UnknownSubcommand(s.to_string()))
    }
}

/// Run one invocation of a subcommand.
///
/// Checks credentials before touching the backend, dispatches to the
/// handler, and maps handler errors onto the dispatcher's error primitive.
pub async fn handle_subcommand(
    subcommand: Subcommand,
    args: &[String],
    config: &ChatopsConfig,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandOutcome {
    let invocation_id = Uuid::now_v7();
    tracing::info!(%invocation_id, %subcommand, supplied = args.len(), "handling subcommand");

    if let Some(warning) = config.missing_credentials() {
        tracing::warn!(%invocation_id, "credentials incomplete");
        dispatcher.send_warning(warning).await;
        return CommandOutcome::failed();
    }

    let mut resolver = Resolver::new(dispatcher, NAMESPACE, subcommand.as_str(), args);
    let result = match subcommand {
        Subcommand::GetDevicesInContainer => {
            devices_in_container::run(&mut resolver, backend, dispatcher).await
        }
        Subcommand::GetConfiglet => configlet::run(&mut resolver, backend, dispatcher).await,
        Subcommand::GetDeviceConfiguration => {
            device_configuration::run(&mut resolver, backend, dispatcher).await
        }
        Subcommand::GetTaskLogs => task_logs::run(&mut resolver, backend, dispatcher).await,
        Subcommand::GetAppliedConfiglets => {
            applied_configlets::run(&mut resolver, backend, dispatcher).await
        }
        Subcommand::GetActiveEvents => active_events::run(&mut resolver, backend, dispatcher).await,
        Subcommand::GetAppliedImageBundles => {
            image_bundles::run(&mut resolver, backend, dispatcher).await
        }
        Subcommand::GetTags => tags::run(&mut resolver, backend, dispatcher).await,
        Subcommand::GetDeviceCve => device_cve::run(&mut resolver, backend, dispatcher).await,
    };

    match result {
        Ok(outcome) => {
            tracing::info!(%invocation_id, ?outcome, "subcommand finished");
            outcome
        }
        Err(err) => {
            tracing::error!(%invocation_id, error = %err, "subcommand failed");
            dispatcher.send_error(&err.to_string()).await;
            CommandOutcome::failed()
        }
    }
}

/// Serial-number-to-hostname map over the streaming inventory. Used where
/// records carry serials but the user expects hostnames.
pub(crate) async fn hostname_map(
    backend: &dyn CloudVision,
) -> crate::error::CommandResult<HashMap<String, String>> {
    let devices = backend.streaming_devices().await?;
    Ok(devices
        .into_iter()
        .map(|d| (d.device_id, d.hostname))
        .collect())
}
