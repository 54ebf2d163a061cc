//! `get-applied-configlets` — configlets applied to a container or device.

use cv_backend::{BackendError, CloudVision};
use cv_protocol::Report;

use crate::choices::{configlet_target_menu, container_choices, device_choices};
use crate::dispatcher::Dispatcher;
use crate::error::{CommandError, CommandResult};
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let Some(target_type) = resolver.next_arg() else {
        return resolver
            .prompt_menu(
                "Select which entity to check for configlets",
                configlet_target_menu(),
            )
            .await;
    };

    let applied = match target_type.as_str() {
        "container" => {
            let Some(name) = resolver.next_arg() else {
                let containers = backend.containers().await?;
                return resolver
                    .prompt_menu("Choose a container", container_choices(&containers))
                    .await;
            };
            send_ack(dispatcher, &name).await;
            let container_id = backend.container_id_by_name(&name).await?;
            let applied = backend.applied_configlets_container(&container_id).await?;
            (name, applied)
        }
        "device" => {
            let devices = backend.devices().await?;
            let Some(name) = resolver.next_arg() else {
                return resolver
                    .prompt_menu("Choose a device", device_choices(&devices))
                    .await;
            };
            send_ack(dispatcher, &name).await;
            let device = devices
                .iter()
                .find(|d| d.hostname == name)
                .ok_or_else(|| BackendError::not_found("device", &name))?;
            let applied = backend
                .applied_configlets_device(&device.system_mac_address)
                .await?;
            (name, applied)
        }
        other => return Err(CommandError::InvalidFilter(other.to_string())),
    };

    let (name, configlets) = applied;
    if configlets.is_empty() {
        dispatcher
            .send_warning(&format!("No configlets applied to {name}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let rows = configlets.into_iter().map(|c| vec![c]).collect();
    let report = Report::new("get-applied-configlets")
        .field("Filter type", target_type)
        .field("Filter value", name)
        .table(vec!["Configlet Name".into()], rows);
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}

async fn send_ack(dispatcher: &dyn Dispatcher, name: &str) {
    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the configlets applied to {name}!",
            dispatcher.user_mention()
        ))
        .await;
}
