//! `get-tags` — tags assigned to one streaming device.

use cv_backend::{BackendError, CloudVision};
use cv_protocol::Report;

use crate::choices::streaming_device_choices;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let Some(hostname) = resolver.next_arg() else {
        let devices = backend.streaming_devices().await?;
        return resolver
            .prompt_menu("Choose a device", streaming_device_choices(&devices))
            .await;
    };

    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the tags of device {hostname}!",
            dispatcher.user_mention()
        ))
        .await;

    let serial = backend
        .device_id_by_hostname(&hostname)
        .await?
        .ok_or_else(|| BackendError::not_found("device", &hostname))?;
    let tags = backend.device_tags(&serial).await?;
    if tags.is_empty() {
        dispatcher
            .send_warning(&format!("No tags assigned to device {hostname}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let rows = tags.into_iter().map(|t| vec![t.label, t.value]).collect();
    let report = Report::new("get-tags")
        .field("Device", hostname)
        .table(vec!["Label".into(), "Value".into()], rows);
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}
