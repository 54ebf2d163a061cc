//! `get-devices-in-container` — inventory of one provisioning container.

use cv_backend::CloudVision;
use cv_protocol::Report;

use crate::choices::container_choices;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let Some(container) = resolver.next_arg() else {
        let containers = backend.containers().await?;
        return resolver
            .prompt_menu("Choose a container", container_choices(&containers))
            .await;
    };

    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the devices from the container {container}!",
            dispatcher.user_mention()
        ))
        .await;

    let devices = backend.container_devices(&container).await?;
    if devices.is_empty() {
        dispatcher
            .send_warning(&format!("There are no devices in container {container}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let rows = devices
        .into_iter()
        .map(|d| {
            vec![
                d.hostname,
                d.serial_number.unwrap_or_default(),
                d.system_mac_address,
            ]
        })
        .collect();
    let report = Report::new("get-devices-in-container")
        .field("Container", container)
        .table(
            vec![
                "Hostname".into(),
                "Serial Number".into(),
                "MAC Address".into(),
            ],
            rows,
        );
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDispatcher;
    use cv_backend::MockCloudVision;

    fn resolver<'a>(dispatcher: &'a MockDispatcher, args: &[&str]) -> Resolver<'a> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Resolver::new(dispatcher, super::super::NAMESPACE, "get-devices-in-container", &args)
    }

    #[tokio::test]
    async fn no_argument_prompts_with_container_menu() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &[]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Pending);
        let (prompt_id, choices) = dispatcher.last_menu().unwrap();
        assert_eq!(prompt_id, "cloudvision get-devices-in-container");
        assert!(choices.iter().any(|c| c.value == "Leaf"));
    }

    #[tokio::test]
    async fn resolved_container_renders_device_table() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["Leaf"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        let (header, rows) = dispatcher.last_table().unwrap();
        assert_eq!(header[0], "Hostname");
        assert!(rows.iter().any(|r| r[0] == "sw1"));
    }

    #[tokio::test]
    async fn empty_container_warns_and_fails() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["Tenant"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::failed());
        assert!(dispatcher.warnings()[0].contains("no devices"));
        assert!(dispatcher.last_table().is_none());
    }
}
