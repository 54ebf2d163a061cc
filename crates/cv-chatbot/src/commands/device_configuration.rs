//! `get-device-configuration` — running configuration of one device.

use cv_backend::{BackendError, CloudVision};
use cv_protocol::Report;

use crate::choices::device_choices;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let devices = backend.devices().await?;
    let Some(hostname) = resolver.next_arg() else {
        return resolver
            .prompt_menu("Choose a device", device_choices(&devices))
            .await;
    };

    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the configuration of device {hostname}!",
            dispatcher.user_mention()
        ))
        .await;

    // Config lookups are keyed by system MAC address, not hostname.
    let device = devices
        .iter()
        .find(|d| d.hostname == hostname)
        .ok_or_else(|| BackendError::not_found("device", &hostname))?;
    let config = backend.running_config(&device.system_mac_address).await?;
    if config.trim().is_empty() {
        dispatcher
            .send_warning(&format!("Device {hostname} has no running configuration."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let report = Report::new("get-device-configuration")
        .field("Device", hostname)
        .snippet(config);
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::mock::MockDispatcher;
    use cv_backend::MockCloudVision;

    fn resolver<'a>(dispatcher: &'a MockDispatcher, args: &[&str]) -> Resolver<'a> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Resolver::new(
            dispatcher,
            super::super::NAMESPACE,
            "get-device-configuration",
            &args,
        )
    }

    #[tokio::test]
    async fn no_argument_prompts_with_device_menu() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &[]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Pending);
        let (prompt_id, choices) = dispatcher.last_menu().unwrap();
        assert_eq!(prompt_id, "cloudvision get-device-configuration");
        assert_eq!(choices.len(), 3);
    }

    #[tokio::test]
    async fn resolved_device_renders_running_config() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["sw1"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        assert!(dispatcher.last_snippet().unwrap().contains("hostname sw1"));
    }

    #[tokio::test]
    async fn unknown_hostname_is_not_found() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["sw9"]);
        let err = run(&mut resolver, &backend, &dispatcher).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Backend(BackendError::NotFound { .. })
        ));
    }
}
