//! `get-device-cve` — bug alerts for one device, or counts fleet-wide.

use cv_backend::{BackendError, CloudVision};
use cv_protocol::{Choice, Report};

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
    let Some(target) = resolver.next_arg() else {
        let devices = backend.streaming_devices().await?;
        let mut choices = streaming_device_choices(&devices);
        choices.insert(0, Choice::plain("all"));
        return resolver
            .prompt_menu("Choose a device, or 'all' for a fleet summary", choices)
            .await;
    };

    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the bugs from CloudVision!",
            dispatcher.user_mention()
        ))
        .await;

    if target == "all" {
        return fleet_summary(backend, dispatcher).await;
    }

    let serial = backend
        .device_id_by_hostname(&target)
        .await?
        .ok_or_else(|| BackendError::not_found("device", &target))?;
    let bug_ids = backend.device_bugs(&serial).await?;
    if bug_ids.is_empty() {
        dispatcher
            .send_warning(&format!("No bugs found for device {target}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let mut rows = Vec::with_capacity(bug_ids.len());
    for bug_id in bug_ids {
        // A bug listed for the device but gone from the alert database is
        // stale, not fatal.
        match backend.bug_info(&bug_id).await {
            Ok(bug) => rows.push(vec![
                bug.identifier,
                bug.summary,
                bug.severity,
                bug.versions_fixed,
            ]),
            Err(BackendError::NotFound { .. }) => {
                tracing::debug!(bug_id, "bug listed for device but not resolvable");
            }
            Err(err) => return Err(err.into()),
        }
    }
    if rows.is_empty() {
        dispatcher
            .send_warning(&format!("No bugs found for device {target}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let report = Report::new("get-device-cve")
        .field("Device", target)
        .table(
            vec![
                "Identifier".into(),
                "Summary".into(),
                "Severity".into(),
                "Versions Fixed".into(),
            ],
            rows,
        );
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}

async fn fleet_summary(
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let report_by_serial = backend.bug_device_report().await?;
    if report_by_serial.is_empty() {
        dispatcher.send_warning("No bugs found for any device.").await;
        return Ok(CommandOutcome::failed());
    }

    let hostnames = super::hostname_map(backend).await?;
    let rows = report_by_serial
        .into_iter()
        .map(|(serial, count)| {
            let device = hostnames.get(&serial).cloned().unwrap_or(serial);
            vec![device, count.to_string()]
        })
        .collect();
    let report = Report::new("get-device-cve")
        .field("Device", "all")
        .table(vec!["Device Name".into(), "Bug Count".into()], rows);
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
        Resolver::new(dispatcher, super::super::NAMESPACE, "get-device-cve", &args)
    }

    #[tokio::test]
    async fn menu_leads_with_the_all_option() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &[]);
        run(&mut resolver, &backend, &dispatcher).await.unwrap();
        let (_, choices) = dispatcher.last_menu().unwrap();
        assert_eq!(choices[0].value, "all");
        assert_eq!(choices.len(), 4);
    }

    #[tokio::test]
    async fn all_renders_per_device_bug_counts_by_hostname() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["all"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        let (header, rows) = dispatcher.last_table().unwrap();
        assert_eq!(header, vec!["Device Name", "Bug Count"]);
        assert!(rows.contains(&vec!["sw1".to_string(), "2".to_string()]));
        assert!(rows.contains(&vec!["sw2".to_string(), "1".to_string()]));
    }

    #[tokio::test]
    async fn single_device_renders_bug_details() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["sw1"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        let (_, rows) = dispatcher.last_table().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "1001");
        assert_eq!(rows[1][2], "Medium");
    }

    #[tokio::test]
    async fn device_without_bugs_warns_and_fails() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["spine1"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::failed());
        assert!(dispatcher.warnings()[0].contains("No bugs found"));
    }
}
