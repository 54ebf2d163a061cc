//! `get-applied-image-bundles` — where image bundles are applied.
//!
//! The `all` axis summarizes every bundle with its application counts; the
//! `bundle` axis drills into one bundle and lists both the containers and
//! the devices it is applied to.

use cv_backend::CloudVision;
use cv_protocol::Report;

use crate::choices::{bundle_menu, image_choices};
use crate::dispatcher::Dispatcher;
use crate::error::{CommandError, CommandResult};
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let Some(axis) = resolver.next_arg() else {
        return resolver
            .prompt_menu("Select a specific bundle or all bundles", bundle_menu())
            .await;
    };

    match axis.as_str() {
        "all" => {
            send_ack(dispatcher).await;
            let bundles = backend.image_bundles().await?;
            if bundles.is_empty() {
                dispatcher.send_warning("No image bundles found.").await;
                return Ok(CommandOutcome::failed());
            }
            let rows = bundles
                .into_iter()
                .map(|b| {
                    vec![
                        b.name,
                        b.applied_containers_count.to_string(),
                        b.applied_devices_count.to_string(),
                        b.is_certified,
                    ]
                })
                .collect();
            let report = Report::new("get-applied-image-bundles")
                .field("Filter", "all")
                .table(
                    vec![
                        "Bundle Name".into(),
                        "Applied Containers".into(),
                        "Applied Devices".into(),
                        "Certified".into(),
                    ],
                    rows,
                );
            send_report(dispatcher, super::NAMESPACE, &report).await;
            Ok(CommandOutcome::succeeded())
        }
        "bundle" => {
            let Some(name) = resolver.next_arg() else {
                let images = backend.images().await?;
                return resolver
                    .prompt_menu("Choose an image bundle", image_choices(&images))
                    .await;
            };
            send_ack(dispatcher).await;
            let assignments = backend.bundle_assignments(&name).await?;
            if assignments.is_empty() {
                dispatcher
                    .send_warning(&format!("Image bundle {name} is not applied anywhere."))
                    .await;
                return Ok(CommandOutcome::failed());
            }
            let mut rows: Vec<Vec<String>> = assignments
                .containers
                .into_iter()
                .map(|c| vec!["container".to_string(), c])
                .collect();
            rows.extend(
                assignments
                    .devices
                    .into_iter()
                    .map(|d| vec!["device".to_string(), d]),
            );
            let report = Report::new("get-applied-image-bundles")
                .field("Bundle", name)
                .table(vec!["Applied To".into(), "Name".into()], rows);
            send_report(dispatcher, super::NAMESPACE, &report).await;
            Ok(CommandOutcome::succeeded())
        }
        other => Err(CommandError::InvalidFilter(other.to_string())),
    }
}

async fn send_ack(dispatcher: &dyn Dispatcher) {
    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the applied image bundles!",
            dispatcher.user_mention()
        ))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDispatcher;
    use cv_backend::MockCloudVision;

    fn resolver<'a>(dispatcher: &'a MockDispatcher, args: &[&str]) -> Resolver<'a> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Resolver::new(
            dispatcher,
            super::super::NAMESPACE,
            "get-applied-image-bundles",
            &args,
        )
    }

    #[tokio::test]
    async fn first_prompt_offers_bundle_or_all() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &[]);
        run(&mut resolver, &backend, &dispatcher).await.unwrap();
        let (_, choices) = dispatcher.last_menu().unwrap();
        let values: Vec<&str> = choices.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["bundle", "all"]);
    }

    #[tokio::test]
    async fn all_axis_lists_bundle_counts() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["all"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        let (header, rows) = dispatcher.last_table().unwrap();
        assert_eq!(header[0], "Bundle Name");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["EOS-4.30.2F", "1", "1", "true"]);
    }

    #[tokio::test]
    async fn bundle_axis_prompts_with_image_menu() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["bundle"]);
        run(&mut resolver, &backend, &dispatcher).await.unwrap();
        let (prompt_id, choices) = dispatcher.last_menu().unwrap();
        assert_eq!(prompt_id, "cloudvision get-applied-image-bundles bundle");
        assert_eq!(choices.len(), 2);
    }

    #[tokio::test]
    async fn bundle_axis_lists_containers_and_devices() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["bundle", "EOS-4.30.2F"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        let (_, rows) = dispatcher.last_table().unwrap();
        assert!(rows.contains(&vec!["container".to_string(), "Leaf".to_string()]));
        assert!(rows.contains(&vec!["device".to_string(), "sw1".to_string()]));
    }

    #[tokio::test]
    async fn unapplied_bundle_warns_and_fails() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["bundle", "EOS-4.28.1M"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::failed());
        assert!(dispatcher.warnings()[0].contains("not applied anywhere"));
    }
}
