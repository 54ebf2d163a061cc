//! `get-configlet` — configuration body of one configlet.

use cv_backend::CloudVision;
use cv_protocol::Report;

use crate::choices::configlet_choices;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let Some(name) = resolver.next_arg() else {
        let configlets = backend.configlets().await?;
        return resolver
            .prompt_menu("Choose a configlet", configlet_choices(&configlets))
            .await;
    };

    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the configuration of configlet {name}!",
            dispatcher.user_mention()
        ))
        .await;

    let config = backend.configlet_config(&name).await?;
    if config.trim().is_empty() {
        dispatcher
            .send_warning(&format!("Configlet {name} has no configuration."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let report = Report::new("get-configlet")
        .field("Configlet", name)
        .snippet(config);
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDispatcher;
    use cv_backend::{BackendError, MockCloudVision};
    use crate::error::CommandError;

    fn resolver<'a>(dispatcher: &'a MockDispatcher, args: &[&str]) -> Resolver<'a> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Resolver::new(dispatcher, super::super::NAMESPACE, "get-configlet", &args)
    }

    #[tokio::test]
    async fn no_argument_prompts_with_configlet_menu() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &[]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Pending);
        let (_, choices) = dispatcher.last_menu().unwrap();
        assert!(choices.iter().any(|c| c.value == "vlan-prod"));
    }

    #[tokio::test]
    async fn resolved_configlet_renders_snippet() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["mgmt-base"]);
        let outcome = run(&mut resolver, &backend, &dispatcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::succeeded());
        assert!(dispatcher.last_snippet().unwrap().contains("ntp server"));
    }

    #[tokio::test]
    async fn unknown_configlet_is_a_backend_error() {
        let backend = MockCloudVision::lab();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &["no-such"]);
        let err = run(&mut resolver, &backend, &dispatcher).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Backend(BackendError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn empty_configlet_inventory_fails_the_menu() {
        let backend = MockCloudVision::new();
        let dispatcher = MockDispatcher::new();
        let mut resolver = resolver(&dispatcher, &[]);
        let err = run(&mut resolver, &backend, &dispatcher).await.unwrap_err();
        assert!(matches!(err, CommandError::EmptyChoices));
    }
}
