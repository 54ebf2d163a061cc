//! `get-task-logs` — audit log of one change-control task.

use cv_backend::{BackendError, CloudVision};
use cv_protocol::Report;

use crate::choices::task_choices;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let tasks = backend.tasks().await?;
    let Some(task_id) = resolver.next_arg() else {
        return resolver
            .prompt_menu("Choose a task", task_choices(&tasks))
            .await;
    };

    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the logs of task {task_id}!",
            dispatcher.user_mention()
        ))
        .await;

    let task = tasks
        .iter()
        .find(|t| t.work_order_id == task_id)
        .ok_or_else(|| BackendError::not_found("task", &task_id))?;

    // Both ids are needed to address the audit log. A task missing either
    // never ran to a loggable stage, so there is nothing to fetch.
    if task.cc_id_missing() {
        dispatcher
            .send_warning(&format!(
                "No change control ID for task {task_id}. The task was likely cancelled."
            ))
            .await;
        return Ok(CommandOutcome::failed());
    }
    if task.stage_id_missing() {
        dispatcher
            .send_warning(&format!("No stage ID found for task {task_id}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let cc_id = task.cc_id.as_deref().unwrap_or_default();
    let stage_id = task.stage_id.as_deref().unwrap_or_default();
    let logs = backend.task_logs(cc_id, stage_id).await?;
    if logs.is_empty() {
        dispatcher
            .send_warning(&format!("No logs found for task {task_id}."))
            .await;
        return Ok(CommandOutcome::failed());
    }

    let rows = logs.into_iter().map(|line| vec![line]).collect();
    let report = Report::new("get-task-logs")
        .field("Task", task_id)
        .table(vec!["Log Entry".into()], rows);
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}
