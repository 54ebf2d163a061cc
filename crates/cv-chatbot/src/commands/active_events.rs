//! `get-active-events` — active events, filtered by device, severity or type.
//!
//! The `all` axis short-circuits: no filter value and no time window are
//! asked for. Every other axis collects a value plus start and end times,
//! then filters the windowed events client-side.

use cv_backend::{BackendError, CloudVision};
use cv_protocol::{EventRecord, Report};

use crate::choices::{
    event_filter_menu, event_type_choices, severity_choices, streaming_device_choices,
};
use crate::dispatcher::Dispatcher;
use crate::error::{CommandError, CommandResult};
use crate::resolver::{CommandOutcome, Resolver};
use crate::response::send_report;
use crate::timerange;

pub async fn run(
    resolver: &mut Resolver<'_>,
    backend: &dyn CloudVision,
    dispatcher: &dyn Dispatcher,
) -> CommandResult<CommandOutcome> {
    let Some(filter_type) = resolver.next_arg() else {
        return resolver
            .prompt_menu("Select which filter to apply to events", event_filter_menu())
            .await;
    };

    if filter_type == "all" {
        send_ack(dispatcher).await;
        let events = backend.active_events(None).await?;
        return render(dispatcher, backend, events, &filter_type, None).await;
    }

    let filter_value = match filter_type.as_str() {
        "device" => match resolver.next_arg() {
            Some(value) => value,
            None => {
                let devices = backend.streaming_devices().await?;
                return resolver
                    .prompt_menu("Choose a device", streaming_device_choices(&devices))
                    .await;
            }
        },
        "severity" => match resolver.next_arg() {
            Some(value) => value,
            None => {
                return resolver
                    .prompt_menu("Choose a severity", severity_choices())
                    .await;
            }
        },
        "type" => match resolver.next_arg() {
            Some(value) => value,
            None => {
                let types = backend.active_event_types().await?;
                return resolver
                    .prompt_menu("Choose an event type", event_type_choices(&types))
                    .await;
            }
        },
        other => return Err(CommandError::InvalidFilter(other.to_string())),
    };

    let Some(raw_start) = resolver.next_arg() else {
        return Ok(resolver
            .prompt_text(
                "Enter a start time: an offset like -2h, -1d, -1w or -30m, or an ISO-8601 timestamp",
                "start-time",
            )
            .await);
    };
    let Some(raw_end) = resolver.next_arg() else {
        return Ok(resolver
            .prompt_text(
                "Enter an end time: 'now' or an ISO-8601 timestamp",
                "end-time",
            )
            .await);
    };

    send_ack(dispatcher).await;
    let window = timerange::normalize(&raw_start, &raw_end)?;
    let events = backend.active_events(Some(&window)).await?;

    let filtered = match filter_type.as_str() {
        "device" => {
            let serial = backend
                .device_id_by_hostname(&filter_value)
                .await?
                .ok_or_else(|| BackendError::not_found("device", &filter_value))?;
            events
                .into_iter()
                .filter(|e| e.device_serial == serial)
                .collect()
        }
        "severity" => events
            .into_iter()
            .filter(|e| e.severity == filter_value)
            .collect(),
        "type" => events
            .into_iter()
            .filter(|e| e.event_type == filter_value)
            .collect(),
        _ => unreachable!("axis validated above"),
    };

    render(dispatcher, backend, filtered, &filter_type, Some(&filter_value)).await
}

async fn send_ack(dispatcher: &dyn Dispatcher) {
    dispatcher
        .send_markdown(&format!(
            "Standby {}, I'm getting the active events!",
            dispatcher.user_mention()
        ))
        .await;
}

async fn render(
    dispatcher: &dyn Dispatcher,
    backend: &dyn CloudVision,
    events: Vec<EventRecord>,
    filter_type: &str,
    filter_value: Option<&str>,
) -> CommandResult<CommandOutcome> {
    if events.is_empty() {
        dispatcher
            .send_warning("No active events found for that filter.")
            .await;
        return Ok(CommandOutcome::failed());
    }

    let hostnames = super::hostname_map(backend).await?;
    let rows = events
        .into_iter()
        .map(|e| {
            let device = hostnames
                .get(&e.device_serial)
                .cloned()
                .unwrap_or(e.device_serial);
            vec![e.title, e.severity, e.description, e.event_type, device]
        })
        .collect();

    let mut report = Report::new("get-active-events").field("Filter type", filter_type);
    if let Some(value) = filter_value {
        report = report.field("Filter value", value);
    }
    let report = report.table(
        vec![
            "Title".into(),
            "Severity".into(),
            "Description".into(),
            "Event Type".into(),
            "Device".into(),
        ],
        rows,
    );
    send_report(dispatcher, super::NAMESPACE, &report).await;
    Ok(CommandOutcome::succeeded())
}
