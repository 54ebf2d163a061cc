//! Choice providers — turn backend records into ordered menu choices.

use cv_protocol::{
    Choice, Configlet, Container, Device, EventSeverity, ImageInfo, StreamingDevice, TaskRecord,
};

pub fn container_choices(containers: &[Container]) -> Vec<Choice> {
    containers.iter().map(|c| Choice::plain(&c.name)).collect()
}

pub fn device_choices(devices: &[Device]) -> Vec<Choice> {
    devices.iter().map(|d| Choice::plain(&d.hostname)).collect()
}

pub fn streaming_device_choices(devices: &[StreamingDevice]) -> Vec<Choice> {
    devices.iter().map(|d| Choice::plain(&d.hostname)).collect()
}

pub fn configlet_choices(configlets: &[Configlet]) -> Vec<Choice> {
    configlets.iter().map(|c| Choice::plain(&c.name)).collect()
}

pub fn task_choices(tasks: &[TaskRecord]) -> Vec<Choice> {
    tasks
        .iter()
        .map(|t| Choice::plain(&t.work_order_id))
        .collect()
}

pub fn image_choices(images: &[ImageInfo]) -> Vec<Choice> {
    images.iter().map(|i| Choice::plain(&i.name)).collect()
}

pub fn event_type_choices(types: &[String]) -> Vec<Choice> {
    types.iter().map(|t| Choice::plain(t.as_str())).collect()
}

/// Severity levels for the `get-active-events` severity axis.
pub fn severity_choices() -> Vec<Choice> {
    EventSeverity::ALL
        .iter()
        .map(|s| Choice::plain(s.as_str()))
        .collect()
}

/// Filter axes for `get-active-events`.
pub fn event_filter_menu() -> Vec<Choice> {
    vec![
        Choice::plain("device"),
        Choice::plain("severity"),
        Choice::plain("type"),
        Choice::plain("all"),
    ]
}

/// Entity kinds for `get-applied-configlets`.
pub fn configlet_target_menu() -> Vec<Choice> {
    vec![
        Choice::new("Container", "container"),
        Choice::new("Device", "device"),
    ]
}

/// Bundle-or-all menu for `get-applied-image-bundles`.
pub fn bundle_menu() -> Vec<Choice> {
    vec![Choice::new("Bundle", "bundle"), Choice::new("All", "all")]
}
