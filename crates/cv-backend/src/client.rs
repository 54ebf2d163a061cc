//! CloudVision read-operation abstraction.
//!
//! `CloudVision` trait over every query the chatbot issues. Two impls:
//! - `CvpRestClient` — talks to a real CloudVision instance (in `rest.rs`)
//! - `MockCloudVision` — fixture-backed, all platforms (in `mock.rs`)
//!
//! Every operation is read-only; the chatbot never mutates backend state.

use std::collections::BTreeMap;

use async_trait::async_trait;

use cv_protocol::{
    BugInfo, BundleAssignments, Configlet, Container, Device, EventRecord, ImageBundle, ImageInfo,
    StreamingDevice, TagAssignment, TaskRecord, TimeWindow,
};

use crate::error::BackendResult;

/// Trait for CloudVision backend implementations.
#[async_trait]
pub trait CloudVision: Send + Sync {
    /// All provisioning containers.
    async fn containers(&self) -> BackendResult<Vec<Container>>;

    /// Devices assigned to the named container.
    async fn container_devices(&self, container_name: &str) -> BackendResult<Vec<Device>>;

    /// Container key for the given container name.
    async fn container_id_by_name(&self, name: &str) -> BackendResult<String>;

    /// All devices from the provisioning inventory.
    async fn devices(&self) -> BackendResult<Vec<Device>>;

    /// Devices from the resource inventory API with active streaming
    /// telemetry. Archived datasets are filtered out.
    async fn streaming_devices(&self) -> BackendResult<Vec<StreamingDevice>>;

    /// All configlet names.
    async fn configlets(&self) -> BackendResult<Vec<Configlet>>;

    /// Configuration body of the named configlet.
    async fn configlet_config(&self, name: &str) -> BackendResult<String>;

    /// Running configuration of a device, keyed by system MAC address.
    async fn running_config(&self, system_mac: &str) -> BackendResult<String>;

    /// All change-control tasks.
    async fn tasks(&self) -> BackendResult<Vec<TaskRecord>>;

    /// Audit log lines for a task, newest first.
    async fn task_logs(&self, cc_id: &str, stage_id: &str) -> BackendResult<Vec<String>>;

    /// Names of configlets applied to a container, by container key.
    async fn applied_configlets_container(&self, container_id: &str)
    -> BackendResult<Vec<String>>;

    /// Names of configlets applied to a device, by system MAC address.
    async fn applied_configlets_device(&self, system_mac: &str) -> BackendResult<Vec<String>>;

    /// Active events, optionally restricted to a time window.
    async fn active_events(&self, window: Option<&TimeWindow>) -> BackendResult<Vec<EventRecord>>;

    /// Distinct event types currently active.
    async fn active_event_types(&self) -> BackendResult<Vec<String>>;

    /// All image bundles with application counts.
    async fn image_bundles(&self) -> BackendResult<Vec<ImageBundle>>;

    /// All software images.
    async fn images(&self) -> BackendResult<Vec<ImageInfo>>;

    /// Containers and devices a named image bundle is applied to.
    async fn bundle_assignments(&self, bundle_name: &str) -> BackendResult<BundleAssignments>;

    /// Tags assigned to a device, by device id (serial number).
    async fn device_tags(&self, device_id: &str) -> BackendResult<Vec<TagAssignment>>;

    /// Bug alert identifiers for a device, by device id.
    async fn device_bugs(&self, device_id: &str) -> BackendResult<Vec<String>>;

    /// Details of one bug alert.
    async fn bug_info(&self, bug_id: &str) -> BackendResult<BugInfo>;

    /// Per-device bug counts, keyed by device id (serial number). Only
    /// devices with at least one reported bug appear.
    async fn bug_device_report(&self) -> BackendResult<BTreeMap<String, u64>>;

    /// Hostname for a device serial number, if the device streams.
    ///
    /// Derived from `streaming_devices`; implementations may override with a
    /// cheaper lookup.
    async fn hostname_by_serial(&self, serial: &str) -> BackendResult<Option<String>> {
        let devices = self.streaming_devices().await?;
        Ok(devices
            .into_iter()
            .find(|d| d.device_id == serial)
            .map(|d| d.hostname))
    }

    /// Device id (serial number) for a hostname, if the device streams.
    async fn device_id_by_hostname(&self, hostname: &str) -> BackendResult<Option<String>> {
        let devices = self.streaming_devices().await?;
        Ok(devices
            .into_iter()
            .find(|d| d.hostname == hostname)
            .map(|d| d.device_id))
    }
}
