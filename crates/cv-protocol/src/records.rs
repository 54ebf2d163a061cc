//! Typed records decoded from CloudVision responses.
//!
//! CloudVision payloads are loosely structured; each record here names only
//! the fields the chatbot actually reads. Decoding happens element by
//! element — a record that fails to decode is skipped, never a whole-command
//! failure.

use serde::{Deserialize, Serialize};

/// A provisioning container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename = "Name")]
    pub name: String,
    /// Container key, e.g. "container_1234_5678".
    #[serde(rename = "Key")]
    pub key: String,
}

/// A device from the provisioning inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub hostname: String,
    /// Hardware identifier used by config lookups.
    #[serde(rename = "systemMacAddress")]
    pub system_mac_address: String,
    #[serde(rename = "serialNumber", default)]
    pub serial_number: Option<String>,
}

/// A device from the resource inventory API (streaming telemetry view).
///
/// The wire shape nests this under `result.value`; the adapter flattens it
/// during decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingDevice {
    pub hostname: String,
    /// Serial number, the key of the resource API.
    pub device_id: String,
    pub streaming_status: StreamingStatus,
}

/// Streaming telemetry state of a device dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamingStatus {
    #[serde(rename = "STREAMING_STATUS_ACTIVE")]
    Active,
    #[serde(rename = "STREAMING_STATUS_INACTIVE")]
    Inactive,
    #[serde(other)]
    Unknown,
}

/// A configlet (name only; the configuration body is fetched separately).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configlet {
    pub name: String,
}

/// A change-control task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "workOrderId")]
    pub work_order_id: String,
    /// Change-control id. Absent when the task was cancelled before approval.
    #[serde(rename = "ccIdV2", default)]
    pub cc_id: Option<String>,
    /// Stage within the change control. Absent for tasks that never ran.
    #[serde(rename = "stageId", default)]
    pub stage_id: Option<String>,
}

impl TaskRecord {
    /// True when the cc id is present but empty — CloudVision serializes
    /// cancelled tasks both ways.
    pub fn cc_id_missing(&self) -> bool {
        self.cc_id.as_deref().is_none_or(str::is_empty)
    }

    pub fn stage_id_missing(&self) -> bool {
        self.stage_id.as_deref().is_none_or(str::is_empty)
    }
}

/// An active event from the analytics stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub severity: String,
    pub description: String,
    #[serde(rename = "eventType", default)]
    pub event_type: String,
    /// Serial number of the device the event fired on; resolved to a
    /// hostname before rendering.
    #[serde(rename = "deviceId", default)]
    pub device_serial: String,
}

/// An image bundle with its application counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBundle {
    pub name: String,
    #[serde(rename = "isCertifiedImageBundle")]
    pub is_certified: String,
    #[serde(rename = "imageIds", default)]
    pub image_ids: Vec<String>,
    #[serde(rename = "appliedContainersCount", default)]
    pub applied_containers_count: u64,
    #[serde(rename = "appliedDevicesCount", default)]
    pub applied_devices_count: u64,
}

/// A software image known to CloudVision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub name: String,
}

/// Containers and devices a specific image bundle is applied to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleAssignments {
    pub containers: Vec<String>,
    pub devices: Vec<String>,
}

impl BundleAssignments {
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.devices.is_empty()
    }
}

/// One tag assigned to a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAssignment {
    pub label: String,
    pub value: String,
}

/// Details of one bug alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugInfo {
    pub identifier: String,
    #[serde(rename = "alertNote")]
    pub summary: String,
    pub severity: String,
    #[serde(rename = "versionFixed")]
    pub versions_fixed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_decodes_camel_case() {
        let json = r#"{"hostname": "sw1", "systemMacAddress": "50:08:00:b1:5b:0b", "serialNumber": "JPE12345"}"#;
        let d: Device = serde_json::from_str(json).unwrap();
        assert_eq!(d.hostname, "sw1");
        assert_eq!(d.system_mac_address, "50:08:00:b1:5b:0b");
        assert_eq!(d.serial_number.as_deref(), Some("JPE12345"));
    }

    #[test]
    fn device_missing_required_field_is_an_error() {
        // No systemMacAddress — the adapter skips this record.
        let json = r#"{"hostname": "sw1"}"#;
        assert!(serde_json::from_str::<Device>(json).is_err());
    }

    #[test]
    fn task_with_empty_cc_id_counts_as_missing() {
        let json = r#"{"workOrderId": "T100", "ccIdV2": "", "stageId": "stage-1"}"#;
        let t: TaskRecord = serde_json::from_str(json).unwrap();
        assert!(t.cc_id_missing());
        assert!(!t.stage_id_missing());
    }

    #[test]
    fn task_without_stage_id() {
        let json = r#"{"workOrderId": "T100", "ccIdV2": "cc-1"}"#;
        let t: TaskRecord = serde_json::from_str(json).unwrap();
        assert!(!t.cc_id_missing());
        assert!(t.stage_id_missing());
    }

    #[test]
    fn streaming_status_unknown_variant() {
        let s: StreamingStatus = serde_json::from_str(r#""STREAMING_STATUS_ARCHIVED""#).unwrap();
        assert_eq!(s, StreamingStatus::Unknown);
    }

    #[test]
    fn image_bundle_defaults() {
        let json = r#"{"name": "EOS-4.30", "isCertifiedImageBundle": "true"}"#;
        let b: ImageBundle = serde_json::from_str(json).unwrap();
        assert!(b.image_ids.is_empty());
        assert_eq!(b.applied_devices_count, 0);
    }
}
