//! Mock CloudVision backend for tests — serves a pre-loaded lab topology.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use cv_protocol::{
    BugInfo, BundleAssignments, Configlet, Container, Device, EventRecord, ImageBundle, ImageInfo,
    StreamingDevice, StreamingStatus, TagAssignment, TaskRecord, TimeWindow,
};

use crate::client::CloudVision;
use crate::error::{BackendError, BackendResult};

/// A mock backend serving fixture data from memory.
#[derive(Default)]
pub struct MockCloudVision {
    containers: Vec<Container>,
    container_members: HashMap<String, Vec<Device>>,
    devices: Vec<Device>,
    streaming: Vec<StreamingDevice>,
    configlet_bodies: Vec<(String, String)>,
    running_configs: HashMap<String, String>,
    tasks: Vec<TaskRecord>,
    task_logs: HashMap<(String, String), Vec<String>>,
    applied_by_container: HashMap<String, Vec<String>>,
    applied_by_device: HashMap<String, Vec<String>>,
    events: Vec<(EventRecord, DateTime<Utc>)>,
    event_types: Vec<String>,
    bundles: Vec<ImageBundle>,
    images: Vec<ImageInfo>,
    bundle_assignments: HashMap<String, BundleAssignments>,
    tags: HashMap<String, Vec<TagAssignment>>,
    bugs: HashMap<String, Vec<String>>,
    bug_details: HashMap<String, BugInfo>,
    bug_report: BTreeMap<String, u64>,
}

impl MockCloudVision {
    /// An empty backend. Every query succeeds with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// A two-leaf, one-spine lab topology with configlets, tasks, events,
    /// image bundles, tags, and bug alerts.
    pub fn lab() -> Self {
        let mut m = Self::new();

        m.containers = vec![
            container("Tenant", "root"),
            container("Leaf", "container_leaf"),
            container("Spine", "container_spine"),
        ];

        let sw1 = device("sw1", "50:08:00:b1:5b:0b", "JPE19181234");
        let sw2 = device("sw2", "50:08:00:60:96:70", "JPE19182345");
        let spine1 = device("spine1", "50:08:00:26:96:01", "JPE19183456");
        m.devices = vec![sw1.clone(), sw2.clone(), spine1.clone()];
        m.container_members
            .insert("Leaf".into(), vec![sw1.clone(), sw2.clone()]);
        m.container_members.insert("Spine".into(), vec![spine1]);
        m.container_members.insert("Tenant".into(), vec![]);

        m.streaming = vec![
            streaming("sw1", "JPE19181234"),
            streaming("sw2", "JPE19182345"),
            streaming("spine1", "JPE19183456"),
        ];

        m.configlet_bodies = vec![
            (
                "mgmt-base".into(),
                "ntp server 10.0.0.1\n!\nip name-server 10.0.0.2".into(),
            ),
            ("vlan-prod".into(), "vlan 100\n   name prod".into()),
        ];
        m.running_configs.insert(
            sw1.system_mac_address.clone(),
            "hostname sw1\n!\ninterface Ethernet1\n   no shutdown".into(),
        );
        m.running_configs.insert(
            sw2.system_mac_address.clone(),
            "hostname sw2\n!\ninterface Ethernet1\n   no shutdown".into(),
        );

        m.tasks = vec![
            TaskRecord {
                work_order_id: "T100".into(),
                cc_id: Some("cc-100".into()),
                stage_id: None,
            },
            TaskRecord {
                work_order_id: "T101".into(),
                cc_id: Some("cc-101".into()),
                stage_id: Some("stage-1".into()),
            },
            TaskRecord {
                work_order_id: "T102".into(),
                cc_id: None,
                stage_id: None,
            },
        ];
        m.task_logs.insert(
            ("cc-101".into(), "stage-1".into()),
            vec![
                "Task completed".into(),
                "Configlet pushed to sw1".into(),
                "Task created".into(),
            ],
        );

        m.applied_by_container
            .insert("container_leaf".into(), vec!["mgmt-base".into()]);
        m.applied_by_device.insert(
            "50:08:00:b1:5b:0b".into(),
            vec!["mgmt-base".into(), "vlan-prod".into()],
        );

        let now = Utc::now();
        m.events = vec![
            (
                event(
                    "Interface error counters",
                    "CRITICAL",
                    "Ethernet1 is seeing FCS errors",
                    "INTF_ERR",
                    "JPE19181234",
                ),
                now - Duration::minutes(30),
            ),
            (
                event(
                    "High CPU utilization",
                    "WARNING",
                    "Agent Sysdb above 90% CPU",
                    "CPU_HIGH",
                    "JPE19182345",
                ),
                now - Duration::hours(12),
            ),
            (
                event(
                    "Low disk space",
                    "INFO",
                    "/mnt/flash at 80%",
                    "LOW_DISK",
                    "JPE19183456",
                ),
                now - Duration::days(3),
            ),
        ];
        m.event_types = vec!["INTF_ERR".into(), "CPU_HIGH".into(), "LOW_DISK".into()];

        m.bundles = vec![
            ImageBundle {
                name: "EOS-4.30.2F".into(),
                is_certified: "true".into(),
                image_ids: vec!["EOS-4.30.2F.swi".into()],
                applied_containers_count: 1,
                applied_devices_count: 1,
            },
            ImageBundle {
                name: "EOS-4.28.1M".into(),
                is_certified: "false".into(),
                image_ids: vec!["EOS-4.28.1M.swi".into()],
                applied_containers_count: 0,
                applied_devices_count: 0,
            },
        ];
        m.images = vec![
            ImageInfo {
                name: "EOS-4.30.2F".into(),
            },
            ImageInfo {
                name: "EOS-4.28.1M".into(),
            },
        ];
        m.bundle_assignments.insert(
            "EOS-4.30.2F".into(),
            BundleAssignments {
                containers: vec!["Leaf".into()],
                devices: vec!["sw1".into()],
            },
        );
        m.bundle_assignments
            .insert("EOS-4.28.1M".into(), BundleAssignments::default());

        m.tags.insert(
            "JPE19181234".into(),
            vec![tag("role", "leaf"), tag("dc", "dc1")],
        );

        m.bugs.insert(
            "JPE19181234".into(),
            vec!["1001".into(), "1002".into()],
        );
        m.bugs.insert("JPE19182345".into(), vec!["1001".into()]);
        m.bug_details.insert(
            "1001".into(),
            BugInfo {
                identifier: "1001".into(),
                summary: "BGP session flap under high route churn".into(),
                severity: "High".into(),
                versions_fixed: "4.30.3F".into(),
            },
        );
        m.bug_details.insert(
            "1002".into(),
            BugInfo {
                identifier: "1002".into(),
                summary: "Sysdb memory leak with streaming telemetry".into(),
                severity: "Medium".into(),
                versions_fixed: "4.31.0F".into(),
            },
        );
        m.bug_report = BTreeMap::from([("JPE19181234".into(), 2), ("JPE19182345".into(), 1)]);

        m
    }
}

fn container(name: &str, key: &str) -> Container {
    Container {
        name: name.into(),
        key: key.into(),
    }
}

fn device(hostname: &str, mac: &str, serial: &str) -> Device {
    Device {
        hostname: hostname.into(),
        system_mac_address: mac.into(),
        serial_number: Some(serial.into()),
    }
}

fn streaming(hostname: &str, device_id: &str) -> StreamingDevice {
    StreamingDevice {
        hostname: hostname.into(),
        device_id: device_id.into(),
        streaming_status: StreamingStatus::Active,
    }
}

fn event(title: &str, severity: &str, description: &str, event_type: &str, serial: &str) -> EventRecord {
    EventRecord {
        title: title.into(),
        severity: severity.into(),
        description: description.into(),
        event_type: event_type.into(),
        device_serial: serial.into(),
    }
}

fn tag(label: &str, value: &str) -> TagAssignment {
    TagAssignment {
        label: label.into(),
        value: value.into(),
    }
}

#[async_trait]
impl CloudVision for MockCloudVision {
    async fn containers(&self) -> BackendResult<Vec<Container>> {
        Ok(self.containers.clone())
    }

    async fn container_devices(&self, container_name: &str) -> BackendResult<Vec<Device>> {
        Ok(self
            .container_members
            .get(container_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn container_id_by_name(&self, name: &str) -> BackendResult<String> {
        self.containers
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.key.clone())
            .ok_or_else(|| BackendError::not_found("container", name))
    }

    async fn devices(&self) -> BackendResult<Vec<Device>> {
        Ok(self.devices.clone())
    }

    async fn streaming_devices(&self) -> BackendResult<Vec<StreamingDevice>> {
        Ok(self.streaming.clone())
    }

    async fn configlets(&self) -> BackendResult<Vec<Configlet>> {
        Ok(self
            .configlet_bodies
            .iter()
            .map(|(name, _)| Configlet { name: name.clone() })
            .collect())
    }

    async fn configlet_config(&self, name: &str) -> BackendResult<String> {
        self.configlet_bodies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| BackendError::not_found("configlet", name))
    }

    async fn running_config(&self, system_mac: &str) -> BackendResult<String> {
        self.running_configs
            .get(system_mac)
            .cloned()
            .ok_or_else(|| BackendError::not_found("device configuration", system_mac))
    }

    async fn tasks(&self) -> BackendResult<Vec<TaskRecord>> {
        Ok(self.tasks.clone())
    }

    async fn task_logs(&self, cc_id: &str, stage_id: &str) -> BackendResult<Vec<String>> {
        Ok(self
            .task_logs
            .get(&(cc_id.to_string(), stage_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn applied_configlets_container(
        &self,
        container_id: &str,
    ) -> BackendResult<Vec<String>> {
        Ok(self
            .applied_by_container
            .get(container_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn applied_configlets_device(&self, system_mac: &str) -> BackendResult<Vec<String>> {
        Ok(self
            .applied_by_device
            .get(system_mac)
            .cloned()
            .unwrap_or_default())
    }

    async fn active_events(&self, window: Option<&TimeWindow>) -> BackendResult<Vec<EventRecord>> {
        Ok(self
            .events
            .iter()
            .filter(|(_, at)| window.is_none_or(|w| w.contains(*at)))
            .map(|(e, _)| e.clone())
            .collect())
    }

    async fn active_event_types(&self) -> BackendResult<Vec<String>> {
        Ok(self.event_types.clone())
    }

    async fn image_bundles(&self) -> BackendResult<Vec<ImageBundle>> {
        Ok(self.bundles.clone())
    }

    async fn images(&self) -> BackendResult<Vec<ImageInfo>> {
        Ok(self.images.clone())
    }

    async fn bundle_assignments(&self, bundle_name: &str) -> BackendResult<BundleAssignments> {
        Ok(self
            .bundle_assignments
            .get(bundle_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn device_tags(&self, device_id: &str) -> BackendResult<Vec<TagAssignment>> {
        Ok(self.tags.get(device_id).cloned().unwrap_or_default())
    }

    async fn device_bugs(&self, device_id: &str) -> BackendResult<Vec<String>> {
        Ok(self.bugs.get(device_id).cloned().unwrap_or_default())
    }

    async fn bug_info(&self, bug_id: &str) -> BackendResult<BugInfo> {
        self.bug_details
            .get(bug_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("bug", bug_id))
    }

    async fn bug_device_report(&self) -> BackendResult<BTreeMap<String, u64>> {
        Ok(self.bug_report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lab_topology_is_consistent() {
        let cv = MockCloudVision::lab();
        assert_eq!(cv.containers().await.unwrap().len(), 3);
        assert_eq!(cv.devices().await.unwrap().len(), 3);
        assert_eq!(cv.container_devices("Leaf").await.unwrap().len(), 2);
        assert!(cv.container_devices("Tenant").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn serial_and_hostname_lookups_are_inverse() {
        let cv = MockCloudVision::lab();
        let id = cv.device_id_by_hostname("sw1").await.unwrap().unwrap();
        let hostname = cv.hostname_by_serial(&id).await.unwrap().unwrap();
        assert_eq!(hostname, "sw1");
    }

    #[tokio::test]
    async fn window_filters_old_events() {
        let cv = MockCloudVision::lab();
        let all = cv.active_events(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let window = TimeWindow::new(Utc::now() - Duration::hours(2), Utc::now());
        let recent = cv.active_events(Some(&window)).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].severity, "CRITICAL");
    }

    #[tokio::test]
    async fn unknown_container_id_is_not_found() {
        let cv = MockCloudVision::lab();
        let err = cv.container_id_by_name("Nonexistent").await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }
}
