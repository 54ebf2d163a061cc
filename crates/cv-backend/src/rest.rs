//! REST implementation of the `CloudVision` trait.
//!
//! Speaks to an on-prem CVP instance (session login with username/password)
//! or to CVaaS (bearer token). One client is built per invocation and reused
//! for every call within it; reqwest pools the underlying connections.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::OnceCell;

use cv_protocol::{
    BugInfo, BundleAssignments, Configlet, Container, Device, EventRecord, ImageBundle, ImageInfo,
    StreamingDevice, StreamingStatus, TagAssignment, TaskRecord, TimeWindow,
};

use crate::client::CloudVision;
use crate::error::{BackendError, BackendResult};

/// How the client authenticates against CloudVision.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// On-prem CVP: session login with username/password.
    OnPrem { username: String, password: String },
    /// CVaaS: service-account bearer token.
    Cvaas { token: String },
}

/// REST client for CloudVision.
pub struct CvpRestClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthMode,
    /// On-prem session id, established lazily on first request.
    session: OnceCell<String>,
}

impl CvpRestClient {
    /// Build a client. No network traffic happens until the first call.
    pub fn new(
        base_url: impl Into<String>,
        auth: AuthMode,
        timeout: Duration,
    ) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            session: OnceCell::new(),
        })
    }

    /// On-prem session login. Returns the session id to send as a cookie.
    async fn login(&self, username: &str, password: &str) -> BackendResult<String> {
        let url = format!("{}/cvpservice/login/authenticate.do", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "userId": username, "password": password }))
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BackendError::Auth("invalid username or password".into()));
        }
        if !response.status().is_success() {
            return Err(BackendError::Status {
                status: response.status().as_u16(),
                endpoint: "/cvpservice/login/authenticate.do".into(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| decode_error("/cvpservice/login/authenticate.do", e))?;
        body["sessionId"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| BackendError::Auth("login response carried no session id".into()))
    }

    async fn session_id(&self) -> BackendResult<&str> {
        let AuthMode::OnPrem { username, password } = &self.auth else {
            unreachable!("session_id is only called in on-prem mode");
        };
        self.session
            .get_or_try_init(|| self.login(username, password))
            .await
            .map(String::as_str)
    }

    async fn authorize(&self, request: reqwest::RequestBuilder) -> BackendResult<reqwest::RequestBuilder> {
        match &self.auth {
            AuthMode::Cvaas { token } => Ok(request.bearer_auth(token)),
            AuthMode::OnPrem { .. } => {
                let session = self.session_id().await?;
                Ok(request.header("Cookie", format!("access_token={session}")))
            }
        }
    }

    async fn send(&self, endpoint: &str, request: reqwest::RequestBuilder) -> BackendResult<Value> {
        let request = self.authorize(request).await?;
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::Auth(format!("HTTP {status} for {endpoint}")));
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        response.json().await.map_err(|e| decode_error(endpoint, e))
    }

    async fn get_json(&self, endpoint: &str) -> BackendResult<Value> {
        let url = format!("{}{endpoint}", self.base_url);
        self.send(endpoint, self.http.get(&url)).await
    }

    async fn post_json(&self, endpoint: &str, body: &Value) -> BackendResult<Value> {
        let url = format!("{}{endpoint}", self.base_url);
        self.send(endpoint, self.http.post(&url).json(body)).await
    }

    /// Fetch resource-API entries (`{"data": [{"result": {"value": ...}}]}`)
    /// and decode each `value`, skipping entries that don't fit `T`.
    async fn resource_values<T: DeserializeOwned>(&self, endpoint: &str) -> BackendResult<Vec<T>> {
        let body = self.get_json(endpoint).await?;
        let entries = data_array(endpoint, body)?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| decode_or_skip::<ResourceEntry>(endpoint, entry))
            .filter_map(|entry| decode_or_skip::<T>(endpoint, entry.result.value))
            .collect())
    }

    /// Merge `updates` maps across analytics notifications.
    async fn analytics_updates(&self, endpoint: &str) -> BackendResult<serde_json::Map<String, Value>> {
        let body = self.get_json(endpoint).await?;
        let notifications = body
            .get("notifications")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let mut merged = serde_json::Map::new();
        for notification in notifications {
            if let Some(updates) = notification.get("updates").and_then(Value::as_object) {
                for (key, value) in updates {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(merged)
    }
}

fn decode_error(endpoint: &str, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    }
}

/// Pull the `data` array out of a CVP envelope, or treat a bare array as the
/// data itself (the inventory endpoints return both shapes).
fn data_array(endpoint: &str, body: Value) -> BackendResult<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(decode_error(endpoint, "expected a data array")),
        },
        _ => Err(decode_error(endpoint, "expected a data array")),
    }
}

/// Decode one record, logging and skipping on failure. A malformed record is
/// never a whole-command failure.
fn decode_or_skip<T: DeserializeOwned>(endpoint: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!(endpoint, error = %e, "skipping undecodable record");
            None
        }
    }
}

fn decode_each<T: DeserializeOwned>(endpoint: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|v| decode_or_skip(endpoint, v))
        .collect()
}

// ── Wire shapes private to the REST transport ───────────────────

#[derive(Deserialize)]
struct ResourceEntry {
    result: ResourceResult,
}

#[derive(Deserialize)]
struct ResourceResult {
    value: Value,
}

#[derive(Deserialize)]
struct DeviceValue {
    key: DeviceKey,
    hostname: String,
    #[serde(rename = "streamingStatus")]
    streaming_status: StreamingStatus,
}

#[derive(Deserialize)]
struct DeviceKey {
    #[serde(rename = "deviceId")]
    device_id: String,
}

#[derive(Deserialize)]
struct EventValue {
    title: String,
    severity: String,
    description: String,
    #[serde(rename = "eventType", default)]
    event_type: String,
    #[serde(default)]
    data: EventData,
}

#[derive(Deserialize, Default)]
struct EventData {
    #[serde(rename = "deviceId", default)]
    device_id: String,
}

#[derive(Deserialize)]
struct TagValue {
    key: TagKey,
}

#[derive(Deserialize)]
struct TagKey {
    label: String,
    value: String,
}

#[derive(Deserialize)]
struct BugUpdates {
    #[serde(rename = "alertNote")]
    alert_note: String,
    severity: String,
    #[serde(rename = "versionFixed")]
    version_fixed: String,
}

#[derive(Deserialize)]
struct NamedEntity {
    name: String,
}

#[derive(Deserialize)]
struct AppliedContainer {
    #[serde(rename = "containerName")]
    container_name: String,
}

#[derive(Deserialize)]
struct AppliedDevice {
    #[serde(rename = "hostName")]
    host_name: String,
}

#[derive(Deserialize)]
struct AuditLogEntry {
    activity: String,
}

#[async_trait]
impl CloudVision for CvpRestClient {
    async fn containers(&self) -> BackendResult<Vec<Container>> {
        let endpoint = "/cvpservice/inventory/containers";
        let body = self.get_json(endpoint).await?;
        Ok(decode_each(endpoint, data_array(endpoint, body)?))
    }

    async fn container_devices(&self, container_name: &str) -> BackendResult<Vec<Device>> {
        let endpoint = format!(
            "/cvpservice/inventory/devices?provisioned=true&containerName={container_name}"
        );
        let body = self.get_json(&endpoint).await?;
        Ok(decode_each(&endpoint, data_array(&endpoint, body)?))
    }

    async fn container_id_by_name(&self, name: &str) -> BackendResult<String> {
        let endpoint = format!("/cvpservice/inventory/containers?name={name}");
        let body = self.get_json(&endpoint).await?;
        let containers: Vec<Container> = decode_each(&endpoint, data_array(&endpoint, body)?);
        containers
            .into_iter()
            .next()
            .map(|c| c.key)
            .ok_or_else(|| BackendError::not_found("container", name))
    }

    async fn devices(&self) -> BackendResult<Vec<Device>> {
        let endpoint = "/cvpservice/inventory/devices";
        let body = self.get_json(endpoint).await?;
        Ok(decode_each(endpoint, data_array(endpoint, body)?))
    }

    async fn streaming_devices(&self) -> BackendResult<Vec<StreamingDevice>> {
        let endpoint = "/api/resources/inventory/v1/Device/all";
        let values: Vec<DeviceValue> = self.resource_values(endpoint).await?;
        Ok(values
            .into_iter()
            .filter(|v| v.streaming_status == StreamingStatus::Active)
            .map(|v| StreamingDevice {
                hostname: v.hostname,
                device_id: v.key.device_id,
                streaming_status: v.streaming_status,
            })
            .collect())
    }

    async fn configlets(&self) -> BackendResult<Vec<Configlet>> {
        let endpoint = "/cvpservice/configlet/getConfiglets.do?startIndex=0&endIndex=0";
        let body = self.get_json(endpoint).await?;
        Ok(decode_each(endpoint, data_array(endpoint, body)?))
    }

    async fn configlet_config(&self, name: &str) -> BackendResult<String> {
        let endpoint = format!("/cvpservice/configlet/getConfigletByName.do?name={name}");
        let body = self.get_json(&endpoint).await?;
        body["config"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| BackendError::not_found("configlet", name))
    }

    async fn running_config(&self, system_mac: &str) -> BackendResult<String> {
        let endpoint = format!("/cvpservice/inventory/device/config?netElementId={system_mac}");
        let body = self.get_json(&endpoint).await?;
        body["output"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| BackendError::not_found("device configuration", system_mac))
    }

    async fn tasks(&self) -> BackendResult<Vec<TaskRecord>> {
        let endpoint = "/cvpservice/task/getTasks.do?startIndex=0&endIndex=0";
        let body = self.get_json(endpoint).await?;
        Ok(decode_each(endpoint, data_array(endpoint, body)?))
    }

    async fn task_logs(&self, cc_id: &str, stage_id: &str) -> BackendResult<Vec<String>> {
        let endpoint = "/cvpservice/audit/getLogs.do";
        let body = self
            .post_json(
                endpoint,
                &json!({ "ccId": cc_id, "stageId": stage_id, "dataSize": 75 }),
            )
            .await?;
        let entries: Vec<AuditLogEntry> = decode_each(endpoint, data_array(endpoint, body)?);
        // The API returns oldest-first; the chatbot shows newest first.
        Ok(entries.into_iter().rev().map(|e| e.activity).collect())
    }

    async fn applied_configlets_container(
        &self,
        container_id: &str,
    ) -> BackendResult<Vec<String>> {
        let endpoint = format!(
            "/cvpservice/provisioning/getConfigletsByContainerId.do?containerId={container_id}&startIndex=0&endIndex=0"
        );
        let body = self.get_json(&endpoint).await?;
        let entries = configlet_list(&endpoint, body)?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    async fn applied_configlets_device(&self, system_mac: &str) -> BackendResult<Vec<String>> {
        let endpoint = format!(
            "/cvpservice/provisioning/getConfigletsByNetElementId.do?netElementId={system_mac}&startIndex=0&endIndex=0"
        );
        let body = self.get_json(&endpoint).await?;
        let entries = configlet_list(&endpoint, body)?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    async fn active_events(&self, window: Option<&TimeWindow>) -> BackendResult<Vec<EventRecord>> {
        let endpoint = match window {
            Some(w) => format!(
                "/api/resources/event/v1/Event/all?time.start={}&time.end={}",
                w.start.to_rfc3339(),
                w.end.to_rfc3339()
            ),
            None => "/api/resources/event/v1/Event/all".to_string(),
        };
        let values: Vec<EventValue> = self.resource_values(&endpoint).await?;
        Ok(values
            .into_iter()
            .map(|v| EventRecord {
                title: v.title,
                severity: v.severity,
                description: v.description,
                event_type: v.event_type,
                device_serial: v.data.device_id,
            })
            .collect())
    }

    async fn active_event_types(&self) -> BackendResult<Vec<String>> {
        let endpoint = "/api/v1/rest/analytics/events/type";
        let updates = self.analytics_updates(endpoint).await?;
        Ok(updates.into_iter().map(|(key, _)| key).collect())
    }

    async fn image_bundles(&self) -> BackendResult<Vec<ImageBundle>> {
        let endpoint = "/cvpservice/image/getImageBundles.do?startIndex=0&endIndex=0";
        let body = self.get_json(endpoint).await?;
        Ok(decode_each(endpoint, data_array(endpoint, body)?))
    }

    async fn images(&self) -> BackendResult<Vec<ImageInfo>> {
        let endpoint = "/cvpservice/image/getImages.do?startIndex=0&endIndex=0";
        let body = self.get_json(endpoint).await?;
        Ok(decode_each(endpoint, data_array(endpoint, body)?))
    }

    async fn bundle_assignments(&self, bundle_name: &str) -> BackendResult<BundleAssignments> {
        let container_endpoint = format!(
            "/cvpservice/image/getImageBundleAppliedContainers.do?imageName={bundle_name}&startIndex=0&endIndex=0"
        );
        let device_endpoint = format!(
            "/cvpservice/image/getImageBundleAppliedDevices.do?imageName={bundle_name}&startIndex=0&endIndex=0"
        );

        let container_body = self.get_json(&container_endpoint).await?;
        let device_body = self.get_json(&device_endpoint).await?;

        let containers: Vec<AppliedContainer> = decode_each(
            &container_endpoint,
            data_array(&container_endpoint, container_body)?,
        );
        let devices: Vec<AppliedDevice> =
            decode_each(&device_endpoint, data_array(&device_endpoint, device_body)?);

        Ok(BundleAssignments {
            containers: containers.into_iter().map(|c| c.container_name).collect(),
            devices: devices.into_iter().map(|d| d.host_name).collect(),
        })
    }

    async fn device_tags(&self, device_id: &str) -> BackendResult<Vec<TagAssignment>> {
        let endpoint = "/api/resources/tag/v1/InterfaceTagAssignmentConfig/all";
        let body = self
            .post_json(
                endpoint,
                &json!({ "partialEqFilter": [{ "key": { "deviceId": device_id } }] }),
            )
            .await?;
        let entries = data_array(endpoint, body)?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| decode_or_skip::<ResourceEntry>(endpoint, entry))
            .filter_map(|entry| decode_or_skip::<TagValue>(endpoint, entry.result.value))
            .map(|v| TagAssignment {
                label: v.key.label,
                value: v.key.value,
            })
            .collect())
    }

    async fn device_bugs(&self, device_id: &str) -> BackendResult<Vec<String>> {
        let endpoint = "/api/v1/rest/analytics/tags/BugAlerts/devices";
        let updates = self.analytics_updates(endpoint).await?;
        let Some(bugs) = updates.get(device_id).and_then(Value::as_array) else {
            return Ok(Vec::new());
        };
        Ok(bugs.iter().map(json_token).collect())
    }

    async fn bug_info(&self, bug_id: &str) -> BackendResult<BugInfo> {
        let endpoint = format!("/api/v1/rest/analytics/BugAlerts/bugs/{bug_id}");
        let updates = self.analytics_updates(&endpoint).await?;
        let details: BugUpdates = serde_json::from_value(Value::Object(updates))
            .map_err(|_| BackendError::not_found("bug", bug_id))?;
        Ok(BugInfo {
            identifier: bug_id.to_string(),
            summary: details.alert_note,
            severity: details.severity,
            versions_fixed: details.version_fixed,
        })
    }

    async fn bug_device_report(&self) -> BackendResult<BTreeMap<String, u64>> {
        let endpoint = "/api/v1/rest/analytics/BugAlerts/devicesBugsCount";
        let updates = self.analytics_updates(endpoint).await?;
        Ok(updates
            .into_iter()
            .filter_map(|(serial, count)| count.as_u64().map(|c| (serial, c)))
            .collect())
    }
}

/// Numbers and strings both appear as bug identifiers; render either as text.
fn json_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn configlet_list(endpoint: &str, body: Value) -> BackendResult<Vec<NamedEntity>> {
    let items = body
        .get("configletList")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| decode_error(endpoint, "expected a configletList array"))?;
    Ok(decode_each(endpoint, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cvaas_client(server: &MockServer) -> CvpRestClient {
        CvpRestClient::new(
            server.uri(),
            AuthMode::Cvaas {
                token: "test-token".into(),
            },
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn containers_decode_and_skip_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cvpservice/inventory/containers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "Name": "Tenant", "Key": "root" },
                    { "Name": "Leaf" },
                    { "Name": "Spine", "Key": "container_2" },
                ]
            })))
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let containers = client.containers().await.unwrap();
        // The record without a Key is skipped, not fatal.
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].name, "Tenant");
        assert_eq!(containers[1].key, "container_2");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cvpservice/inventory/devices"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let err = client.devices().await.unwrap_err();
        assert!(matches!(err, BackendError::Auth(_)));
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cvpservice/task/getTasks.do"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let err = client.tasks().await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn on_prem_login_sets_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cvpservice/login/authenticate.do"))
            .and(body_partial_json(json!({ "userId": "cvpadmin" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "session-abc" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cvpservice/inventory/devices"))
            .and(wiremock::matchers::header("Cookie", "access_token=session-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = CvpRestClient::new(
            server.uri(),
            AuthMode::OnPrem {
                username: "cvpadmin".into(),
                password: "secret".into(),
            },
            Duration::from_secs(2),
        )
        .unwrap();

        let devices = client.devices().await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn on_prem_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cvpservice/login/authenticate.do"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = CvpRestClient::new(
            server.uri(),
            AuthMode::OnPrem {
                username: "cvpadmin".into(),
                password: "wrong".into(),
            },
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.containers().await.unwrap_err();
        assert!(matches!(err, BackendError::Auth(_)));
    }

    #[tokio::test]
    async fn task_logs_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cvpservice/audit/getLogs.do"))
            .and(body_partial_json(json!({ "ccId": "cc-1", "stageId": "stage-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "activity": "Task created" },
                    { "activity": "Task executing" },
                    { "activity": "Task completed" },
                ]
            })))
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let logs = client.task_logs("cc-1", "stage-1").await.unwrap();
        assert_eq!(logs[0], "Task completed");
        assert_eq!(logs[2], "Task created");
    }

    #[tokio::test]
    async fn streaming_devices_filters_inactive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/inventory/v1/Device/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "result": { "value": {
                        "key": { "deviceId": "JPE111" },
                        "hostname": "sw1",
                        "streamingStatus": "STREAMING_STATUS_ACTIVE"
                    }}},
                    { "result": { "value": {
                        "key": { "deviceId": "JPE222" },
                        "hostname": "sw2",
                        "streamingStatus": "STREAMING_STATUS_INACTIVE"
                    }}},
                    // archived dataset with no hostname — skipped
                    { "result": { "value": { "key": { "deviceId": "JPE333" } } } },
                ]
            })))
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let devices = client.streaming_devices().await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].hostname, "sw1");
        assert_eq!(devices[0].device_id, "JPE111");
    }

    #[tokio::test]
    async fn missing_configlet_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cvpservice/configlet/getConfigletByName.do"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "errorMessage": "entity does not exist" })),
            )
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let err = client.configlet_config("nope").await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { kind: "configlet", .. }));
    }

    #[tokio::test]
    async fn bug_device_report_merges_notifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rest/analytics/BugAlerts/devicesBugsCount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "notifications": [
                    { "updates": { "JPE111": 3 } },
                    { "updates": { "JPE222": 1 } },
                ]
            })))
            .mount(&server)
            .await;

        let client = cvaas_client(&server);
        let report = client.bug_device_report().await.unwrap();
        assert_eq!(report.get("JPE111"), Some(&3));
        assert_eq!(report.get("JPE222"), Some(&1));
    }
}
