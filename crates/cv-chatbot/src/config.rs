//! Chatbot configuration, loadable from TOML or environment.

use std::time::Duration;

use serde::Deserialize;

use cv_backend::{AuthMode, BackendResult, CvpRestClient};

/// Top-level configuration for the chatbot.
///
/// On-prem mode talks to a CVP appliance with username/password; cloud mode
/// talks to CVaaS with a service-account token.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatopsConfig {
    /// Use an on-prem CVP appliance instead of CVaaS.
    #[serde(default)]
    pub on_prem: bool,
    /// CVP appliance URL (on-prem only).
    #[serde(default)]
    pub cvp_url: Option<String>,
    #[serde(default)]
    pub cvp_username: Option<String>,
    #[serde(default)]
    pub cvp_password: Option<String>,
    /// CVaaS service-account token (cloud only).
    #[serde(default)]
    pub cvaas_token: Option<String>,
    /// CVaaS API endpoint.
    #[serde(default = "default_cvaas_url")]
    pub cvaas_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_cvaas_url() -> String {
    "https://www.arista.io".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ChatopsConfig {
    fn default() -> Self {
        Self {
            on_prem: false,
            cvp_url: None,
            cvp_username: None,
            cvp_password: None,
            cvaas_token: None,
            cvaas_url: default_cvaas_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ChatopsConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let getenv = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        let on_prem = getenv("CVP_ON_PREM")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        Self {
            on_prem,
            cvp_url: getenv("CVP_URL"),
            cvp_username: getenv("CVP_USERNAME"),
            cvp_password: getenv("CVP_PASSWORD"),
            cvaas_token: getenv("CVAAS_TOKEN"),
            cvaas_url: getenv("CVAAS_URL").unwrap_or_else(default_cvaas_url),
            ..Self::default()
        }
    }

    /// Warning text when the credentials for the active mode are incomplete.
    /// Checked before any backend call is attempted.
    pub fn missing_credentials(&self) -> Option<&'static str> {
        if self.on_prem {
            if self.cvp_url.is_none() || self.cvp_username.is_none() || self.cvp_password.is_none()
            {
                return Some(
                    "Please ensure config values cvp_url, cvp_username and cvp_password are set.",
                );
            }
        } else if self.cvaas_token.is_none() {
            return Some("Please ensure config value cvaas_token is set.");
        }
        None
    }

    /// Build the REST backend handle for this configuration.
    ///
    /// Credential presence is validated separately by `missing_credentials`;
    /// values defaulted here are never sent when that check fails first.
    pub fn rest_client(&self) -> BackendResult<CvpRestClient> {
        let (base_url, auth) = if self.on_prem {
            (
                self.cvp_url.clone().unwrap_or_default(),
                AuthMode::OnPrem {
                    username: self.cvp_username.clone().unwrap_or_default(),
                    password: self.cvp_password.clone().unwrap_or_default(),
                },
            )
        } else {
            (
                self.cvaas_url.clone(),
                AuthMode::Cvaas {
                    token: self.cvaas_token.clone().unwrap_or_default(),
                },
            )
        };
        CvpRestClient::new(base_url, auth, Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_cloud_config() {
        let toml = r#"
cvaas_token = "tok-123"
"#;
        let config: ChatopsConfig = toml::from_str(toml).unwrap();
        assert!(!config.on_prem);
        assert_eq!(config.cvaas_url, "https://www.arista.io"); // default
        assert_eq!(config.request_timeout_secs, 30); // default
        assert!(config.missing_credentials().is_none());
    }

    #[test]
    fn deserialize_on_prem_config() {
        let toml = r#"
on_prem = true
cvp_url = "https://cvp.example.com"
cvp_username = "cvpadmin"
cvp_password = "secret"
request_timeout_secs = 10
"#;
        let config: ChatopsConfig = toml::from_str(toml).unwrap();
        assert!(config.on_prem);
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.missing_credentials().is_none());
    }

    #[test]
    fn on_prem_missing_any_credential_is_flagged() {
        let toml = r#"
on_prem = true
cvp_url = "https://cvp.example.com"
cvp_username = "cvpadmin"
"#;
        let config: ChatopsConfig = toml::from_str(toml).unwrap();
        let warning = config.missing_credentials().unwrap();
        assert!(warning.contains("cvp_password"));
    }

    #[test]
    fn cloud_missing_token_is_flagged() {
        let config = ChatopsConfig::default();
        let warning = config.missing_credentials().unwrap();
        assert!(warning.contains("cvaas_token"));
    }
}
