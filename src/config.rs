use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::services::transport::wire::WireFormat;

/// Per-feature switches. Read-only once the tracker is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureConfig {
    pub page_view: bool,
    pub clicks: bool,
    pub scroll_depth: bool,
    pub time_on_page: bool,
    pub admin_actions: bool,
    pub form_submissions: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            page_view: true,
            clicks: true,
            scroll_depth: true,
            time_on_page: true,
            admin_actions: true,
            form_submissions: true,
        }
    }
}

impl FeatureConfig {
    pub fn none() -> Self {
        Self {
            page_view: false,
            clicks: false,
            scroll_depth: false,
            time_on_page: false,
            admin_actions: false,
            form_submissions: false,
        }
    }
}

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Collector URL. Empty means tracking is disabled.
    pub endpoint: String,
    pub site_id: String,
    pub features: FeatureConfig,
    pub wire_format: WireFormat,
    /// Raises the default log filter to `debug`.
    pub debug: bool,
    pub request_timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            site_id: "default".to_string(),
            features: FeatureConfig::default(),
            wire_format: WireFormat::default(),
            debug: false,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(raw: &str) -> TrackerResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Checks that the endpoint, if set, is an absolute http(s) URL.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(TrackerError::Configuration("endpoint not configured".to_string()));
        }
        let url = reqwest::Url::parse(self.endpoint.trim())
            .map_err(|e| TrackerError::Configuration(format!("invalid endpoint: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(TrackerError::Configuration(format!(
                "unsupported endpoint scheme: {}",
                other
            ))),
        }
    }
}
