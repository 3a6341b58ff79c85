use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::Endpoint;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequesterConfig {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    /// Proxy URL per scheme (`http`, `https`, `all`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxies: Option<BTreeMap<String, String>>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl RequesterConfig {
    pub fn timeout(&self) -> Duration {
        self.timeout
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn proxies(&self) -> BTreeMap<String, String> {
        self.proxies.clone().unwrap_or_default()
    }
}
