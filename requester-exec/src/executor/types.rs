use std::path::PathBuf;
use std::time::Duration;

use requester_core::types::DEFAULT_TIMEOUT;
use requester_core::EndpointCatalog;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Parent directory of the per-session temp dir; the system temp dir when unset.
    pub temp_root: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            temp_root: None,
        }
    }
}

impl SessionOptions {
    pub fn from_catalog(catalog: &EndpointCatalog) -> Self {
        Self {
            timeout: catalog.timeout(),
            ..Self::default()
        }
    }
}
