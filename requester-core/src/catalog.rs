use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, ValidationError};
use crate::parser::{parse_config_str, DocumentFormat};
use crate::types::{Endpoint, RequesterConfig};
use crate::validate::validate_config;

/// Immutable, validated set of endpoint definitions plus the global HTTP settings.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    config: RequesterConfig,
    producers: HashMap<String, usize>,
}

impl EndpointCatalog {
    pub fn new(config: RequesterConfig) -> Result<Self, ValidationError> {
        validate_config(&config)?;

        let mut producers = HashMap::<String, usize>::new();
        for (idx, ep) in config.endpoints.iter().enumerate() {
            for output in &ep.outputs {
                if let Some(first) = producers.get(&output.name) {
                    tracing::warn!(
                        output = %output.name,
                        used = %config.endpoints[*first].name,
                        ignored = %ep.name,
                        "output is produced by more than one endpoint; the first declared wins"
                    );
                } else {
                    producers.insert(output.name.clone(), idx);
                }
            }
        }

        Ok(Self { config, producers })
    }

    pub fn from_config_str(input: &str, format: DocumentFormat) -> Result<Self, ConfigError> {
        let parsed = parse_config_str(input, format)?;
        Ok(Self::new(parsed.config)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_config_str(&content, DocumentFormat::Auto)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.config.endpoints
    }

    /// Endpoints without the `hidden` flag, in declaration order.
    pub fn list_visible(&self) -> Vec<&Endpoint> {
        self.config.endpoints.iter().filter(|e| !e.hidden).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Endpoint> {
        self.config.endpoints.iter().find(|e| e.name == name)
    }

    /// First declared endpoint whose outputs include `output`.
    pub fn find_producer(&self, output: &str) -> Option<&Endpoint> {
        self.producers
            .get(output)
            .map(|idx| &self.config.endpoints[*idx])
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    pub fn proxies(&self) -> BTreeMap<String, String> {
        self.config.proxies()
    }

    pub fn config(&self) -> &RequesterConfig {
        &self.config
    }
}
