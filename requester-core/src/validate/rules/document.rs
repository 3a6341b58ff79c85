use std::time::Duration;

use crate::types::RequesterConfig;
use crate::validate::rules::{common::validate_unique_names, endpoint};
use crate::validate::validator::Validator;

const PROXY_SCHEMES: [&str; 3] = ["http", "https", "all"];

pub(crate) fn validate_config(v: &mut Validator, config: &RequesterConfig) {
    if config.endpoints.is_empty() {
        v.push("$.endpoints", "must have at least one entry");
    }

    validate_unique_names(
        v,
        "$.endpoints",
        "name",
        config.endpoints.iter().map(|e| e.name.as_str()),
    );

    for (idx, ep) in config.endpoints.iter().enumerate() {
        endpoint::validate_endpoint(v, ep, &format!("$.endpoints[{idx}]"));
    }

    if let Some(timeout) = config.timeout {
        if timeout <= 0.0 {
            v.push("$.timeout", "must be a positive number of seconds");
        } else if Duration::try_from_secs_f64(timeout).is_err() {
            v.push("$.timeout", "must be a finite number of seconds");
        }
    }

    if let Some(proxies) = &config.proxies {
        for (scheme, proxy) in proxies {
            let path = format!("$.proxies.{scheme}");
            if !PROXY_SCHEMES.contains(&scheme.as_str()) {
                v.push(path.as_str(), "proxy key must be one of http, https, all");
            }
            v.require_non_empty(path, proxy);
        }
    }
}
