use regex::Regex;
use requester_core::types::{Endpoint, OutputSpec};
use requester_core::{OutputPath, Resolved, ResolvedValue};
use serde_json::Value as JsonValue;

use crate::executor::response::ResponseBody;

/// An output that could not be extracted. Its value is null; the chain keeps going.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFailure {
    pub output: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// One entry per declared output, in declaration order.
    pub outputs: Vec<Resolved>,
    pub failures: Vec<OutputFailure>,
}

pub fn extract_outputs(endpoint: &Endpoint, body: &ResponseBody) -> Extraction {
    let mut extraction = Extraction::default();

    for spec in &endpoint.outputs {
        let value = match extract_one(spec, body) {
            Ok(value) => value,
            Err(message) => {
                tracing::warn!(endpoint = %endpoint.name, output = %spec.name, "{message}");
                extraction.failures.push(OutputFailure {
                    output: spec.name.clone(),
                    message,
                });
                ResolvedValue::Json(JsonValue::Null)
            }
        };
        extraction.outputs.push(Resolved::output(spec, value));
    }

    extraction
}

fn extract_one(spec: &OutputSpec, body: &ResponseBody) -> Result<ResolvedValue, String> {
    match body {
        ResponseBody::Json(doc) => {
            let raw = spec.path.as_deref().unwrap_or_default();
            let path = OutputPath::parse(raw).map_err(|e| format!("invalid path '{raw}': {e}"))?;
            path.lookup(doc)
                .cloned()
                .map(ResolvedValue::Json)
                .ok_or_else(|| format!("value not found: {raw}"))
        }
        ResponseBody::Text(text) => {
            let pattern = spec.regex.as_deref().unwrap_or_default();
            let re = Regex::new(pattern).map_err(|e| format!("invalid regex '{pattern}': {e}"))?;
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| ResolvedValue::Json(JsonValue::String(m.as_str().to_string())))
                .ok_or_else(|| format!("no match for: {pattern}"))
        }
        ResponseBody::Bytes(bytes) => Ok(ResolvedValue::Bytes(bytes.clone())),
    }
}
