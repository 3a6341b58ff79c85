use std::collections::BTreeMap;

use crate::types::{AnyValue, InputSpec, InputType, OutputSpec};

/// The payload of a resolved input or output.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Json(AnyValue),
    Bytes(Vec<u8>),
}

impl ResolvedValue {
    /// Value as it is substituted into templates. Bytes become lossy UTF-8 text.
    pub fn to_json(&self) -> AnyValue {
        match self {
            ResolvedValue::Json(v) => v.clone(),
            ResolvedValue::Bytes(b) => AnyValue::String(String::from_utf8_lossy(b).into_owned()),
        }
    }

    /// Human-readable rendering used by collaborators.
    pub fn display(&self) -> String {
        match self {
            ResolvedValue::Json(AnyValue::String(s)) => s.clone(),
            ResolvedValue::Json(AnyValue::Null) => String::new(),
            ResolvedValue::Json(other) => other.to_string(),
            ResolvedValue::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl From<AnyValue> for ResolvedValue {
    fn from(value: AnyValue) -> Self {
        ResolvedValue::Json(value)
    }
}

/// A named value available for token substitution: a user-supplied input or an extracted output.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub name: String,
    pub label: String,
    pub value: ResolvedValue,
    pub cache: bool,
    toggle: Option<BTreeMap<String, AnyValue>>,
}

impl Resolved {
    pub fn input(spec: &InputSpec, value: AnyValue) -> Self {
        let toggle = match spec.kind {
            InputType::Toggle => spec.values.clone(),
            _ => None,
        };
        Self {
            name: spec.name.clone(),
            label: spec.label.clone(),
            value: ResolvedValue::Json(value),
            cache: false,
            toggle,
        }
    }

    pub fn output(spec: &OutputSpec, value: ResolvedValue) -> Self {
        Self {
            name: spec.name.clone(),
            label: spec.label.clone(),
            value,
            cache: spec.cache,
            toggle: None,
        }
    }

    /// The value substituted for this entry's token, after toggle mapping.
    pub fn substitution(&self) -> AnyValue {
        let value = self.value.to_json();
        if let (Some(table), AnyValue::Bool(b)) = (&self.toggle, &value) {
            if let Some(mapped) = table.get(if *b { "true" } else { "false" }) {
                return mapped.clone();
            }
        }
        value
    }
}
