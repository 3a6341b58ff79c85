use std::fmt;

use crate::types::{AnyValue, InputSpec, OutputSpec, ValueMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Json,
    File,
    Text,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Json => "json",
            ResponseKind::File => "file",
            ResponseKind::Text => "text",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, templated HTTP call with declared inputs and outputs.
///
/// Any string inside the definition may carry `{{token}}` placeholders.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub method: String,

    pub response: ResponseKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<ValueMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ValueMap>,

    /// Multipart body: field name to file content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<ValueMap>,

    /// Form-encoded body (object) or a raw body (string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<OutputSpec>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyRef<'a> {
    Files(&'a ValueMap),
    Data(&'a AnyValue),
    Json(&'a AnyValue),
}

impl Endpoint {
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|i| i.name.as_str())
    }

    pub fn produces(&self, output: &str) -> bool {
        self.outputs.iter().any(|o| o.name == output)
    }

    /// Number of body variants set; a valid endpoint has at most one.
    pub fn body_count(&self) -> usize {
        [self.files.is_some(), self.data.is_some(), self.json.is_some()]
            .into_iter()
            .filter(|set| *set)
            .count()
    }

    pub fn body(&self) -> Option<BodyRef<'_>> {
        if let Some(files) = &self.files {
            return Some(BodyRef::Files(files));
        }
        if let Some(data) = &self.data {
            return Some(BodyRef::Data(data));
        }
        self.json.as_ref().map(BodyRef::Json)
    }
}
