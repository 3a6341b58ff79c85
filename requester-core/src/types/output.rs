use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Str,
    List,
    File,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Str => "str",
            OutputType::List => "list",
            OutputType::File => "file",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputSpec {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: OutputType,

    #[serde(default)]
    pub label: String,

    /// Keep the value across chains instead of dropping it on reset.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cache: bool,

    /// Accessor into a json response, e.g. `data.items[0].id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Pattern applied to a text response; the first capture group is the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

/// File name a `file` response output is written under: the last component of the output name.
pub fn output_file_name(name: &str) -> &str {
    match Path::new(name).file_name().and_then(|n| n.to_str()) {
        Some(base) if !base.is_empty() => base,
        _ => "output",
    }
}
