use std::collections::BTreeMap;
use std::fmt;

use crate::types::AnyValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
    Password,
    Dropdown,
    Toggle,
    Molecule,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Password => "password",
            InputType::Dropdown => "dropdown",
            InputType::Toggle => "toggle",
            InputType::Molecule => "molecule",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoleculeFormat {
    Pdb,
    Sdf,
    Mmcif,
    Smiles,
}

impl MoleculeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoleculeFormat::Pdb => "pdb",
            MoleculeFormat::Sdf => "sdf",
            MoleculeFormat::Mmcif => "mmcif",
            MoleculeFormat::Smiles => "smiles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputSpec {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: InputType,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Dropdown choices. Either a literal list or a string holding a token that expands to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<MoleculeFormat>,

    /// Toggle representation table keyed by `"true"` / `"false"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<BTreeMap<String, AnyValue>>,
}

impl InputSpec {
    /// Dropdown choices rendered as display strings.
    pub fn item_names(&self) -> Vec<String> {
        match &self.items {
            Some(AnyValue::Array(items)) => items
                .iter()
                .map(|item| match item {
                    AnyValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Interpret text typed by a user according to the input type.
    ///
    /// Numbers become JSON numbers when they parse, toggles become booleans, everything else
    /// stays a string.
    pub fn coerce(&self, raw: &str) -> AnyValue {
        let trimmed = raw.trim();
        match self.kind {
            InputType::Number => {
                if let Ok(n) = trimmed.parse::<i64>() {
                    return AnyValue::from(n);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(AnyValue::Number)
                    .unwrap_or_else(|| AnyValue::String(raw.to_string()))
            }
            InputType::Toggle => AnyValue::Bool(matches!(
                trimmed.to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "on" | "1"
            )),
            _ => AnyValue::String(raw.to_string()),
        }
    }
}
