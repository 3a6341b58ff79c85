use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::template::{parse_template, Segment};
use super::value::Resolved;
use crate::types::AnyValue;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("value not set: {0}")]
    Unresolved(String),
    #[error("failed to encode template: {0}")]
    Encode(String),
    #[error("substituted value does not fit its field: {0}")]
    Decode(String),
}

/// Anything that can supply a value for a token name.
pub trait TokenSource {
    fn resolve(&self, token: &str) -> Option<AnyValue>;
}

impl TokenSource for BTreeMap<String, Resolved> {
    fn resolve(&self, token: &str) -> Option<AnyValue> {
        self.get(token).map(Resolved::substitution)
    }
}

impl TokenSource for BTreeMap<String, AnyValue> {
    fn resolve(&self, token: &str) -> Option<AnyValue> {
        self.get(token).cloned()
    }
}

/// Distinct token names appearing anywhere in the value, object keys included.
pub fn extract_tokens(value: &AnyValue) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    collect_tokens(value, &mut out);
    out
}

fn collect_tokens(value: &AnyValue, out: &mut BTreeSet<String>) {
    match value {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => {}
        AnyValue::String(s) => collect_string_tokens(s, out),
        AnyValue::Array(arr) => {
            for v in arr {
                collect_tokens(v, out);
            }
        }
        AnyValue::Object(map) => {
            for (k, v) in map {
                collect_string_tokens(k, out);
                collect_tokens(v, out);
            }
        }
    }
}

fn collect_string_tokens(s: &str, out: &mut BTreeSet<String>) {
    if !s.contains("{{") {
        return;
    }
    out.extend(parse_template(s).tokens().map(str::to_string));
}

/// Replace every token in `value`, keeping JSON types intact.
///
/// A string that is exactly one token takes the resolved value as-is, so `"{{n}}"` with `n = 5`
/// becomes the number `5`. Tokens inside longer strings are spliced in as text.
pub fn substitute(value: &AnyValue, source: &dyn TokenSource) -> Result<AnyValue, TokenError> {
    match value {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => Ok(value.clone()),
        AnyValue::String(s) => substitute_string(s, source),
        AnyValue::Array(arr) => arr
            .iter()
            .map(|v| substitute(v, source))
            .collect::<Result<Vec<_>, _>>()
            .map(AnyValue::Array),
        AnyValue::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(splice(k, source)?, substitute(v, source)?);
            }
            Ok(AnyValue::Object(out))
        }
    }
}

fn substitute_string(s: &str, source: &dyn TokenSource) -> Result<AnyValue, TokenError> {
    if !s.contains("{{") {
        return Ok(AnyValue::String(s.to_string()));
    }
    let tpl = parse_template(s);
    if let Some(name) = tpl.sole_token() {
        return source
            .resolve(name)
            .ok_or_else(|| TokenError::Unresolved(name.to_string()));
    }
    splice(s, source).map(AnyValue::String)
}

/// Text-only substitution used for object keys and multi-segment strings.
fn splice(s: &str, source: &dyn TokenSource) -> Result<String, TokenError> {
    if !s.contains("{{") {
        return Ok(s.to_string());
    }
    let mut out = String::with_capacity(s.len());
    for seg in parse_template(s).segments {
        match seg {
            Segment::Literal(l) => out.push_str(&l),
            Segment::Token(name) => {
                let v = source
                    .resolve(&name)
                    .ok_or_else(|| TokenError::Unresolved(name.clone()))?;
                match v {
                    AnyValue::String(s) => out.push_str(&s),
                    other => out.push_str(&other.to_string()),
                }
            }
        }
    }
    Ok(out)
}

/// Tokens referenced anywhere in a serializable definition.
pub fn tokens_in<T: Serialize>(item: &T) -> Result<BTreeSet<String>, TokenError> {
    let value = serde_json::to_value(item).map_err(|e| TokenError::Encode(e.to_string()))?;
    Ok(extract_tokens(&value))
}

/// Substitute tokens across a whole typed definition by walking its value tree.
pub fn substitute_in<T>(item: &T, source: &dyn TokenSource) -> Result<T, TokenError>
where
    T: Serialize + DeserializeOwned,
{
    let value = serde_json::to_value(item).map_err(|e| TokenError::Encode(e.to_string()))?;
    let replaced = substitute(&value, source)?;
    serde_json::from_value(replaced).map_err(|e| TokenError::Decode(e.to_string()))
}
