use std::collections::BTreeMap;

pub type AnyValue = serde_json::Value;

/// Header and query parameter maps. Values stay untyped until the request is built so that a
/// token standing alone in a value can expand to a number or boolean.
pub type ValueMap = BTreeMap<String, AnyValue>;
