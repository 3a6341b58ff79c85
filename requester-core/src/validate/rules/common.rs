use std::collections::HashSet;

use crate::validate::validator::Validator;

/// Flag every name that repeats within one list.
pub(crate) fn validate_unique_names<'a>(
    v: &mut Validator,
    path: &str,
    field: &str,
    names: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::<&str>::new();
    for (idx, name) in names.enumerate() {
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            v.push(format!("{path}[{idx}].{field}"), "must be unique");
        }
    }
}
