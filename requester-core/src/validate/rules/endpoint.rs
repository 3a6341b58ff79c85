use std::collections::HashSet;

use crate::types::{output_file_name, Endpoint, ResponseKind};
use crate::validate::rules::{common::validate_unique_names, inputs, outputs};
use crate::validate::validator::{Validator, METHOD_RE};

pub(crate) fn validate_endpoint(v: &mut Validator, ep: &Endpoint, path: &str) {
    v.require_non_empty(format!("{path}.name"), &ep.name);
    v.require_non_empty(format!("{path}.url"), &ep.url);

    if ep.method.trim().is_empty() {
        v.push(format!("{path}.method"), "must not be empty");
    } else if !ep.method.contains("{{") && !METHOD_RE.is_match(&ep.method) {
        v.push(format!("{path}.method"), "must be an HTTP method name");
    }

    if ep.body_count() > 1 {
        v.push(path, "at most one of files, data, json may be provided");
    }

    validate_unique_names(
        v,
        &format!("{path}.inputs"),
        "name",
        ep.inputs.iter().map(|i| i.name.as_str()),
    );
    for (idx, input) in ep.inputs.iter().enumerate() {
        inputs::validate_input(v, input, &format!("{path}.inputs[{idx}]"));
    }

    validate_unique_names(
        v,
        &format!("{path}.outputs"),
        "name",
        ep.outputs.iter().map(|o| o.name.as_str()),
    );
    for (idx, output) in ep.outputs.iter().enumerate() {
        outputs::validate_output(v, output, ep.response, &format!("{path}.outputs[{idx}]"));
    }

    if ep.response == ResponseKind::File {
        let mut seen = HashSet::new();
        for (idx, output) in ep.outputs.iter().enumerate() {
            if !output.name.is_empty() && !seen.insert(output_file_name(&output.name)) {
                v.push(
                    format!("{path}.outputs[{idx}].name"),
                    "file name collides with another output",
                );
            }
        }
    }
}
