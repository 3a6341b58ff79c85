use regex::Regex;

use crate::path::OutputPath;
use crate::types::{OutputSpec, ResponseKind};
use crate::validate::validator::Validator;

pub(crate) fn validate_output(
    v: &mut Validator,
    output: &OutputSpec,
    response: ResponseKind,
    path: &str,
) {
    v.require_non_empty(format!("{path}.name"), &output.name);

    match response {
        ResponseKind::Json => {
            if output.regex.is_some() {
                v.push(format!("{path}.regex"), "not allowed for json responses");
            }
            match &output.path {
                None => v.push(format!("{path}.path"), "required for json responses"),
                Some(p) if !p.contains("{{") => {
                    if let Err(e) = OutputPath::parse(p) {
                        v.push(format!("{path}.path"), format!("invalid path: {e}"));
                    }
                }
                Some(_) => {}
            }
        }
        ResponseKind::Text => {
            if output.path.is_some() {
                v.push(format!("{path}.path"), "not allowed for text responses");
            }
            match &output.regex {
                None => v.push(format!("{path}.regex"), "required for text responses"),
                Some(r) => validate_regex(v, r, &format!("{path}.regex")),
            }
        }
        ResponseKind::File => {
            if output.path.is_some() {
                v.push(format!("{path}.path"), "not allowed for file responses");
            }
            if output.regex.is_some() {
                v.push(format!("{path}.regex"), "not allowed for file responses");
            }
        }
    }
}

fn validate_regex(v: &mut Validator, pattern: &str, path: &str) {
    match Regex::new(pattern) {
        Ok(re) if re.captures_len() < 2 => {
            v.push(path, "must contain a capture group");
        }
        Ok(_) => {}
        Err(e) => v.push(path, format!("invalid regex: {e}")),
    }
}
