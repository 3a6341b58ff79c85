use crate::tokens::parse_template;
use crate::types::{AnyValue, InputSpec, InputType};
use crate::validate::validator::Validator;

pub(crate) fn validate_input(v: &mut Validator, input: &InputSpec, path: &str) {
    v.require_non_empty(format!("{path}.name"), &input.name);
    v.require_non_empty(format!("{path}.label"), &input.label);

    match input.kind {
        InputType::Dropdown => validate_items(v, input.items.as_ref(), &format!("{path}.items")),
        InputType::Molecule => {
            if input.format.is_none() {
                v.push(
                    format!("{path}.format"),
                    "molecule inputs require a format (pdb, sdf, mmcif, smiles)",
                );
            }
        }
        InputType::Toggle => {
            if let Some(values) = &input.values {
                for key in values.keys() {
                    if key != "true" && key != "false" {
                        v.push(
                            format!("{path}.values.{key}"),
                            "toggle values must be keyed by \"true\" or \"false\"",
                        );
                    }
                }
            }
        }
        InputType::Text | InputType::Number | InputType::Password => {}
    }
}

fn validate_items(v: &mut Validator, items: Option<&AnyValue>, path: &str) {
    match items {
        Some(AnyValue::Array(list)) if !list.is_empty() => {}
        // A token expanding to a list output at prompt time.
        Some(AnyValue::String(s)) if parse_template(s).sole_token().is_some() => {}
        Some(AnyValue::Array(_)) | None => {
            v.push(path, "dropdown inputs require a non-empty items list");
        }
        Some(_) => v.push(path, "must be a list or a {{token}} naming a list output"),
    }
}
