use std::collections::BTreeMap;
use std::path::Path;

use requester_core::{ConfigError, EndpointCatalog};

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// Load and validate a catalog, reporting failures. The error is the exit code to use.
pub fn load_catalog(path: &Path, output: &OutputArgs) -> Result<EndpointCatalog, i32> {
    match EndpointCatalog::from_path(path) {
        Ok(catalog) => Ok(catalog),
        Err(ConfigError::Io { path, source }) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {path}: {source}"),
            );
            Err(exit_codes::RUNTIME_ERROR)
        }
        Err(ConfigError::Parse(e)) => {
            print_error(output.format, output.quiet, &e.to_string());
            Err(exit_codes::VALIDATION_FAILED)
        }
        Err(ConfigError::Validation(err)) => {
            print_error(output.format, output.quiet, &err.to_string());
            if !output.quiet {
                for v in &err.violations {
                    eprintln!("- {}: {}", v.path, v.message);
                }
            }
            Err(exit_codes::VALIDATION_FAILED)
        }
    }
}

/// `NAME=VALUE` pairs from `--set`; later entries win.
pub fn parse_set_inputs(set_inputs: &[String]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for s in set_inputs {
        match s.split_once('=') {
            Some((k, v)) => {
                map.insert(k.trim().to_string(), v.to_string());
            }
            None => tracing::warn!(value = %s, "ignoring --set without '='"),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_inputs_split_on_first_equals() {
        let map = parse_set_inputs(&[
            "query=a=b".to_string(),
            "limit=5".to_string(),
            "broken".to_string(),
            "limit=6".to_string(),
        ]);
        assert_eq!(map.get("query").map(String::as_str), Some("a=b"));
        assert_eq!(map.get("limit").map(String::as_str), Some("6"));
        assert_eq!(map.len(), 2);
    }
}
