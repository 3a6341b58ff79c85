use std::path::Path;

use serde::Serialize;

use crate::cmd::config::load_catalog;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct EndpointInfo {
    name: String,
    method: String,
    url: String,
    response: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    inputs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    outputs: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    hidden: bool,
}

#[derive(Serialize)]
struct EndpointsResult {
    endpoints: Vec<EndpointInfo>,
}

pub async fn endpoints_cmd(path: &Path, all: bool, output: OutputArgs) -> i32 {
    let catalog = match load_catalog(path, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let endpoints: Vec<EndpointInfo> = catalog
        .endpoints()
        .iter()
        .filter(|e| all || !e.hidden)
        .map(|e| EndpointInfo {
            name: e.name.clone(),
            method: e.method.to_ascii_uppercase(),
            url: e.url.clone(),
            response: e.response.to_string(),
            inputs: e.input_names().map(str::to_string).collect(),
            outputs: e.outputs.iter().map(|o| o.name.clone()).collect(),
            hidden: e.hidden,
        })
        .collect();

    let result = EndpointsResult { endpoints };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Endpoints in {}:", path.display());
        for e in &result.endpoints {
            let hidden = if e.hidden { " (hidden)" } else { "" };
            println!("  - {}{hidden}: {} {} -> {}", e.name, e.method, e.url, e.response);
            if !e.inputs.is_empty() {
                println!("    inputs: {}", e.inputs.join(", "));
            }
            if !e.outputs.is_empty() {
                println!("    outputs: {}", e.outputs.join(", "));
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
