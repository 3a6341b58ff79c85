use std::path::Path;

use requester_core::{plan_endpoint, Plan};

use crate::cmd::config::load_catalog;
use crate::exit_codes;
use crate::output::{print_error, OutputFormat};
use crate::OutputArgs;

pub async fn plan_cmd(path: &Path, endpoint: &str, output: OutputArgs) -> i32 {
    let catalog = match load_catalog(path, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let plan = match plan_endpoint(&catalog, endpoint) {
        Ok(p) => p,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };

    if output.quiet {
        return exit_codes::SUCCESS;
    }

    match output.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&plan) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to serialize plan as JSON: {e}");
                return exit_codes::RUNTIME_ERROR;
            }
        },
        OutputFormat::Text => print_text(&plan),
        OutputFormat::Dot => print!("{}", plan.graph.to_dot(&plan.target)),
    }
    exit_codes::SUCCESS
}

fn print_text(plan: &Plan) {
    println!("endpoint: {}", plan.target);
    println!("\nexecution order:");
    for (idx, name) in plan.graph.topo_order.iter().enumerate() {
        println!("  {}. {name}", idx + 1);
        if let Some(deps) = plan.graph.depends_on.get(name).filter(|d| !d.is_empty()) {
            println!("     after: {}", deps.join(", "));
        }
        if let Some(inputs) = plan.prompts.get(name) {
            println!("     prompts: {}", inputs.join(", "));
        }
    }
}
