use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use requester_core::types::{AnyValue, InputSpec, InputType};
use requester_exec::{
    ChainError, CompositeEventSink, LogEventSink, Progress, RequestChain, SessionOptions,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cmd::config::{load_catalog, parse_set_inputs};
use crate::cmd::terminal::TerminalEventSink;
use crate::exit_codes;
use crate::output::print_error;
use crate::{FileArgs, OutputArgs};

type StdinLines = Lines<BufReader<Stdin>>;

pub async fn run_cmd(
    path: &Path,
    endpoint: Option<&str>,
    set_inputs: &[String],
    files: FileArgs,
    output: OutputArgs,
) -> i32 {
    let catalog = match load_catalog(path, &output) {
        Ok(c) => Arc::new(c),
        Err(code) => return code,
    };
    let set_values = parse_set_inputs(set_inputs);

    let mut sinks = CompositeEventSink::new();
    sinks.add(Box::new(LogEventSink));
    sinks.add(Box::new(TerminalEventSink::new(
        output.format,
        output.quiet,
        files.out_dir.clone(),
    )));

    let options = SessionOptions {
        temp_root: files.temp_dir.clone(),
        ..SessionOptions::from_catalog(&catalog)
    };
    let mut chain = match RequestChain::with_reqwest(catalog, Arc::new(sinks), options) {
        Ok(chain) => chain,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    match endpoint {
        Some(name) => {
            let progress = chain.init_request(Some(name)).await;
            match drive(&mut chain, progress, &set_values, &mut stdin, &output).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(code) => code,
            }
        }
        None => select_loop(&mut chain, &set_values, &mut stdin, &output).await,
    }
}

/// Pick endpoints from the visible list until stdin closes.
async fn select_loop(
    chain: &mut RequestChain,
    set_values: &BTreeMap<String, String>,
    stdin: &mut StdinLines,
    output: &OutputArgs,
) -> i32 {
    loop {
        let names: Vec<String> = chain
            .list_visible_endpoints()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        if names.is_empty() {
            print_error(output.format, output.quiet, "no visible endpoints");
            return exit_codes::SUCCESS;
        }

        if !output.quiet {
            eprintln!("\nEndpoints:");
            for (idx, name) in names.iter().enumerate() {
                eprintln!("  {}) {name}", idx + 1);
            }
            eprint!("select endpoint: ");
        }

        let line = match stdin.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return exit_codes::SUCCESS,
            Err(e) => {
                print_error(output.format, output.quiet, &format!("failed to read input: {e}"));
                return exit_codes::RUNTIME_ERROR;
            }
        };
        let choice = line.trim();
        if choice.is_empty() {
            continue;
        }
        let Some(name) = pick(&names, choice) else {
            print_error(
                output.format,
                output.quiet,
                &format!("unknown endpoint: {choice}"),
            );
            continue;
        };

        let progress = chain.init_request(Some(&name)).await;
        // Failures were already reported through the sink; go back to the list.
        let _ = drive(chain, progress, set_values, stdin, output).await;
    }
}

/// Feed prompts until the chain completes. Chain errors are reported by the event sink.
async fn drive(
    chain: &mut RequestChain,
    mut progress: Result<Progress, ChainError>,
    set_values: &BTreeMap<String, String>,
    stdin: &mut StdinLines,
    output: &OutputArgs,
) -> Result<(), i32> {
    loop {
        let prompt = match progress {
            Ok(Progress::Completed(_)) => return Ok(()),
            Ok(Progress::AwaitingInput(prompt)) => prompt,
            Err(_) => return Err(exit_codes::RUN_FAILED),
        };

        let interactive = prompt
            .inputs
            .iter()
            .any(|i| !set_values.contains_key(&i.name));
        if interactive && !output.quiet {
            eprintln!("{}:", prompt.endpoint);
        }

        for input in &prompt.inputs {
            match read_input(input, set_values, stdin).await {
                Ok(value) => chain.set_input_value(input, value),
                Err(message) => {
                    print_error(output.format, output.quiet, &message);
                    chain.reset();
                    return Err(exit_codes::RUN_FAILED);
                }
            }
        }
        progress = chain.continue_request().await;
    }
}

async fn read_input(
    input: &InputSpec,
    set_values: &BTreeMap<String, String>,
    stdin: &mut StdinLines,
) -> Result<AnyValue, String> {
    let raw = match set_values.get(&input.name) {
        Some(v) => v.clone(),
        None => {
            eprint!("{}", prompt_text(input));
            match stdin.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    return Err(format!(
                        "input closed before a value for '{}' was given",
                        input.name
                    ))
                }
                Err(e) => return Err(format!("failed to read input: {e}")),
            }
        }
    };
    input_value(input, &raw).await
}

fn prompt_text(input: &InputSpec) -> String {
    let mut text = format!("  {}", input.label);
    match input.kind {
        InputType::Dropdown => {
            let items: Vec<String> = input
                .item_names()
                .iter()
                .enumerate()
                .map(|(idx, name)| format!("{}) {name}", idx + 1))
                .collect();
            text.push_str(&format!(" [{}]", items.join(", ")));
        }
        InputType::Toggle => text.push_str(" [y/n]"),
        InputType::Molecule => {
            let format = input.format.map(|f| f.as_str()).unwrap_or("structure");
            text.push_str(&format!(" (path to {format} file)"));
        }
        InputType::Text | InputType::Number | InputType::Password => {}
    }
    if let Some(placeholder) = &input.placeholder {
        text.push_str(&format!(" ({placeholder})"));
    }
    text.push_str(": ");
    text
}

/// Turn raw text into the value stored for an input. Molecule inputs name a file to read.
async fn input_value(input: &InputSpec, raw: &str) -> Result<AnyValue, String> {
    match input.kind {
        InputType::Dropdown => choose_item(input, raw.trim()),
        InputType::Molecule => {
            let path = raw.trim();
            tokio::fs::read_to_string(path)
                .await
                .map(AnyValue::String)
                .map_err(|e| format!("failed to read {path}: {e}"))
        }
        _ => Ok(input.coerce(raw)),
    }
}

/// Match a dropdown entry by its display name, then by 1-based position.
fn choose_item(input: &InputSpec, raw: &str) -> Result<AnyValue, String> {
    let Some(AnyValue::Array(items)) = &input.items else {
        return Ok(AnyValue::String(raw.to_string()));
    };
    let names = input.item_names();
    if let Some(pos) = names.iter().position(|n| n == raw) {
        return Ok(items[pos].clone());
    }
    match raw.parse::<usize>() {
        Ok(n) if (1..=items.len()).contains(&n) => Ok(items[n - 1].clone()),
        _ => Err(format!("'{raw}' is not one of: {}", names.join(", "))),
    }
}

fn pick(names: &[String], choice: &str) -> Option<String> {
    if let Some(name) = names.iter().find(|n| n.as_str() == choice) {
        return Some(name.clone());
    }
    let idx = choice.parse::<usize>().ok()?;
    names.get(idx.checked_sub(1)?).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dropdown(items: AnyValue) -> InputSpec {
        serde_json::from_value(json!({
            "name": "project",
            "type": "dropdown",
            "label": "Project",
            "items": items,
        }))
        .unwrap()
    }

    #[test]
    fn dropdown_matches_names_before_positions() {
        let input = dropdown(json!([7, 1, "x"]));
        assert_eq!(choose_item(&input, "1").unwrap(), json!(1));
        assert_eq!(choose_item(&input, "3").unwrap(), json!("x"));
        assert_eq!(choose_item(&input, "x").unwrap(), json!("x"));
        assert!(choose_item(&input, "9").is_err());
    }

    #[test]
    fn endpoints_are_picked_by_name_or_number() {
        let names = vec!["login".to_string(), "fetch".to_string()];
        assert_eq!(pick(&names, "fetch").as_deref(), Some("fetch"));
        assert_eq!(pick(&names, "1").as_deref(), Some("login"));
        assert_eq!(pick(&names, "0"), None);
        assert_eq!(pick(&names, "nope"), None);
    }

    #[test]
    fn prompt_lists_dropdown_choices() {
        let input = dropdown(json!(["a", "b"]));
        assert_eq!(prompt_text(&input), "  Project [1) a, 2) b]: ");
    }

    #[tokio::test]
    async fn molecule_inputs_read_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ligand.sdf");
        std::fs::write(&file, "CCO\n$$$$\n").unwrap();
        let input: InputSpec = serde_json::from_value(json!({
            "name": "ligand",
            "type": "molecule",
            "label": "Ligand",
            "format": "sdf",
        }))
        .unwrap();

        let value = input_value(&input, file.to_str().unwrap()).await.unwrap();
        assert_eq!(value, json!("CCO\n$$$$\n"));
        assert!(input_value(&input, "/no/such/file.sdf").await.is_err());
    }
}
