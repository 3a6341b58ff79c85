use assert_cmd::Command;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    std::io::Write::write_all(&mut f, contents.as_bytes()).expect("write");
    f
}

fn requester() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("requester"))
}

const CONFIG: &str = r#"
timeout: 5
endpoints:
  - name: login
    url: https://api.invalid/login
    method: POST
    response: json
    hidden: true
    outputs:
      - name: token
        type: str
        path: access_token
        cache: true
  - name: fetch
    url: https://api.invalid/items
    method: GET
    response: json
    headers:
      Authorization: "Bearer {{token}}"
    outputs:
      - name: first
        type: str
        path: "items[0].name"
  - name: orphan
    url: "https://api.invalid/things/{{missing}}"
    method: GET
    response: json
"#;

#[test]
fn validate_command_returns_0_for_valid_config() {
    let f = write_temp(CONFIG);

    let out = requester()
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("3 endpoints"), "{stdout}");
}

#[test]
fn validate_command_returns_2_for_invalid_config() {
    let doc = r#"
endpoints:
  - name: pick
    url: https://api.invalid/pick
    method: GET
    response: json
    inputs:
      - name: choice
        type: dropdown
        label: Choice
"#;
    let f = write_temp(doc);

    let out = requester()
        .args([
            "validate",
            f.path().to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .assert()
        .code(2); // VALIDATION_FAILED
    let report: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert!(report["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("$.endpoints[0].inputs[0].items"));
}

#[test]
fn validate_command_rejects_unparseable_input() {
    let f = write_temp("endpoints: [\n  - {name: ");

    requester()
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .code(2);
}

#[test]
fn missing_config_is_a_runtime_error() {
    requester()
        .args(["endpoints", "/definitely/not/here.yaml"])
        .assert()
        .code(4); // RUNTIME_ERROR
}

#[test]
fn endpoints_command_hides_hidden_endpoints() {
    let f = write_temp(CONFIG);

    let out = requester()
        .args([
            "endpoints",
            f.path().to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .assert()
        .success();
    let listed: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    let names: Vec<&str> = listed["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["fetch", "orphan"]);

    let out = requester()
        .args(["endpoints", f.path().to_string_lossy().as_ref(), "--all"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("login (hidden)"), "{stdout}");
}

#[test]
fn plan_command_outputs_json() {
    let f = write_temp(CONFIG);

    let out = requester()
        .args([
            "plan",
            f.path().to_string_lossy().as_ref(),
            "fetch",
            "--format",
            "json",
        ])
        .assert()
        .success();
    let plan: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(plan["graph"]["topo_order"], serde_json::json!(["login", "fetch"]));
}

#[test]
fn plan_command_renders_dot() {
    let f = write_temp(CONFIG);

    let out = requester()
        .args([
            "plan",
            f.path().to_string_lossy().as_ref(),
            "fetch",
            "--format",
            "dot",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.starts_with("digraph requester {"), "{stdout}");
    assert!(stdout.contains("\"login\" -> \"fetch\""), "{stdout}");
}

#[test]
fn plan_command_reports_missing_producers() {
    let f = write_temp(CONFIG);

    requester()
        .args(["plan", f.path().to_string_lossy().as_ref(), "orphan"])
        .assert()
        .code(2);
}

#[test]
fn run_fails_before_any_request_when_a_token_has_no_producer() {
    let f = write_temp(CONFIG);

    let out = requester()
        .args(["run", f.path().to_string_lossy().as_ref(), "orphan"])
        .write_stdin("")
        .assert()
        .code(3); // RUN_FAILED
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).to_string();
    assert!(
        stderr.contains("endpoint for token not found: missing"),
        "{stderr}"
    );
}

#[test]
fn run_without_endpoint_exits_cleanly_on_eof() {
    let f = write_temp(CONFIG);

    requester()
        .args(["run", f.path().to_string_lossy().as_ref(), "--quiet"])
        .write_stdin("")
        .assert()
        .success();
}
