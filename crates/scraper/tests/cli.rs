//! CLI tests for `meshcore-cli-parse`, run offline against local fixtures.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use assert_cmd::cargo;

fn parse_cmd() -> Command {
    Command::new(cargo::cargo_bin!("meshcore-cli-parse"))
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../registry/tests/fixtures")
        .join(name);
    path.to_string_lossy().to_string()
}

#[test]
fn help_lists_output_and_typescript_flags() {
    let output = parse_cmd().arg("--help").output().expect("run help");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let flags = ["--output", "-o", "--typescript", "-t", "--cpp-file"];
    for flag in flags.into_iter().chain(["--lookahead", "--struct-name"]) {
        assert!(stdout.contains(flag), "missing {flag} in help: {stdout}");
    }
}

#[test]
fn writes_json_and_typescript_from_local_sources() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("registry.json");

    let output = parse_cmd()
        .args(["--cpp-file", &fixture("CommonCLI.cpp")])
        .args(["--header-file", &fixture("CommonCLI.h")])
        .args(["-o", &out.to_string_lossy(), "-t"])
        .env("RUST_LOG", "off")
        .env_remove("MESHCORE_CPP_URL")
        .output()
        .expect("run parser");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Command Summary:\n"), "stdout={stdout}");
    assert!(stdout.contains("  get: 4 commands\n"), "stdout={stdout}");
    let system = "  system: 10 commands\n";
    assert!(stdout.contains(system), "stdout={stdout}");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("valid json");
    assert_eq!(json["total_commands"], 30);
    assert_eq!(json["generated_by"], "meshcore-cli-parse");
    assert_eq!(
        json["source_url"],
        "https://raw.githubusercontent.com/meshcore-dev/MeshCore/main/src/helpers/CommonCLI.cpp"
    );
    assert_eq!(json["categories"][0], "get");
    assert_eq!(json["node_prefs"]["node_name"]["type"], "char");
    let version = json["version"].as_str().expect("version string");
    assert_eq!(version.len(), 10, "unexpected version {version}");

    let ts = fs::read_to_string(dir.path().join("registry.ts")).expect("read ts");
    let categories = "export const MESHCORE_CATEGORIES = [\"get\", \"gps\"";
    assert!(ts.contains(categories));
    assert!(ts.contains("serialOnly: true,"));
}

#[test]
fn missing_local_source_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("registry.json");
    let output = parse_cmd()
        .args(["--cpp-file", "does-not-exist.cpp"])
        .args(["--header-file", &fixture("CommonCLI.h")])
        .args(["--output", &out.to_string_lossy()])
        .output()
        .expect("run parser");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.cpp"));
    assert!(!out.exists());
}
