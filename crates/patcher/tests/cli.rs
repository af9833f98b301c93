//! CLI tests for `mesh-cli-patch`.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

const ORIGINAL: &str = include_str!("fixtures/mesh_cli.py");
const PATCHED: &str = include_str!("fixtures/mesh_cli.patched.py");

fn patch_cmd() -> Command {
    Command::new(cargo::cargo_bin!("mesh-cli-patch"))
}

fn write_temp_target(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mesh_cli.py");
    fs::write(&path, content).expect("write temp target");
    (dir, path.to_string_lossy().to_string())
}

#[test]
fn patches_then_reports_no_changes() {
    let (_dir, path) = write_temp_target(ORIGINAL);

    let first = patch_cmd().arg(&path).output().expect("run patcher");
    assert!(first.status.success());
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert_eq!(
        stdout,
        format!(
            "✓ Patched {path}\n  Applied: imports, tempradio_state, reboot, clear_stats, \
             neighbor_remove, tempradio, stats_routing, board_routing, stats_methods\n"
        )
    );
    assert_eq!(fs::read_to_string(&path).expect("read patched"), PATCHED);

    let second = patch_cmd().arg(&path).output().expect("run patcher again");
    assert!(second.status.success());
    assert_eq!(
        String::from_utf8_lossy(&second.stdout),
        format!("○ No changes needed for {path}\n")
    );
    assert_eq!(fs::read_to_string(&path).expect("read again"), PATCHED);
}

#[test]
fn missing_target_exits_1() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope.py");
    let output = patch_cmd().arg(&path).output().expect("run patcher");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("Error: {} not found\n", path.display())
    );
}

#[test]
fn check_mode_does_not_write() {
    let (_dir, path) = write_temp_target(ORIGINAL);
    let output = patch_cmd()
        .args(["--check", &path])
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pending: imports,"));
    assert_eq!(fs::read_to_string(&path).expect("read"), ORIGINAL);

    let (_dir, path) = write_temp_target(PATCHED);
    let output = patch_cmd()
        .args(["--check", &path])
        .output()
        .expect("run check");
    assert!(output.status.success());
}

#[test]
fn missing_argument_is_a_usage_error() {
    let output = patch_cmd().output().expect("run patcher");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}
