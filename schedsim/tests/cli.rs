//! End-to-end CLI tests: exit codes and the JSON report format, driving
//! the built binary directly since `schedsim` ships no library surface.

use std::io::Write;
use std::process::Command;

fn schedsim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schedsim"))
}

fn write_workload(contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("schedsim-test-{}.workload", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn exits_zero_on_a_clean_run() {
    let path = write_workload("1 1 2\n0 2 1\n0 1\n10");
    let status = schedsim().arg(&path).status().unwrap();
    assert!(status.success());
    let _ = std::fs::remove_file(path);
}

#[test]
fn exits_one_on_missing_file() {
    let status = schedsim().arg("/nonexistent/workload.txt").status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn json_format_parses_and_matches_scenario_s1() {
    let path = write_workload("1 1 2\n0 2 1\n0 1\n10");
    let output = schedsim().arg(&path).arg("--format").arg("json").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["stats"]["total_time"], 12);
    assert_eq!(value["stats"]["service_time"], 10);
    assert_eq!(value["stats"]["dispatch_time"], 2);

    let _ = std::fs::remove_file(path);
}

#[test]
fn accepts_every_policy_flag() {
    let path = write_workload("1 2 1\n0 3 1\n0 2\n10\n5\n4");
    for policy in ["fcfs", "rr", "priority", "mlfq"] {
        let status = schedsim().arg(&path).arg("--policy").arg(policy).status().unwrap();
        assert!(status.success(), "policy {policy} should exit cleanly");
    }
    let _ = std::fs::remove_file(path);
}
