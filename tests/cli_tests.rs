//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn deploy_config(root: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deploy-config"));
    cmd.env_remove("RUST_LOG");
    cmd.args(["--root", root.path().to_str().expect("utf8 root")]);
    cmd
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deploy-config"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("deploy-config"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deploy-config"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Inspect network deployment profiles"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_show_embedded_defaults() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"development\""))
        .stdout(predicate::str::contains("\"port\": 8555"))
        .stdout(predicate::str::contains("\"runs\": 200"));
}

#[test]
fn test_profile_development() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .args(["profile", "development"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host: localhost"))
        .stdout(predicate::str::contains("gas: 4500000"))
        .stdout(predicate::str::contains("endpoint: http://localhost:8555"));
}

#[test]
fn test_profile_unknown_fails() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .args(["profile", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown profile 'staging'"))
        .stderr(predicate::str::contains("development"));
}

#[test]
fn test_profile_overrides_and_json() {
    let root = TempDir::new().expect("temp root");
    let output = deploy_config(&root)
        .args(["profile", "--port", "9545", "--network-id", "1337", "--json"])
        .output()
        .expect("run profile");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("profile json");
    assert_eq!(doc["name"], "development");
    assert_eq!(doc["port"], 9545);
    assert_eq!(doc["network_id"], "1337");
    assert_eq!(doc["endpoint"], "http://localhost:9545");
}

#[test]
fn test_profile_rejects_zero_port_override() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .args(["profile", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed config"));
}

#[test]
fn test_validate_discovered_yaml() {
    let root = TempDir::new().expect("temp root");
    fs::write(
        root.path().join("deploy-config.yaml"),
        "networks:\n  ganache:\n    host: 127.0.0.1\n    port: 7545\n    network_id: 5777\n    gas: 6721975\n  development:\n    host: localhost\n    port: 8555\n    network_id: '*'\n    gas: 4500000\nsolc:\n  optimizer:\n    enabled: false\n",
    )
    .expect("write config");

    deploy_config(&root)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK: 2 profile(s)"))
        .stdout(predicate::str::contains("Profiles: development, ganache"))
        .stdout(predicate::str::contains("Optimizer: disabled"))
        .stdout(predicate::str::contains("Fingerprint: "));
}

#[test]
fn test_validate_rejects_out_of_range_port() {
    let root = TempDir::new().expect("temp root");
    let path = root.path().join("bad.toml");
    fs::write(
        &path,
        "[networks.development]\nhost = 'localhost'\nport = 70000\nnetwork_id = '*'\ngas = 4500000\n",
    )
    .expect("write config");

    deploy_config(&root)
        .args(["--config", path.to_str().expect("utf8 path"), "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("networks.development.port"));
}

#[test]
fn test_validate_missing_explicit_file() {
    let root = TempDir::new().expect("temp root");
    let path = root.path().join("missing.toml");
    deploy_config(&root)
        .args(["--config", path.to_str().expect("utf8 path"), "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed reading config file"));
}

#[test]
fn test_env_override_applies() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .env("DEPLOY_CONFIG_NETWORKS__DEVELOPMENT__HOST", "node.internal")
        .args(["profile", "development"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint: http://node.internal:8555"));
}

#[test]
fn test_show_output_reloads_to_same_fingerprint() {
    let root = TempDir::new().expect("temp root");
    let shown = deploy_config(&root).args(["show", "--format", "toml"]).output().expect("show");
    assert!(shown.status.success());

    let path = root.path().join("roundtrip.toml");
    fs::write(&path, &shown.stdout).expect("write rendered config");

    let fingerprint = |args: &[&str]| {
        let out = deploy_config(&root).args(args).output().expect("validate");
        assert!(out.status.success());
        String::from_utf8(out.stdout)
            .expect("utf8")
            .lines()
            .find_map(|l| l.strip_prefix("Fingerprint: ").map(str::to_string))
            .expect("fingerprint line")
    };
    let embedded = fingerprint(&["validate"]);
    let reloaded = fingerprint(&["--config", path.to_str().expect("utf8 path"), "validate"]);
    assert_eq!(embedded, reloaded);
}

#[test]
fn test_completions_bash() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy-config"));
}

#[test]
fn test_profile_ipv6_host_override_is_bracketed() {
    let root = TempDir::new().expect("temp root");
    deploy_config(&root)
        .args(["profile", "--host", "::1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint: http://[::1]:8555"));
}

#[test]
fn test_validate_rejects_repeated_json_profile() {
    let root = TempDir::new().expect("temp root");
    fs::write(
        root.path().join("deploy-config.json"),
        r#"{"networks":{"dev":{"host":"a","port":1,"network_id":"*","gas":1},"dev":{"host":"b","port":2,"network_id":"*","gas":1}}}"#,
    )
    .expect("write config");

    deploy_config(&root)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("networks.dev: duplicate profile name"));
}
