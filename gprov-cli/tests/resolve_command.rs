//! Tests for the `resolve` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_resolve_from_settings_file() {
    let env = TestEnv::new();
    let key = env.write_key("key.json", None);
    env.write_settings(&format!(
        "credentials: {}\nproject: settings-project\nregion: us-central1\n",
        key.display()
    ));

    let output = env
        .command()
        .args(["resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["project"], "settings-project");
    assert_eq!(config["region"], "us-central1");
    assert_eq!(config["auth"]["kind"], "credentials");
    assert_eq!(config["universe_domain"], "");
    assert_eq!(
        config["endpoints"]["compute"],
        "https://compute.googleapis.com/compute/v1/"
    );
}

#[test]
fn test_resolve_environment_fills_unset_fields() {
    let env = TestEnv::new();
    env.write_settings("project: from-file\n");

    let output = env
        .command()
        .args(["resolve", "--format", "yaml"])
        .env("GOOGLE_PROJECT", "from-env")
        .env("GOOGLE_ZONE", "europe-west1-b")
        .env("GOOGLE_APPLICATION_CREDENTIALS", env.write_key("adc.json", None))
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(config["project"].as_str(), Some("from-file"));
    assert_eq!(config["zone"].as_str(), Some("europe-west1-b"));
}

#[test]
fn test_resolve_universe_domain() {
    let env = TestEnv::new();
    let key = env.write_key("key.json", Some("example.com"));
    env.write_settings(&format!(
        "credentials: {}\nuniverse_domain: example.com\n",
        key.display()
    ));

    let output = env
        .command()
        .args(["resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["universe_domain"], "example.com");
    assert_eq!(
        config["endpoints"]["compute"],
        "https://compute.example.com/compute/v1/"
    );
}

#[test]
fn test_resolve_universe_mismatch_fails() {
    let env = TestEnv::new();
    let key = env.write_key("key.json", None);
    env.write_settings(&format!(
        "credentials: {}\nuniverse_domain: example.com\n",
        key.display()
    ));

    env.command()
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("example.com"));
}

#[test]
fn test_resolve_invalid_settings_fails() {
    let env = TestEnv::new();
    env.write_settings("credentials: '{}'\naccess_token: tok\n");

    env.command()
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("access_token"));
}

#[test]
fn test_resolve_text_never_prints_token() {
    let env = TestEnv::new();
    env.write_settings("access_token: super-secret-token\nproject: p\n");

    env.command()
        .args(["resolve", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auth:            access_token"))
        .stdout(predicate::str::contains("super-secret-token").not());
}
