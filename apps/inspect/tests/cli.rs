use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

const MANIFEST: &str = r#"{
  "name": "User",
  "base": "PersistedModel",
  "relations": {
    "orders": {"type": "hasMany", "model": "Order"},
    "tags": {"type": "hasAndBelongsToMany", "model": "Tag"}
  }
}"#;

const ENDPOINTS: &str = r#"[
  {"name": "login", "verb": "POST", "path": "/login", "handler": "login",
   "acls": {"principalId": "$everyone", "permission": "ALLOW"}},
  {"name": "avatar", "isStatic": false, "handler": "avatar", "before": "guard"}
]"#;

const OPTIONS: &str = r#"{
  "whitelist": {"base": ["find"], "relations": ["orders"]},
  "blacklist": ["User.login"]
}"#;

fn workspace() -> TempDir {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("user.json"), MANIFEST).expect("manifest");
    fs::write(dir.path().join("user.endpoints.json"), ENDPOINTS).expect("endpoints");
    fs::write(dir.path().join("options.json"), OPTIONS).expect("options");
    dir
}

fn inspect(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("portico-inspect").expect("binary");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn prints_applied_configuration() {
    let dir = workspace();
    let output = inspect(dir.path())
        .args(["--manifest", "user.json", "--options", "options.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(json["model"], "User");
    assert_eq!(json["descriptors"][0]["name"], "endpoint:login");
    assert_eq!(json["descriptors"][0]["remoteMethod"]["http"]["verb"], "post");
    assert_eq!(json["descriptors"][1]["name"], "prototype.endpoint:avatar");
    assert_eq!(json["descriptors"][1]["hooks"], serde_json::json!([{"kind": "before", "handler": "guard"}]));
    assert_eq!(json["descriptors"][0]["remoteMethod"]["returns"], serde_json::json!({"root": true, "type": "object"}));
    assert_eq!(json["suppression"][0], serde_json::json!({"name": "User.login", "origin": "blacklist"}));
    assert_eq!(json["report"]["unknown"], serde_json::json!(["User.login"]));

    let exposed: Vec<&str> = json["exposed"].as_array().expect("exposed").iter().filter_map(|v| v.as_str()).collect();
    assert!(exposed.contains(&"find"));
    assert!(exposed.contains(&"prototype.__get__orders"));
    assert!(!exposed.contains(&"prototype.__get__tags"));
    assert!(!exposed.contains(&"create"));
}

#[test]
fn strict_mode_rejects_unknown_suppressed_names() {
    let dir = workspace();
    inspect(dir.path())
        .args(["--manifest", "user.json", "--options", "options.json", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User.login"));
}

#[test]
fn explicit_definitions_file_is_used() {
    let dir = workspace();
    fs::write(dir.path().join("other.json"), r#"[{"name": "ping", "handler": "ping"}]"#).expect("other");

    inspect(dir.path())
        .args(["--manifest", "user.json", "--definitions", "other.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint:ping"))
        .stdout(predicate::str::contains("endpoint:login").not());
}

#[test]
fn config_file_supplies_model_options() {
    let dir = workspace();
    let models = dir.path().display().to_string().replace('\\', "/");
    fs::write(
        dir.path().join("portico.toml"),
        format!("definitions_dir = \"{models}\"\n\n[models.User.whitelist]\nbase = [\"count\"]\n"),
    )
    .expect("config");

    let output = inspect(dir.path())
        .args(["--manifest", "user.json", "--config", "portico.toml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    let exposed = json["exposed"].as_array().expect("exposed");
    assert!(exposed.contains(&serde_json::json!("count")));
    assert!(!exposed.contains(&serde_json::json!("find")));
}

#[test]
fn missing_handler_fails() {
    let dir = workspace();
    fs::write(dir.path().join("user.endpoints.json"), r#"[{"name": "orphan"}]"#).expect("endpoints");

    inspect(dir.path())
        .args(["--manifest", "user.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("orphan"));
}

#[test]
fn missing_manifest_argument_is_a_usage_error() {
    let dir = workspace();
    inspect(dir.path()).assert().failure().stderr(predicate::str::contains("--manifest"));
}
