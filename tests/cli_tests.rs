use std::fs;
use std::process::Command;

use serde_json::json;
use swaggen::model::SchemaKind;
use swaggen::Registry;

#[test]
fn test_cli_generate_creates_swagger_tree() {
    let dir = tempfile::tempdir().unwrap();

    let mut registry = Registry::new();
    let users = registry.add_route("/users", None);
    registry.add_tag("users", users);
    registry
        .schema("UserDto", users, SchemaKind::Property)
        .field("id", "number", json!(1))
        .register();

    let snapshot = dir.path().join("registry.json");
    fs::write(&snapshot, serde_json::to_string(&registry).unwrap()).unwrap();

    let exe = env!("CARGO_BIN_EXE_swaggen");
    let status = Command::new(exe)
        .arg("generate")
        .arg("--registry")
        .arg(&snapshot)
        .arg("--out")
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(status.success());

    assert!(dir
        .path()
        .join("swagger/schema/users.swagger.schema.ts")
        .is_file());
    assert!(dir.path().join("swagger/tag/users.swagger.tag.ts").is_file());
    assert!(dir.path().join("swagger/index.swagger.ts").is_file());
}

#[test]
fn test_cli_rejects_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let exe = env!("CARGO_BIN_EXE_swaggen");
    let status = Command::new(exe)
        .arg("generate")
        .arg("--registry")
        .arg(dir.path().join("missing.json"))
        .arg("--out")
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(!status.success());
}
