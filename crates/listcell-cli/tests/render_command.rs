use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const TITLE_REQUEST: &str = r#"{
    "value": "Quarterly plan",
    "field": {"id": "f1", "internalName": "LinkTitle", "type": "Computed"},
    "row": {"ID": "12"},
    "page": {"webUrl": "https://contoso.example/sites/team", "listId": "{L}", "listTitle": "Tasks"}
}"#;

#[allow(deprecated)]
fn listcell(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("listcell").unwrap();
    cmd.env("LISTCELL_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_from_stdin() {
    let dir = TempDir::new().unwrap();
    let output = listcell(&dir)
        .args(["render", "--compact"])
        .write_stdin(TITLE_REQUEST)
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["content"]["renderer"], "title");
    assert_eq!(payload["content"]["isLink"], true);
    assert_eq!(payload["content"]["itemId"], "12");
}

#[test]
fn test_render_uses_inline_properties() {
    let dir = TempDir::new().unwrap();
    let request_path = dir.path().join("note.json");
    std::fs::write(
        &request_path,
        r#"{
            "value": "<b>Hello</b>",
            "field": {"id": "f2", "internalName": "Body", "type": "Note"},
            "page": {"webUrl": "https://contoso.example", "listId": "{L}", "listTitle": "Tasks"},
            "properties": {"RichText": true}
        }"#,
    )
    .unwrap();

    let output = listcell(&dir)
        .arg("render")
        .arg(&request_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["content"]["text"], "<b>Hello</b>");
}

#[test]
fn test_text_command() {
    let dir = TempDir::new().unwrap();
    listcell(&dir)
        .arg("text")
        .write_stdin(
            r#"{
                "value": [{"id": "1", "title": "Ada"}, {"id": "2", "title": "Grace"}],
                "field": {"id": "f3", "internalName": "Team", "type": "UserMulti"},
                "page": {"webUrl": "https://contoso.example", "listId": "{L}", "listTitle": "Tasks"}
            }"#,
        )
        .assert()
        .success()
        .stdout("Ada\nGrace\n");
}

#[test]
fn test_stored_name_command() {
    let dir = TempDir::new().unwrap();
    let output = listcell(&dir)
        .args(["stored-name", "LinkFilenameNoMenu"])
        .output()
        .unwrap();
    insta::assert_snapshot!(String::from_utf8(output.stdout).unwrap(), @"FileLeafRef");
}

#[test]
fn test_malformed_request_fails() {
    let dir = TempDir::new().unwrap();
    listcell(&dir)
        .arg("render")
        .write_stdin("{\"field\": 3}")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Invalid input"));
}

#[test]
fn test_session_dir_caches_survive_the_run() {
    let dir = TempDir::new().unwrap();
    let session_dir = dir.path().join("session");
    std::fs::write(
        dir.path().join("config.toml"),
        format!("session_dir = {:?}\n", session_dir.display().to_string()),
    )
    .unwrap();

    listcell(&dir)
        .args(["render", "--compact"])
        .write_stdin(
            r#"{
                "value": "<b>Hello</b>",
                "field": {"id": "f2", "internalName": "Body", "type": "Note"},
                "page": {"webUrl": "https://contoso.example", "listId": "{L}", "listTitle": "Tasks"},
                "properties": {"RichText": true}
            }"#,
        )
        .assert()
        .success();

    let cache = std::fs::read_to_string(session_dir.join("listcell.loadedViewFields.json")).unwrap();
    assert!(cache.contains("RichText"));
}
