use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use ws_store::{FileWorkspaceStore, WorkspaceKey, WorkspaceStore};
use ws_workspace::{Ide, NewWorkspace, Workspace, WorkspaceIdeConfig, WorkspaceSource};

fn ws(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ws").expect("ws binary should be built");
    cmd.env("LOG_OUTPUT", "none")
        .env_remove("WS_CONTEXT")
        .env_remove("WS_HOME")
        .arg("--home")
        .arg(home);
    cmd
}

fn seed(home: &Path, context: &str, id: &str, source: WorkspaceSource) -> Workspace {
    let store = FileWorkspaceStore::with_state_dir(home);
    let key = WorkspaceKey::new(context, id);
    let workspace = Workspace::create(NewWorkspace {
        id: id.to_string(),
        context: context.to_string(),
        folder: store.workspace_dir(&key).expect("valid key"),
        source,
        provider_name: "docker".to_string(),
        ide: WorkspaceIdeConfig::new(Ide::VsCode),
        ..Default::default()
    })
    .expect("valid workspace");
    store.save(&workspace).expect("workspace should save");
    workspace
}

#[test]
fn test_list_empty_context() {
    let home = TempDir::new().unwrap();
    ws(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workspaces in context 'default'"));
}

#[test]
fn test_list_and_source() {
    let home = TempDir::new().unwrap();
    seed(
        home.path(),
        "default",
        "api",
        WorkspaceSource::git("https://example.com/api.git").with_branch("main"),
    );
    seed(home.path(), "default", "scratch", WorkspaceSource::image("ubuntu:22.04"));

    ws(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/api.git@main"))
        .stdout(predicate::str::contains("ubuntu:22.04"))
        .stdout(predicate::str::contains("vscode"));

    ws(home.path())
        .args(["source", "api"])
        .assert()
        .success()
        .stdout("https://example.com/api.git@main\n");
}

#[test]
fn test_context_flag_and_config_default() {
    let home = TempDir::new().unwrap();
    seed(home.path(), "work", "svc", WorkspaceSource::local_folder("/srv/svc"));

    ws(home.path())
        .args(["--context", "work", "source", "svc"])
        .assert()
        .success()
        .stdout("/srv/svc\n");

    ws(home.path())
        .args(["source", "svc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default/svc"));

    fs::write(home.path().join("config.yaml"), "defaultContext: work\n").unwrap();
    ws(home.path())
        .args(["source", "svc"])
        .assert()
        .success()
        .stdout("/srv/svc\n");
}

#[test]
fn test_show_json_omits_origin() {
    let home = TempDir::new().unwrap();
    seed(home.path(), "default", "demo", WorkspaceSource::image("alpine:3"));

    let output = ws(home.path())
        .args(["show", "demo", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["id"], "demo");
    assert_eq!(value["source"]["image"], "alpine:3");
    assert!(value.get("origin").is_none());
}

#[test]
fn test_validate_reports_errors() {
    let home = TempDir::new().unwrap();
    seed(home.path(), "default", "good", WorkspaceSource::image("alpine:3"));

    ws(home.path())
        .args(["validate", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    let dir = home.path().join("contexts/default/workspaces/bad");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("workspace.json"),
        r#"{ "id": "bad", "context": "default", "ide": { "ide": "emacs" },
             "source": { "image": "alpine:3", "localFolder": "/src" } }"#,
    )
    .unwrap();

    ws(home.path())
        .args(["validate", "bad"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown IDE 'emacs'"))
        .stdout(predicate::str::contains("Multiple sources configured"))
        .stderr(predicate::str::contains("2 validation error(s)"));
}

#[test]
fn test_set_ide_updates_record() {
    let home = TempDir::new().unwrap();
    seed(home.path(), "default", "demo", WorkspaceSource::image("alpine:3"));

    ws(home.path())
        .args(["set-ide", "demo", "goland", "--option", "VERSION=2024.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now uses goland"));

    let store = FileWorkspaceStore::with_state_dir(home.path());
    let workspace = store.load(&WorkspaceKey::new("default", "demo")).unwrap();
    assert_eq!(workspace.ide.ide, Some(Ide::Goland));
    assert_eq!(
        workspace.ide.options.get("VERSION").map(String::as_str),
        Some("2024.1")
    );

    ws(home.path())
        .args(["set-ide", "demo", "notepad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown IDE 'notepad'"));
}

#[test]
fn test_agent_info_and_delete() {
    let home = TempDir::new().unwrap();
    let workspace = seed(home.path(), "default", "demo", WorkspaceSource::image("alpine:3"));

    let output = ws(home.path())
        .args(["agent-info", "demo", "--remote-folder", "/remote/demo"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let encoded = String::from_utf8(output).unwrap();
    let info = ws_workspace::AgentWorkspaceInfo::decode(encoded.trim(), "/remote/demo").unwrap();
    assert_eq!(info.workspace, workspace);

    ws(home.path())
        .args(["delete", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted workspace 'demo'"));

    ws(home.path())
        .args(["show", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workspace not found: default/demo"))
        .stderr(predicate::str::contains("ws list"));
}

#[test]
fn test_delete_unreadable_record() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("contexts/default/workspaces/broken");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("workspace.json"), "{ not json").unwrap();

    ws(home.path())
        .args(["delete", "broken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted workspace 'broken'"));
    assert!(!dir.exists());

    ws(home.path())
        .args(["delete", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workspace not found: default/broken"));
}

#[test]
fn test_context_defaults_fill_unset_fields() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.yaml"),
        "contexts:\n  default:\n    defaultProvider: ssh\n    defaultIde: openvscode\n",
    )
    .unwrap();

    let dir = home.path().join("contexts/default/workspaces/bare");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("workspace.json"),
        r#"{ "id": "bare", "context": "default", "source": { "image": "alpine:3" } }"#,
    )
    .unwrap();
    seed(home.path(), "default", "demo", WorkspaceSource::image("ubuntu:22.04"));

    ws(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ssh (default)"))
        .stdout(predicate::str::contains("openvscode (default)"))
        .stdout(predicate::str::contains("docker"));

    ws(home.path())
        .args(["show", "bare"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IDE:       openvscode (default)"));
}
