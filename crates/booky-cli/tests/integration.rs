#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn booky(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("booky").unwrap();
    cmd.current_dir(dir.path())
        .env("BOOKY_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn init_workspace(dir: &TempDir) {
    booky(dir)
        .args(["init", "--sender", "Sam Lee"])
        .assert()
        .success();
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

// ---------------------------------------------------------------------------
// booky init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_workspace_files() {
    let dir = TempDir::new().unwrap();
    booky(&dir).arg("init").assert().success();

    assert!(dir.path().join(".booky").is_dir());
    assert!(dir.path().join(".booky/config.yaml").exists());
    assert!(dir.path().join(".booky/fixtures.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    booky(&dir).arg("init").assert().success();
    booky(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .booky/config.yaml"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    booky(&dir)
        .args(["nav", "cadences"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// booky nav / screen
// ---------------------------------------------------------------------------

#[test]
fn nav_back_returns_to_previous_view() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["nav", "cadences", "cadence-detail@cad-enterprise", "back"])
        .assert()
        .success()
        .stdout(predicate::str::contains("View: cadences"))
        .stdout(predicate::str::contains("Cadence: Enterprise Outbound"));
}

#[test]
fn rust_log_debug_shows_transitions() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .env("RUST_LOG", "debug")
        .args(["nav", "cadences", "back"])
        .assert()
        .success()
        .stderr(predicate::str::contains("navigate"));
}

#[test]
fn default_log_level_hides_transitions() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["nav", "cadences", "back"])
        .assert()
        .success()
        .stderr(predicate::str::contains("navigate").not());
}

#[test]
fn nav_json_reports_sub_views() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    let v = json_stdout(booky(&dir).args([
        "--json",
        "nav",
        "reports:dashboard",
        "reports:management-reports",
        "reports:management-reports",
    ]));
    let kinds: Vec<&str> = v["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["transition"]["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["moved", "moved", "ignored"]);
    assert_eq!(v["current"], "reports:management-reports");
    assert_eq!(v["reports_view"], "management-reports");
    assert_eq!(v["history"].as_array().unwrap().len(), 1);
    assert_eq!(v["history"][0]["view"], "dashboard");
}

#[test]
fn nav_back_on_empty_history_shows_dashboard() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    let v = json_stdout(booky(&dir).args(["--json", "nav", "back"]));
    assert_eq!(v["steps"][0]["transition"]["kind"], "fallback");
    assert_eq!(v["current"], "dashboard");
    assert_eq!(v["can_go_back"], false);
}

#[test]
fn nav_rejects_unknown_view() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["nav", "cadences", "billing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown view: billing"));
}

#[test]
fn nav_rejects_unknown_cadence() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["nav", "edit-cadence@nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cadence not found: nope"));
}

#[test]
fn screen_without_cadence_is_blank() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["screen", "edit-cadence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(blank)"));
}

#[test]
fn screen_clone_shows_draft_copy() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["screen", "clone-cadence@cad-inbound"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen: Clone Cadence"))
        .stdout(predicate::str::contains("Copy of Inbound Follow-up [draft]"));
}

// ---------------------------------------------------------------------------
// booky login / whoami / logout
// ---------------------------------------------------------------------------

#[test]
fn login_whoami_logout() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["login", "--email", "sam@booky.io", "--name", "Sam Lee"])
        .assert()
        .success();
    assert!(dir.path().join(".booky/session.json").exists());

    booky(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sam Lee <sam@booky.io>"));

    booky(&dir).arg("logout").assert().success();
    assert!(!dir.path().join(".booky/session.json").exists());

    booky(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn login_rejects_bad_email() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["login", "--email", "sam", "--name", "Sam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid email"));
    assert!(!dir.path().join(".booky/session.json").exists());
}

#[test]
fn corrupt_session_is_discarded() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);
    let session = dir.path().join(".booky/session.json");
    std::fs::write(&session, "{\"email\": ").unwrap();

    booky(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."))
        .stderr(predicate::str::contains("discarding malformed session record"));
    assert!(!session.exists());
}

// ---------------------------------------------------------------------------
// booky template
// ---------------------------------------------------------------------------

#[test]
fn template_tags_lists_all_nine() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(booky(&dir).args(["--json", "template", "tags"]));
    assert_eq!(v.as_array().unwrap().len(), 9);

    booky(&dir)
        .args(["template", "tags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{{meeting_time}}"))
        .stdout(predicate::str::contains("their company"));
}

#[test]
fn template_list_shows_seeded_templates() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tpl-intro"))
        .stdout(predicate::str::contains("Meeting confirmation"));
}

#[test]
fn template_preview_saved_template() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["template", "preview", "--id", "tpl-intro", "--prospect", "p-li"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: Quick question, Li"))
        .stdout(predicate::str::contains("As their role at Globex"))
        .stdout(predicate::str::contains("Sam Lee"));
}

#[test]
fn template_preview_leaves_unknown_tags() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    let v = json_stdout(booky(&dir).args([
        "--json",
        "template",
        "preview",
        "--subject",
        "Hello {{nonexistent_tag}}",
        "--body",
        "{{company}}",
        "--prospect",
        "p-ana",
    ]));
    assert_eq!(v["subject"], "Hello {{nonexistent_tag}}");
    assert_eq!(v["body"], "Acme");
    assert_eq!(v["unknown_tags"][0], "nonexistent_tag");
}

#[test]
fn template_preview_unknown_prospect_fails() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["template", "preview", "--id", "tpl-intro", "--prospect", "p-x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prospect not found: p-x"));
}

#[test]
fn template_insert_at_selection() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(booky(&dir).args([
        "--json",
        "template",
        "insert",
        "--text",
        "Hi there!",
        "--tag",
        "first_name",
        "--start",
        "3",
        "--end",
        "8",
    ]));
    assert_eq!(v["text"], "Hi {{first_name}}!");
    assert_eq!(v["cursor"], 17);
}

#[test]
fn template_insert_appends_without_cursor() {
    let dir = TempDir::new().unwrap();
    booky(&dir)
        .args(["template", "insert", "--text", "Best, ", "--tag", "{{sender_name}}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Best, {{sender_name}}"))
        .stdout(predicate::str::contains("cursor: 21"));
}

// ---------------------------------------------------------------------------
// booky config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_warns_on_missing_sender() {
    let dir = TempDir::new().unwrap();
    booky(&dir).arg("init").assert().success();

    booky(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[warning] sender.name is empty"));
}

#[test]
fn config_validate_clean() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_show() {
    let dir = TempDir::new().unwrap();
    init_workspace(&dir);

    booky(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sender:    Sam Lee"))
        .stdout(predicate::str::contains("fixtures.yaml"));
}
