use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

const TAB_URL: &str = "https://acme.lightning.force.com/lightning/page/home";

#[allow(deprecated)]
fn orgjump(config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("orgjump").expect("binary");
    cmd.env("ORGJUMP_CONFIG", config.path())
        .env_remove("ORGJUMP_TAB_URL")
        .env_remove("ORGJUMP_SID")
        .env_remove("ORGJUMP_COOKIES")
        .env_remove("ORGJUMP_API_BASE");
    cmd
}

fn empty_config() -> NamedTempFile {
    NamedTempFile::new().unwrap()
}

#[test]
fn go_users_prints_manage_users_url() {
    let config = empty_config();
    orgjump(&config)
        .args(["--tab-url", TAB_URL, "go", "users"])
        .assert()
        .success()
        .stdout("https://acme.lightning.force.com/lightning/setup/ManageUsers/home\n");
}

#[test]
fn go_obj_shortcut_keeps_api_name_case() {
    let config = empty_config();
    let output = orgjump(&config)
        .args(["--tab-url", TAB_URL, "go", "--json", "obj", "Account"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["matched"], "object");
    assert_eq!(
        body["path"],
        "/lightning/setup/ObjectManager/Account/Details/view"
    );
    assert_eq!(
        body["url"],
        "https://acme.lightning.force.com/lightning/setup/ObjectManager/Account/Details/view"
    );
}

#[test]
fn go_without_tab_prints_path() {
    let config = empty_config();
    orgjump(&config)
        .args(["go", "sharing", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "/lightning/setup/SetupOneHome/home?setupid=Search&searchVal=sharing%20rules",
        ));
}

#[test]
fn go_rejects_foreign_tab() {
    let config = empty_config();
    let output = orgjump(&config)
        .args(["--tab-url", "https://example.com/", "go", "--json", "users"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "not_on_platform");
    assert!(body["error"]["hint"].is_string());
}

#[test]
fn config_aliases_extend_the_table() {
    let config = empty_config();
    std::fs::write(
        config.path(),
        "[aliases]\n\"my perms\" = \"/lightning/setup/PermSets/home\"\n",
    )
    .unwrap();

    orgjump(&config)
        .args(["go", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("users\t/lightning/setup/ManageUsers/home"))
        .stdout(predicate::str::contains("my perms\t/lightning/setup/PermSets/home"));
}

#[test]
fn bad_config_fails_fast() {
    let config = empty_config();
    std::fs::write(config.path(), "colour = \"blue\"\n").unwrap();

    orgjump(&config)
        .args(["go", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn session_reports_origin_without_token() {
    let config = empty_config();
    orgjump(&config)
        .args(["--tab-url", TAB_URL, "--sid", "00Dsecret", "session"])
        .assert()
        .success()
        .stdout(predicate::str::contains("origin: https://acme.lightning.force.com"))
        .stdout(predicate::str::contains("00Dsecret").not());
}

#[test]
fn session_without_cookie_names_both_origins() {
    let config = empty_config();
    let output = orgjump(&config)
        .args(["--tab-url", TAB_URL, "session", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["error"]["code"], "no_session");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("https://acme.lightning.force.com"));
    assert!(message.contains("https://acme.my.salesforce.com"));
}

#[test]
fn popup_object_lookup_teleports() {
    let config = empty_config();
    orgjump(&config)
        .args(["--tab-url", TAB_URL, "--sid", "00Dtoken", "popup"])
        .write_stdin("objects\nAccount\n")
        .assert()
        .success()
        .stdout("https://acme.lightning.force.com/lightning/setup/ObjectManager/Account/Details/view\n");
}
