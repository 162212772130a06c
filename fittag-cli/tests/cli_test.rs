use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fittag(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fittag").unwrap();
    cmd.env("FITTAG_CONFIG", config_dir.path().join("config.toml"));
    cmd.env_remove("FITTAG_TOKEN");
    cmd
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fittag(&dir);
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("routine onboarding"))
        .stdout(predicate::str::contains("onboard"))
        .stdout(predicate::str::contains("tag"));
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fittag(&dir);
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fittag(&dir);
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_fittag"));
}

#[test]
fn test_onboard_without_session_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fittag(&dir);
    cmd.arg("onboard");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("not logged in"));
}

#[test]
fn test_session_set_then_logout() {
    let dir = TempDir::new().unwrap();

    fittag(&dir)
        .args(["session", "set", "--token", "tok-1", "--user-id", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session saved for user 5"));

    let stored = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(stored.contains("tok-1"));

    fittag(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("tok-1").not());

    fittag(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    fittag(&dir)
        .args(["tag", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_tag_create_rejects_unknown_day() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fittag(&dir);
    cmd.args(["tag", "create", "--day", "someday"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown day"));
}

#[test]
fn test_tag_create_failure_is_reported_once() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _routine = server
        .mock("GET", "/api/routines/user/5")
        .with_status(500)
        .create();

    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "[api]\nbase_url = \"{}\"\n\n[session]\ntoken = \"tok-1\"\nuser_id = \"5\"\n",
            server.url()
        ),
    )
    .unwrap();

    let output = fittag(&dir)
        .args(["tag", "create", "--day", "monday"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = "Could not fetch your routine.";

    assert!(!stdout.contains(message));
    assert_eq!(stderr.matches(message).count(), 1);
}
