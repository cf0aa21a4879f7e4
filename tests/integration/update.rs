//! `cc-switch update`
//!
//! The release server never offers an installable asset, so the binary under
//! test is never replaced.

use predicates::prelude::*;
use serial_test::serial;
use std::fs;

use crate::common::{ReleaseServer, cc_switch, temp_home};

#[test]
#[serial]
fn test_up_to_date_repairs_completions() {
    let server = ReleaseServer::with_tag("v0.0.1");
    let home = temp_home();
    fs::write(home.path().join(".zshrc"), "").unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .env("CC_SWITCH_RELEASE_URL", server.url())
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current version: "))
        .stdout(predicate::str::contains("already running the latest version"));

    assert!(home.path().join(".zsh/completions/_cc-switch").exists());
    let rc = fs::read_to_string(home.path().join(".zshrc")).unwrap();
    assert!(rc.contains("# >>> cc-switch completions >>>"));
}

#[test]
#[serial]
fn test_up_to_date_with_completions_is_quiet() {
    let server = ReleaseServer::with_tag("v0.0.1");
    let home = temp_home();
    fs::write(home.path().join(".zshrc"), "").unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .env("CC_SWITCH_RELEASE_URL", server.url())
        .arg("update")
        .assert()
        .success();
    let rc = fs::read_to_string(home.path().join(".zshrc")).unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .env("CC_SWITCH_RELEASE_URL", server.url())
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("completions").not());

    assert_eq!(fs::read_to_string(home.path().join(".zshrc")).unwrap(), rc);
}

#[test]
#[serial]
fn test_non_interactive_update_is_declined() {
    let server = ReleaseServer::with_tag("v99.0.0");
    let home = temp_home();

    cc_switch(home.path(), "/bin/zsh")
        .env("CC_SWITCH_RELEASE_URL", server.url())
        .arg("update")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("99.0.0"))
        .stdout(predicate::str::contains("Update cancelled."));

    assert!(home.path().join(".zsh/completions/_cc-switch").exists());
}

#[test]
#[serial]
fn test_release_endpoint_error_fails() {
    let server = ReleaseServer::start(500, "oops".to_string());
    let home = temp_home();

    cc_switch(home.path(), "/bin/zsh")
        .env("CC_SWITCH_RELEASE_URL", server.url())
        .arg("update")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));

    assert!(!home.path().join(".zsh").exists());
}

#[test]
#[serial]
fn test_unreachable_endpoint_fails() {
    let home = temp_home();

    cc_switch(home.path(), "/bin/zsh")
        .env("CC_SWITCH_RELEASE_URL", "http://127.0.0.1:9/latest")
        .arg("update")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to check for updates"));
}

#[test]
fn test_update_rejects_version_argument() {
    let home = temp_home();

    cc_switch(home.path(), "/bin/zsh")
        .args(["update", "1.2.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
