//! `cc-switch uninstall`
//!
//! Only the cancellation path runs here; confirming would delete the binary
//! under test.

use predicates::prelude::*;
use std::fs;

use crate::common::{cc_switch, temp_home};

#[test]
fn test_non_interactive_uninstall_is_cancelled() {
    let home = temp_home();
    let config = home.path().join(".config/cc-switch");
    fs::create_dir_all(&config).unwrap();
    fs::write(config.join("profiles.json"), "{}").unwrap();
    fs::create_dir_all(home.path().join(".zsh/completions")).unwrap();
    fs::write(home.path().join(".zsh/completions/_cc-switch"), "#compdef cc-switch\n").unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .arg("uninstall")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("This will uninstall cc-switch"))
        .stdout(predicate::str::contains("Uninstall cancelled."));

    assert!(config.join("profiles.json").exists());
    assert!(home.path().join(".zsh/completions/_cc-switch").exists());
}
