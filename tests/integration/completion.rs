//! `cc-switch completion`

use predicates::prelude::*;
use std::fs;

use crate::common::{cc_switch, temp_home};

#[test]
fn test_zsh_script() {
    let home = temp_home();
    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#compdef cc-switch"));
}

#[test]
fn test_bash_script() {
    let home = temp_home();
    cc_switch(home.path(), "/bin/bash")
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -F"))
        .stdout(predicate::str::contains("cc-switch"));
}

#[test]
fn test_fish_script() {
    let home = temp_home();
    cc_switch(home.path(), "/usr/bin/fish")
        .args(["completion", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c cc-switch"));
}

#[test]
fn test_script_mentions_subcommands() {
    let home = temp_home();
    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("uninstall"));
}

#[test]
fn test_no_shell_prints_usage() {
    let home = temp_home();
    cc_switch(home.path(), "/bin/zsh")
        .arg("completion")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: cc-switch completion <shell>"))
        .stdout(predicate::str::contains("Manual Setup"));
}

#[test]
fn test_unknown_shell_is_rejected() {
    let home = temp_home();
    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "powershell"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_printing_does_not_install() {
    let home = temp_home();
    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "zsh"])
        .assert()
        .success();

    assert!(!home.path().join(".zsh").exists());
    assert!(!home.path().join(".zshrc").exists());
}

#[test]
fn test_install_for_zsh_login_shell() {
    let home = temp_home();
    fs::write(home.path().join(".zshrc"), "export EDITOR=vim\n").unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zsh completions"));

    let script = fs::read_to_string(home.path().join(".zsh/completions/_cc-switch")).unwrap();
    assert!(script.starts_with("#compdef cc-switch"));

    let rc = fs::read_to_string(home.path().join(".zshrc")).unwrap();
    assert!(rc.starts_with("export EDITOR=vim\n"));
    assert!(rc.contains("fpath=(~/.zsh/completions $fpath)"));
    assert!(rc.contains("autoload -Uz compinit && compinit"));
}

#[test]
fn test_install_twice_changes_nothing() {
    let home = temp_home();
    fs::write(home.path().join(".zshrc"), "").unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "--install"])
        .assert()
        .success();
    let rc = fs::read_to_string(home.path().join(".zshrc")).unwrap();

    cc_switch(home.path(), "/bin/zsh")
        .args(["completion", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));

    assert_eq!(fs::read_to_string(home.path().join(".zshrc")).unwrap(), rc);
    assert_eq!(rc.matches("cc-switch completions >>>").count(), 1);
}

#[test]
fn test_install_for_fish_leaves_zshrc_alone() {
    let home = temp_home();
    fs::create_dir_all(home.path().join(".config/fish")).unwrap();

    cc_switch(home.path(), "/usr/bin/fish")
        .args(["completion", "--install"])
        .assert()
        .success();

    assert!(home.path().join(".config/fish/completions/cc-switch.fish").exists());
    assert!(!home.path().join(".zshrc").exists());
}
