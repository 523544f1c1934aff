use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn relative_destination_folder_is_rejected_before_any_work() {
    let root = TempDir::new().expect("tempdir");

    let mut cmd = Command::cargo_bin("pix-bucket").expect("binary exists");
    cmd.arg("Photos").arg(root.path()).arg("dummy-token");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("absolute path"));
}

#[test]
fn missing_local_root_is_rejected_before_any_work() {
    let mut cmd = Command::cargo_bin("pix-bucket").expect("binary exists");
    cmd.arg("/Photos")
        .arg("/definitely/not/a/real/dir")
        .arg("dummy-token");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn missing_arguments_print_usage() {
    let mut cmd = Command::cargo_bin("pix-bucket").expect("binary exists");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
