//! End-to-end tests for delegated execution: `sweepy test` and
//! `sweepy installdeps` against stub interpreters.
//!
//! The stubs are shell scripts standing in for python/pip, which keeps the
//! tests hermetic: no real interpreter or network access is needed.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn sweepy() -> Command {
    Command::cargo_bin("sweepy").unwrap()
}

/// Write an executable stub script
fn stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A "python" that just executes its first argument as a shell script,
/// so runtests.py stubs can be plain sh.
fn stub_python(dir: &Path) -> PathBuf {
    stub(dir, "python3", "exec /bin/sh \"$@\"")
}

#[test]
fn test_runner_exit_code_propagated() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let python = stub_python(root);
    stub(root, "runtests.py", "exit 7");

    sweepy()
        .current_dir(root)
        .arg("test")
        .arg("--python")
        .arg(&python)
        .assert()
        .code(7);
}

#[test]
fn test_runner_success_is_success() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let python = stub_python(root);
    stub(root, "runtests.py", "exit 0");

    sweepy()
        .current_dir(root)
        .arg("test")
        .arg("--python")
        .arg(&python)
        .assert()
        .success();
}

#[test]
fn test_clean_completes_before_runner_starts() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let python = stub_python(root);
    // The runner fails if any stale bytecode survived the clean step
    stub(root, "runtests.py", "if [ -e junk.pyc ]; then exit 1; fi\nexit 0");

    fs::write(root.join("junk.pyc"), b"stale").unwrap();

    sweepy()
        .current_dir(root)
        .arg("test")
        .arg("--python")
        .arg(&python)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned 1 stale artifact"));

    assert!(!root.join("junk.pyc").exists());
}

#[test]
fn test_runner_receives_passthrough_flags() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let python = stub_python(root);
    stub(root, "runtests.py", "echo \"$@\" > args.txt\nexit 0");

    sweepy()
        .current_dir(root)
        .arg("test")
        .arg("--python")
        .arg(&python)
        .arg("--verbosity")
        .arg("2")
        .arg("--failfast")
        .arg("cache")
        .arg("client")
        .assert()
        .success();

    let recorded = fs::read_to_string(root.join("args.txt")).unwrap();
    assert!(recorded.contains("--verbosity 2"), "{}", recorded);
    assert!(recorded.contains("--failfast"), "{}", recorded);
    assert!(recorded.contains("cache client"), "{}", recorded);
    assert!(!recorded.contains("--interactive"), "{}", recorded);
}

#[test]
fn test_python_env_var_is_honored() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let python = stub_python(root);
    stub(root, "runtests.py", "exit 0");

    sweepy()
        .current_dir(root)
        .env("SWEEPY_PYTHON", &python)
        .arg("test")
        .assert()
        .success();
}

#[test]
fn test_custom_runner_from_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let python = stub_python(root);
    fs::write(
        root.join("sweepy.toml"),
        "[test]\nrunner = \"scripts/suite.py\"\n",
    )
    .unwrap();
    fs::create_dir(root.join("scripts")).unwrap();
    stub(&root.join("scripts"), "suite.py", "exit 5");

    sweepy()
        .current_dir(root)
        .arg("test")
        .arg("--python")
        .arg(&python)
        .assert()
        .code(5);
}

#[test]
fn test_installdeps_invokes_pip_with_manifest() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let pip = stub(root, "pip3", "echo \"$@\" > pip_args.txt\nexit 0");
    fs::write(root.join("requirements.txt"), "django\nredis\n").unwrap();

    sweepy()
        .current_dir(root)
        .arg("installdeps")
        .arg("--pip")
        .arg(&pip)
        .arg("--no-elevate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installing dependencies"));

    let recorded = fs::read_to_string(root.join("pip_args.txt")).unwrap();
    assert!(recorded.contains("install -r"), "{}", recorded);
    assert!(recorded.contains("requirements.txt"), "{}", recorded);
}

#[test]
fn test_installdeps_exit_code_propagated() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let pip = stub(root, "pip3", "exit 9");
    fs::write(root.join("requirements.txt"), "django\n").unwrap();

    sweepy()
        .current_dir(root)
        .arg("installdeps")
        .arg("--pip")
        .arg(&pip)
        .arg("--no-elevate")
        .assert()
        .code(9);
}

#[test]
fn test_installdeps_custom_manifest_from_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let pip = stub(root, "pip3", "echo \"$@\" > pip_args.txt\nexit 0");
    fs::write(
        root.join("sweepy.toml"),
        "[deps]\nrequirements = \"reqs/base.txt\"\nelevate = false\n",
    )
    .unwrap();
    fs::create_dir(root.join("reqs")).unwrap();
    fs::write(root.join("reqs/base.txt"), "django\n").unwrap();

    sweepy()
        .current_dir(root)
        .arg("installdeps")
        .arg("--pip")
        .arg(&pip)
        .assert()
        .success();

    let recorded = fs::read_to_string(root.join("pip_args.txt")).unwrap();
    assert!(recorded.contains("base.txt"), "{}", recorded);
}

#[test]
fn test_nonexecutable_python_flag_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    // Present but not executable
    let fake = root.join("python3");
    fs::write(&fake, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&fake, fs::Permissions::from_mode(0o644)).unwrap();
    stub(root, "runtests.py", "exit 0");

    sweepy()
        .current_dir(root)
        .arg("test")
        .arg("--python")
        .arg(&fake)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found or not executable"));
}
