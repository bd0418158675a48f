//! End-to-end tests for the ctxinit binary.
//!
//! Each test runs the compiled binary inside its own temp directory, so
//! tests are independent and never touch the real working tree.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ctxinit() -> Command {
    let mut cmd = Command::cargo_bin("ctxinit").unwrap();
    // Keep output deterministic regardless of the host terminal.
    cmd.arg("--no-color");
    cmd
}

#[test]
fn help_lists_subcommands() {
    ctxinit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn version_matches_cargo() {
    ctxinit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_scaffolds_the_full_set() {
    let temp = TempDir::new().unwrap();

    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    for file in [
        "AGENTS.md",
        "CLAUDE.md",
        "GEMINI.md",
        ".gitignore",
        "docs/PROJECT.md",
        "docs/CONVENTIONS.md",
        "docs/TODO.md",
        "docs/DECISIONS.md",
        ".cursor/rules/project.mdc",
        ".github/copilot-instructions.md",
    ] {
        assert!(temp.path().join(file).is_file(), "missing {file}");
    }
}

#[test]
fn init_minimal_scaffolds_the_minimal_set_only() {
    let temp = TempDir::new().unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["init", "--minimal"])
        .assert()
        .success();

    assert!(temp.path().join("AGENTS.md").is_file());
    assert!(temp.path().join("docs/CONVENTIONS.md").is_file());
    assert!(!temp.path().join("GEMINI.md").exists());
    assert!(!temp.path().join(".cursor").exists());
}

#[test]
fn init_rerun_preserves_user_edits() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    let agents = temp.path().join("AGENTS.md");
    fs::write(&agents, "# My customized router\n").unwrap();

    ctxinit()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("kept"));

    assert_eq!(fs::read_to_string(&agents).unwrap(), "# My customized router\n");
}

#[test]
fn init_force_overwrites_but_spares_gitignore() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    fs::write(temp.path().join("AGENTS.md"), "stale\n").unwrap();
    fs::write(temp.path().join(".gitignore"), "custom-ignores\n").unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let agents = fs::read_to_string(temp.path().join("AGENTS.md")).unwrap();
    assert!(agents.contains("Agent Instructions"));
    assert_eq!(
        fs::read_to_string(temp.path().join(".gitignore")).unwrap(),
        "custom-ignores\n"
    );
}

#[test]
fn init_force_archive_keeps_previous_copies() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    ctxinit()
        .current_dir(temp.path())
        .args(["init", "--force-archive"])
        .assert()
        .success();

    assert!(temp.path().join(".ctxinit-archive").is_dir());
}

#[test]
fn init_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["init", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("AGENTS.md").exists());
}

#[test]
fn init_detect_fills_facts_from_cargo_toml() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("Cargo.toml"),
        "[package]\nname = \"demo\"\nedition = \"2024\"\n",
    )
    .unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["init", "--detect"])
        .assert()
        .success();

    let project = fs::read_to_string(temp.path().join("docs/PROJECT.md")).unwrap();
    assert!(project.contains("Rust (2024)"));
    assert!(project.contains("cargo build"));
}

#[test]
fn quiet_init_emits_nothing_on_stdout() {
    let temp = TempDir::new().unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["--quiet", "init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("AGENTS.md").is_file());
}

#[test]
fn new_creates_directory_and_scaffolds() {
    let temp = TempDir::new().unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["new", "my-service"])
        .assert()
        .success();

    assert!(temp.path().join("my-service/AGENTS.md").is_file());
    assert!(temp.path().join("my-service/docs/PROJECT.md").is_file());
}

#[test]
fn new_rejects_names_with_separators() {
    let temp = TempDir::new().unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["new", "a/b"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn new_rejects_existing_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("taken")).unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["new", "taken"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn remove_deletes_managed_files_only() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();
    fs::write(temp.path().join("docs/NOTES.md"), "user file\n").unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["remove", "--yes"])
        .assert()
        .success();

    assert!(!temp.path().join("AGENTS.md").exists());
    assert!(temp.path().join(".gitignore").is_file());
    assert!(temp.path().join("docs/NOTES.md").is_file());
    assert!(!temp.path().join(".ctxinit-archive").exists());
}

#[test]
fn remove_archive_keeps_copies() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    ctxinit()
        .current_dir(temp.path())
        .args(["remove", "--archive", "--yes"])
        .assert()
        .success();

    assert!(!temp.path().join("AGENTS.md").exists());
    assert!(temp.path().join(".ctxinit-archive").is_dir());
}

#[test]
fn remove_dry_run_touches_nothing() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    ctxinit()
        .current_dir(temp.path())
        .args(["remove", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(temp.path().join("AGENTS.md").is_file());
}

#[test]
fn status_check_passes_on_a_fresh_tree() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    ctxinit()
        .current_dir(temp.path())
        .args(["status", "--check"])
        .assert()
        .success();
}

#[test]
fn status_check_fails_when_a_managed_file_is_missing() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();
    fs::remove_file(temp.path().join("docs/CONVENTIONS.md")).unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["status", "--check"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("docs/CONVENTIONS.md"));
}

#[test]
fn status_without_check_reports_but_succeeds() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();
    fs::remove_file(temp.path().join("GEMINI.md")).unwrap();

    ctxinit()
        .current_dir(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("GEMINI.md"));
}

#[test]
fn status_json_output_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();

    let output = ctxinit()
        .current_dir(temp.path())
        .args(["status", "--output-format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed.get("findings").is_some());
    assert!(parsed.get("file_sizes").is_some());
}

#[test]
fn config_budgets_tighten_the_line_checks() {
    let temp = TempDir::new().unwrap();
    ctxinit().current_dir(temp.path()).arg("init").assert().success();
    fs::write(temp.path().join(".ctxinit.toml"), "[budgets]\nsoft = 5\nhard = 10\n").unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["status", "--check"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("hard budget"));
}

#[test]
fn explicit_missing_config_is_a_config_error() {
    let temp = TempDir::new().unwrap();

    ctxinit()
        .current_dir(temp.path())
        .args(["--config", "/no/such/file.toml", "status"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn completions_generate_for_bash() {
    ctxinit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctxinit"));
}

#[test]
fn containment_violation_aborts_with_nothing_written() {
    #[cfg(unix)]
    {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("docs")).unwrap();

        ctxinit()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("Nothing was written"));

        assert!(!temp.path().join("AGENTS.md").exists());
        assert!(!outside.path().join("PROJECT.md").exists());
    }
}
