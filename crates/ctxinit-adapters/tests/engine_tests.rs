//! Scaffold engine behavior over the in-memory filesystem.

use std::path::{Path, PathBuf};

use ctxinit_adapters::{MemoryFilesystem, builtin_catalog::builtin_catalog};
use ctxinit_core::{
    application::{ScaffoldEngine, ports::Filesystem as _},
    domain::{ActionOutcome, InstallMode, ManifestFacts, OverwritePolicy},
    error::CtxError,
};

fn engine_over(fs: &MemoryFilesystem, root: &str) -> ScaffoldEngine {
    fs.create_dir_all(Path::new(root)).unwrap();
    ScaffoldEngine::new(builtin_catalog().unwrap(), root, Box::new(fs.clone())).unwrap()
}

#[test]
fn fresh_install_creates_every_managed_file() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");

    let log = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    // 10 files plus created directories; no failures, nothing kept.
    assert_eq!(log.count(ActionOutcome::Kept), 0);
    assert_eq!(log.count(ActionOutcome::Failed), 0);
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
        assert!(
            fs.read_file(&PathBuf::from("/proj").join(file)).is_some(),
            "missing {file}"
        );
    }
}

#[test]
fn rerun_with_preserve_keeps_everything() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    let facts = ManifestFacts::new();

    engine
        .install(InstallMode::Full, OverwritePolicy::PreserveExisting, &facts, false)
        .unwrap();
    let before = fs.read_file(Path::new("/proj/AGENTS.md")).unwrap();

    let log = engine
        .install(InstallMode::Full, OverwritePolicy::PreserveExisting, &facts, false)
        .unwrap();

    assert!(log.is_all_kept(), "second run must be a no-op: {log:?}");
    assert_eq!(fs.read_file(Path::new("/proj/AGENTS.md")).unwrap(), before);
}

#[test]
fn preserve_existing_leaves_user_edits_alone() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    fs.write_file(Path::new("/proj/AGENTS.md"), "my custom router\n")
        .unwrap();

    engine
        .install(
            InstallMode::Full,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    assert_eq!(
        fs.read_file(Path::new("/proj/AGENTS.md")).unwrap(),
        "my custom router\n"
    );
}

#[test]
fn force_overwrites_everything_except_gitignore() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    fs.write_file(Path::new("/proj/AGENTS.md"), "stale\n").unwrap();
    fs.write_file(Path::new("/proj/.gitignore"), "my-ignores\n").unwrap();

    let log = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::Force,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    assert_ne!(fs.read_file(Path::new("/proj/AGENTS.md")).unwrap(), "stale\n");
    assert_eq!(
        fs.read_file(Path::new("/proj/.gitignore")).unwrap(),
        "my-ignores\n"
    );
    assert_eq!(log.count(ActionOutcome::Overwritten), 1);
    assert_eq!(log.count(ActionOutcome::Kept), 1);
}

#[test]
fn force_with_archive_keeps_the_previous_copy() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    fs.write_file(Path::new("/proj/AGENTS.md"), "previous content\n")
        .unwrap();

    let log = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::ForceWithArchive,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    assert_eq!(log.count(ActionOutcome::Archived), 1);
    let archived: Vec<PathBuf> = fs
        .list_files()
        .into_iter()
        .filter(|p| p.starts_with("/proj/.ctxinit-archive"))
        .collect();
    assert_eq!(archived.len(), 1);
    assert_eq!(
        fs.read_file(&archived[0]).unwrap(),
        "previous content\n"
    );
    // The live file now has fresh template content.
    assert!(
        fs.read_file(Path::new("/proj/AGENTS.md"))
            .unwrap()
            .contains("Agent Instructions")
    );
}

#[test]
fn repeated_archives_of_the_same_file_never_collide() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    let facts = ManifestFacts::new();

    fs.write_file(Path::new("/proj/AGENTS.md"), "v1\n").unwrap();
    engine
        .install(InstallMode::Full, OverwritePolicy::ForceWithArchive, &facts, false)
        .unwrap();
    fs.write_file(Path::new("/proj/AGENTS.md"), "v2\n").unwrap();
    engine
        .install(InstallMode::Full, OverwritePolicy::ForceWithArchive, &facts, false)
        .unwrap();

    let mut archived: Vec<String> = fs
        .list_files()
        .into_iter()
        .filter(|p| p.starts_with("/proj/.ctxinit-archive"))
        .filter(|p| p.to_string_lossy().contains("AGENTS.md"))
        .map(|p| fs.read_file(&p).unwrap())
        .collect();
    archived.sort();
    assert_eq!(archived, vec!["v1\n".to_string(), "v2\n".to_string()]);
}

#[test]
fn dry_run_plans_without_writing() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");

    let log = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            true,
        )
        .unwrap();

    assert!(log.count(ActionOutcome::Created) > 0);
    assert!(fs.list_files().is_empty(), "dry run must not write");
}

#[test]
fn minimal_mode_installs_only_the_minimal_set() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");

    engine
        .install(
            InstallMode::Minimal,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    assert!(fs.read_file(Path::new("/proj/AGENTS.md")).is_some());
    assert!(fs.read_file(Path::new("/proj/docs/PROJECT.md")).is_some());
    assert!(fs.read_file(Path::new("/proj/GEMINI.md")).is_none());
    assert!(fs.read_file(Path::new("/proj/docs/TODO.md")).is_none());
}

#[test]
fn symlinked_ancestor_escaping_the_root_aborts_with_zero_writes() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/proj")).unwrap();
    fs.create_dir_all(Path::new("/outside")).unwrap();
    // docs/ redirects outside the project.
    fs.add_symlink("/proj/docs", "/outside");

    let engine =
        ScaffoldEngine::new(builtin_catalog().unwrap(), "/proj", Box::new(fs.clone())).unwrap();
    let err = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            false,
        )
        .unwrap_err();

    assert!(matches!(err, CtxError::Domain(_)), "expected containment error, got {err}");
    assert!(err.is_containment_violation());
    assert!(fs.list_files().is_empty(), "no file may be written after an escape");
}

#[test]
fn symlinked_archive_dir_aborts_force_archive_with_zero_writes() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/proj")).unwrap();
    fs.create_dir_all(Path::new("/outside")).unwrap();
    fs.write_file(Path::new("/proj/AGENTS.md"), "previous content\n")
        .unwrap();
    // The archive directory redirects outside the project.
    fs.add_symlink("/proj/.ctxinit-archive", "/outside");

    let engine =
        ScaffoldEngine::new(builtin_catalog().unwrap(), "/proj", Box::new(fs.clone())).unwrap();
    let err = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::ForceWithArchive,
            &ManifestFacts::new(),
            false,
        )
        .unwrap_err();

    assert!(err.is_containment_violation(), "expected containment error, got {err}");
    assert!(
        fs.list_files().iter().all(|p| !p.starts_with("/outside")),
        "no file may leave the root through the archive"
    );
    assert_eq!(
        fs.read_file(Path::new("/proj/AGENTS.md")).unwrap(),
        "previous content\n"
    );
}

#[test]
fn remove_refuses_a_symlinked_archive_dir() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    engine
        .install(
            InstallMode::Full,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();
    fs.create_dir_all(Path::new("/outside")).unwrap();
    fs.add_symlink("/proj/.ctxinit-archive", "/outside");

    let err = engine.remove(true, false).unwrap_err();

    assert!(err.is_containment_violation());
    assert!(fs.read_file(Path::new("/proj/AGENTS.md")).is_some());
    assert!(fs.list_files().iter().all(|p| !p.starts_with("/outside")));
}

#[test]
fn symlink_squatting_on_a_file_fails_that_file_only() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/proj")).unwrap();
    fs.create_dir_all(Path::new("/outside")).unwrap();
    fs.write_file(Path::new("/outside/secret"), "do not touch\n").unwrap();
    fs.add_symlink("/proj/CLAUDE.md", "/outside/secret");

    let engine =
        ScaffoldEngine::new(builtin_catalog().unwrap(), "/proj", Box::new(fs.clone())).unwrap();
    let log = engine
        .install(
            InstallMode::Full,
            OverwritePolicy::Force,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    assert_eq!(log.count(ActionOutcome::Failed), 1);
    assert_eq!(
        fs.read_file(Path::new("/outside/secret")).unwrap(),
        "do not touch\n"
    );
    // The rest of the catalog still landed.
    assert!(fs.read_file(Path::new("/proj/AGENTS.md")).is_some());
}

#[test]
fn remove_archives_managed_files_and_spares_gitignore() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    let facts = ManifestFacts::new();
    engine
        .install(InstallMode::Full, OverwritePolicy::PreserveExisting, &facts, false)
        .unwrap();
    fs.write_file(Path::new("/proj/docs/NOTES.md"), "user file\n").unwrap();

    let log = engine.remove(true, false).unwrap();

    assert_eq!(log.count(ActionOutcome::Removed), 9);
    assert!(fs.read_file(Path::new("/proj/AGENTS.md")).is_none());
    assert!(fs.read_file(Path::new("/proj/.gitignore")).is_some());
    // User content in a managed directory survives, and so does the dir.
    assert_eq!(
        fs.read_file(Path::new("/proj/docs/NOTES.md")).unwrap(),
        "user file\n"
    );
    // Everything removed is recoverable from the archive.
    let archived = fs
        .list_files()
        .into_iter()
        .filter(|p| p.starts_with("/proj/.ctxinit-archive"))
        .count();
    assert_eq!(archived, 9);
}

#[test]
fn remove_without_archive_deletes_outright() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    let facts = ManifestFacts::new();
    engine
        .install(InstallMode::Full, OverwritePolicy::PreserveExisting, &facts, false)
        .unwrap();

    let log = engine.remove(false, false).unwrap();

    assert_eq!(log.count(ActionOutcome::Removed), 9);
    assert!(fs.read_file(Path::new("/proj/AGENTS.md")).is_none());
    assert!(
        fs.list_files()
            .iter()
            .all(|p| !p.starts_with("/proj/.ctxinit-archive"))
    );
}

#[test]
fn remove_dry_run_touches_nothing() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    let facts = ManifestFacts::new();
    engine
        .install(InstallMode::Full, OverwritePolicy::PreserveExisting, &facts, false)
        .unwrap();
    let before = fs.list_files().len();

    let log = engine.remove(true, true).unwrap();

    assert_eq!(log.count(ActionOutcome::Removed), 9);
    assert_eq!(fs.list_files().len(), before);
}

#[test]
fn detected_facts_render_into_project_doc() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    let mut facts = ManifestFacts::new();
    facts.resolve(
        ctxinit_core::domain::FactKey::Language,
        "Rust (2024)",
        "Cargo.toml",
    );
    facts.resolve(
        ctxinit_core::domain::FactKey::BuildCommand,
        "cargo build",
        "Cargo.toml",
    );

    engine
        .install(InstallMode::Full, OverwritePolicy::PreserveExisting, &facts, false)
        .unwrap();

    let project = fs.read_file(Path::new("/proj/docs/PROJECT.md")).unwrap();
    assert!(project.contains("- **Language(s):** Rust (2024)"));
    assert!(project.contains("- Build: cargo build"));
    // Unresolved facts fall back to the sentinel.
    assert!(project.contains("- Test: TBD"));
    assert!(!project.contains("{{"));
}

#[test]
fn status_reports_presence_per_file() {
    let fs = MemoryFilesystem::new();
    let engine = engine_over(&fs, "/proj");
    engine
        .install(
            InstallMode::Minimal,
            OverwritePolicy::PreserveExisting,
            &ManifestFacts::new(),
            false,
        )
        .unwrap();

    let status = engine.status();
    assert_eq!(status.len(), 10);
    let present = |p: &str| status.iter().find(|s| s.path.as_str() == p).unwrap().present;
    assert!(present("AGENTS.md"));
    assert!(present("docs/PROJECT.md"));
    assert!(!present("GEMINI.md"));
    assert!(!present("docs/DECISIONS.md"));
}

#[test]
fn missing_target_directory_is_rejected_up_front() {
    let fs = MemoryFilesystem::new();
    let result = ScaffoldEngine::new(builtin_catalog().unwrap(), "/nope", Box::new(fs));
    assert!(result.is_err());
}
