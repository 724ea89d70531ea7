//! CLI integration tests for Duet.
//!
//! These tests drive the `duet` binary against package trees written to
//! temporary directories.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// The duet binary, isolated from the user's global config.
fn duet(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("duet").unwrap();
    cmd.env("DUET_HOME", home).env_remove("DUET_TARGET");
    cmd
}

/// A package with the default manifest and the given (empty) source files.
fn package(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();

    duet(&tmp.path().join(".home"))
        .args(["init", "--name", "shared-ui"])
        .current_dir(tmp.path())
        .assert()
        .success();

    for file in files {
        let path = tmp.path().join("src").join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }
    tmp
}

fn home(tmp: &TempDir) -> std::path::PathBuf {
    tmp.path().join(".home")
}

// ============================================================================
// duet init
// ============================================================================

#[test]
fn test_init_in_empty_directory() {
    let tmp = TempDir::new().unwrap();

    duet(&home(&tmp))
        .args(["init"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Initialized"));

    let manifest = fs::read_to_string(tmp.path().join("Duet.toml")).unwrap();
    assert!(manifest.contains("[[platform]]"));
    assert!(!manifest.contains("name = \"."), "name kept the leading dot:\n{manifest}");
    assert!(tmp.path().join("src").is_dir());
}

#[test]
fn test_init_in_hidden_directory_uses_sanitized_name() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(".shared-ui");
    fs::create_dir_all(&dir).unwrap();

    duet(&home(&tmp))
        .args(["init"])
        .current_dir(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Initialized `shared-ui` package"));
}

#[test]
fn test_init_rejects_invalid_explicit_name() {
    let tmp = TempDir::new().unwrap();

    duet(&home(&tmp))
        .args(["init", "--name", ".app"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot start with a dot"));
}

#[test]
fn test_init_fails_if_manifest_exists() {
    let tmp = package(&[]);

    duet(&home(&tmp))
        .args(["init"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ============================================================================
// duet resolve
// ============================================================================

#[test]
fn test_resolve_toggle_theme() {
    let tmp = package(&[
        "components/toggle-theme.web.tsx",
        "components/toggle-theme.native.tsx",
        "components/toggle-theme.tsx",
    ]);

    let cases = [
        ("web", "toggle-theme.web.tsx"),
        ("native", "toggle-theme.native.tsx"),
        ("native-ios", "toggle-theme.native.tsx"),
    ];
    for (target, file) in cases {
        duet(&home(&tmp))
            .args(["resolve", "components/toggle-theme", "--target", target])
            .current_dir(tmp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(file));
    }
}

#[test]
fn test_resolve_from_subdirectory() {
    let tmp = package(&["button.tsx"]);

    duet(&home(&tmp))
        .args(["resolve", "button", "-t", "web"])
        .current_dir(tmp.path().join("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("button.tsx"));
}

#[test]
fn test_resolve_missing_module_fails_with_candidates() {
    let tmp = package(&["map.web.tsx"]);

    duet(&home(&tmp))
        .args(["--no-color", "resolve", "map", "--target", "native"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("module `map` not found for target `native`"))
        .stderr(predicate::str::contains("considered src/map.web.tsx"));
}

#[test]
fn test_resolve_unknown_target() {
    let tmp = package(&["button.tsx"]);

    duet(&home(&tmp))
        .args(["--no-color", "resolve", "button", "--target", "desktop"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform `desktop`"))
        .stderr(predicate::str::contains("duet targets"));
}

#[test]
fn test_resolve_uses_configured_default_target() {
    let tmp = package(&["button.tsx", "button.native.tsx"]);
    fs::create_dir_all(tmp.path().join(".duet")).unwrap();
    fs::write(
        tmp.path().join(".duet/config.toml"),
        "[resolve]\ndefault-target = \"native-android\"\n",
    )
    .unwrap();

    duet(&home(&tmp))
        .args(["resolve", "button"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("button.native.tsx"));
}

#[test]
fn test_resolve_without_target_fails() {
    let tmp = package(&["button.tsx"]);

    duet(&home(&tmp))
        .args(["resolve", "button"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no target given"));
}

#[test]
fn test_resolve_without_manifest() {
    let tmp = TempDir::new().unwrap();

    duet(&home(&tmp))
        .args(["--no-color", "resolve", "button", "-t", "web"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find Duet.toml"))
        .stderr(predicate::str::contains("duet init"));
}

// ============================================================================
// duet plan
// ============================================================================

#[test]
fn test_plan_json() {
    let tmp = package(&["button.tsx", "button.web.tsx", "camera.native.tsx"]);

    let output = duet(&home(&tmp))
        .args(["plan", "--target", "web", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["target"], "web");
    assert_eq!(plan["modules"]["button"]["artifact"], "src/button.web.tsx");
    assert_eq!(plan["skipped"][0], "camera");
    assert_eq!(plan["fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn test_plan_table_and_output_file() {
    let tmp = package(&["button.tsx", "button.ios.tsx"]);

    duet(&home(&tmp))
        .args(["plan", "-t", "native-ios", "-o", "plan.json"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/button.ios.tsx"))
        .stderr(predicate::str::contains("Planned 1 module(s)"));

    assert!(tmp.path().join("plan.json").is_file());
}

#[test]
fn test_plan_fails_on_duplicates() {
    let tmp = package(&["button.web.tsx", "button.web.jsx"]);

    duet(&home(&tmp))
        .args(["--no-color", "plan", "--target", "web"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate `web` artifacts for `button`"))
        .stderr(predicate::str::contains("failed to resolve"));
}

// ============================================================================
// duet check
// ============================================================================

#[test]
fn test_check_clean_package() {
    let tmp = package(&["button.tsx", "button.web.tsx"]);

    duet(&home(&tmp))
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Checked `shared-ui`"));
}

#[test]
fn test_check_reports_duplicates() {
    let tmp = package(&["button.tsx", "button.native.tsx", "button.native.ts"]);

    duet(&home(&tmp))
        .args(["--no-color", "check"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: duplicate `native` artifacts for `button`"))
        .stderr(predicate::str::contains("candidate src/button.native.ts"))
        .stderr(predicate::str::contains("candidate src/button.native.tsx"));
}

#[test]
fn test_check_warnings() {
    let tmp = package(&["camera.native.tsx"]);

    duet(&home(&tmp))
        .args(["--no-color", "check"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: module `camera` has no artifact for `web`"));

    duet(&home(&tmp))
        .args(["check", "--deny-warnings"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

// ============================================================================
// duet targets / completions
// ============================================================================

#[test]
fn test_targets_lists_precedence() {
    let tmp = package(&[]);

    duet(&home(&tmp))
        .args(["targets"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("*.ios.* > *.native.* > fallback"));
}

#[test]
fn test_completions() {
    let tmp = TempDir::new().unwrap();

    duet(&home(&tmp))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duet"));
}
