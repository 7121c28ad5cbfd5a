// tests/integration_test.rs
//
// End-to-end tests against real temporary git repositories. These shell out
// to the system git binary, so they run serially.

use std::fs;
use std::path::Path;
use std::process::Command;

use serial_test::serial;
use tempfile::TempDir;

use git_merger::changes::Format;
use git_merger::gateway::{Gateway, GitGateway};
use git_merger::merge::NullObserver;
use git_merger::version::VersionPart;
use git_merger::workflow::{self, MergeRequest};

/// Run a git command in `repo`, panicking on failure.
fn git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .expect("failed to execute git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    fs::write(repo.join(name), content).expect("could not write file");
    git(repo, &["add", "-A"]);
    git(repo, &["commit", "-m", message]);
}

/// Repository with one tagged commit on master and one extra commit on dev.
fn setup_repo() -> TempDir {
    let dir = TempDir::new().expect("could not create temp dir");
    let path = dir.path();

    git(path, &["init"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "user.email", "test@example.com"]);

    commit_file(path, "README.md", "initial content\n", "initial commit");
    git(path, &["tag", "v1.0.0"]);

    git(path, &["checkout", "-b", "dev"]);
    commit_file(path, "feature.txt", "feature\n", "add feature");
    git(path, &["checkout", "master"]);

    dir
}

fn branch_list(repo: &Path) -> String {
    git(repo, &["branch", "--list"])
}

#[test]
#[serial]
fn test_clean_merge_tags_and_cleans_up() {
    let dir = setup_repo();
    let path = dir.path();
    let gateway = GitGateway::open(path).unwrap();

    let request = MergeRequest {
        source: "dev".to_string(),
        target: "master".to_string(),
        part: VersionPart::Minor,
        tag: None,
    };
    let summary = workflow::run_merge(&gateway, &NullObserver, &request).unwrap();

    assert_eq!(summary.tag, "v1.1.0");
    assert!(summary.changes.contains("add feature"));

    // Target contains the source's changes.
    assert!(path.join("feature.txt").exists());

    // No staging branch remains.
    assert!(!branch_list(path).contains("merge-staging"));

    // The new tag points at the new target head.
    let tag_commit = git(path, &["rev-parse", "v1.1.0^{commit}"]);
    let master_head = git(path, &["rev-parse", "master"]);
    assert_eq!(tag_commit.trim(), master_head.trim());
}

#[test]
#[serial]
fn test_conflicting_merge_leaves_target_untouched() {
    let dir = setup_repo();
    let path = dir.path();

    // Diverge master and dev on the same file so the merge conflicts.
    commit_file(path, "README.md", "master side\n", "edit on master");
    git(path, &["checkout", "dev"]);
    commit_file(path, "README.md", "dev side\n", "edit on dev");
    git(path, &["checkout", "master"]);

    let master_before = git(path, &["rev-parse", "master"]);

    let gateway = GitGateway::open(path).unwrap();
    let request = MergeRequest {
        source: "dev".to_string(),
        target: "master".to_string(),
        part: VersionPart::Minor,
        tag: None,
    };
    let err = workflow::run_merge(&gateway, &NullObserver, &request).unwrap_err();
    assert!(err.to_string().contains("merge"));

    // Target is exactly as it was, no partial merge state.
    assert_eq!(git(path, &["rev-parse", "master"]), master_before);
    assert_eq!(git(path, &["status", "--porcelain"]), "");

    // No staging branch remains and no tag was created.
    assert!(!branch_list(path).contains("merge-staging"));
    assert!(!git(path, &["tag"]).contains("v1.1.0"));
}

#[test]
#[serial]
fn test_changes_against_real_history() {
    let dir = setup_repo();
    let path = dir.path();

    commit_file(path, "fix.txt", "fix\n", "fix bug");
    git(path, &["tag", "v1.0.1"]);

    let gateway = GitGateway::open(path).unwrap();

    let text = workflow::run_changes(&gateway, "v1.0.1", Format::Text).unwrap();
    assert_eq!(text, "fix bug\n");

    let json = workflow::run_changes(&gateway, "v1.0.1", Format::Json).unwrap();
    assert!(json.contains("\"message\": \"fix bug\""));
    assert!(json.contains("\"author\": \"Test User\""));
    assert!(json.contains("\"email\": \"test@example.com\""));
}

#[test]
#[serial]
fn test_changes_for_oldest_tag_fails() {
    let dir = setup_repo();
    let gateway = GitGateway::open(dir.path()).unwrap();

    let err = workflow::run_changes(&gateway, "v1.0.0", Format::Text).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
#[serial]
fn test_gateway_lists_tags_merged_into_branch() {
    let dir = setup_repo();
    let path = dir.path();

    // A tag on dev only is not reachable from master.
    git(path, &["checkout", "dev"]);
    git(path, &["tag", "v9.0.0"]);
    git(path, &["checkout", "master"]);

    let gateway = GitGateway::open(path).unwrap();
    let tags = gateway.tags_merged_into("master").unwrap();
    assert!(tags.contains(&"v1.0.0".to_string()));
    assert!(!tags.contains(&"v9.0.0".to_string()));
}

#[test]
#[serial]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "git-merger", "--", "--help"])
        .output()
        .expect("failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-merger"));
    assert!(stdout.contains("major"));
    assert!(stdout.contains("changes"));
}
