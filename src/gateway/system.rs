use crate::error::{GitMergerError, Result};
use crate::gateway::Gateway;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Per-commit log format: fields separated by the ASCII unit separator,
/// records by the record separator. Field order is hash, author, email,
/// date, message.
pub const LOG_FORMAT: &str = "%H%x1f%an%x1f%ae%x1f%ad%x1f%s%x1e";

/// Gateway implementation backed by the system `git` binary.
///
/// Every method spawns one `git -C <repo>` subprocess and blocks until it
/// exits. Output is captured, never streamed.
pub struct GitGateway {
    repo_path: PathBuf,
}

impl GitGateway {
    /// Open the repository containing `path`.
    ///
    /// Performs one `git rev-parse --show-toplevel` call to verify the path
    /// is inside a working tree.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()?;

        if !output.status.success() {
            return Err(GitMergerError::gateway(
                "rev-parse",
                combined_output(&output.stdout, &output.stderr),
            ));
        }

        let top = String::from_utf8_lossy(&output.stdout);
        Ok(GitGateway {
            repo_path: PathBuf::from(top.trim()),
        })
    }

    /// Run one git subcommand against the repository.
    ///
    /// `operation` names the call for error reporting; on failure the
    /// combined stdout/stderr text is carried in the returned error.
    fn run(&self, operation: &str, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .args(args)
            .output()?;

        let combined = combined_output(&output.stdout, &output.stderr);
        if output.status.success() {
            Ok(combined)
        } else {
            Err(GitMergerError::gateway(operation, combined))
        }
    }
}

fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&err);
    }
    text
}

impl Gateway for GitGateway {
    fn checkout(&self, branch: &str) -> Result<String> {
        self.run("checkout", &["checkout", branch])
    }

    fn create_branch(&self, name: &str) -> Result<String> {
        self.run("checkout -b", &["checkout", "-b", name])
    }

    fn merge(&self, branch: &str) -> Result<String> {
        self.run("merge", &["merge", branch])
    }

    fn abort_merge(&self) -> Result<String> {
        self.run("merge --abort", &["merge", "--abort"])
    }

    fn delete_branch(&self, name: &str) -> Result<String> {
        self.run("branch -D", &["branch", "-D", name])
    }

    fn create_tag(&self, name: &str) -> Result<String> {
        self.run("tag", &["tag", name])
    }

    fn tags_merged_into(&self, branch: &str) -> Result<Vec<String>> {
        let output = self.run("tag --merged", &["tag", "--merged", branch])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn commit_log(&self, from: &str, to: &str) -> Result<String> {
        let range = format!("{}..{}", from, to);
        let format = format!("--pretty=format:{}", LOG_FORMAT);
        self.run("log", &["log", &format, &range])
    }
}
