//! External VCS gateway abstraction.
//!
//! The release core never touches git internals itself; every repository
//! operation goes through the [Gateway] trait as one external `git`
//! invocation. Concrete implementations:
//!
//! - [system::GitGateway]: real implementation shelling out to system git
//! - [mock::MockGateway]: scripted in-memory implementation for tests
//!
//! Each call blocks until the underlying process exits and returns the
//! combined stdout/stderr text. There are no timeouts and no retries: an
//! unresponsive git call blocks the whole command, and a failure surfaces
//! as [crate::GitMergerError::Gateway] carrying the operation name and the
//! tool's output verbatim.

pub mod mock;
pub mod system;

pub use mock::MockGateway;
pub use system::GitGateway;

use crate::error::Result;

/// Git operations the release core depends on, one subprocess call each.
pub trait Gateway: Send + Sync {
    /// `git checkout <branch>`
    fn checkout(&self, branch: &str) -> Result<String>;

    /// `git checkout -b <name>` — create a branch from the current HEAD
    /// and switch to it.
    fn create_branch(&self, name: &str) -> Result<String>;

    /// `git merge <branch>` into the currently checked-out branch.
    fn merge(&self, branch: &str) -> Result<String>;

    /// `git merge --abort` — discard an in-progress conflicted merge.
    fn abort_merge(&self) -> Result<String>;

    /// `git branch -D <name>` — force-delete a branch.
    fn delete_branch(&self, name: &str) -> Result<String>;

    /// `git tag <name>` — lightweight tag on the current HEAD.
    fn create_tag(&self, name: &str) -> Result<String>;

    /// `git tag --merged <branch>` — all tags reachable from `branch`,
    /// one per returned entry, unfiltered and unsorted.
    fn tags_merged_into(&self, branch: &str) -> Result<Vec<String>>;

    /// `git log <from>..<to>` with the delimited per-commit format used by
    /// [crate::changes]. Returns the raw output for the caller to parse.
    fn commit_log(&self, from: &str, to: &str) -> Result<String>;
}
