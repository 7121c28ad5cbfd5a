use crate::error::{GitMergerError, Result};
use crate::gateway::Gateway;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted gateway for testing the release core without a real repository.
///
/// Records every call in order and can be told to fail the Nth occurrence
/// of a named operation, which is how tests drive the merge protocol into
/// its conflict and rollback paths.
pub struct MockGateway {
    tags_by_branch: HashMap<String, Vec<String>>,
    log_output: String,
    failures: HashMap<String, Vec<usize>>,
    counters: Mutex<HashMap<String, usize>>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    /// Create a gateway where every operation succeeds and no tags exist.
    pub fn new() -> Self {
        MockGateway {
            tags_by_branch: HashMap::new(),
            log_output: String::new(),
            failures: HashMap::new(),
            counters: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the tags reachable from a branch, in the given (raw) order.
    pub fn with_tags(mut self, branch: impl Into<String>, tags: &[&str]) -> Self {
        self.tags_by_branch
            .insert(branch.into(), tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Script the raw delimited output returned by [Gateway::commit_log].
    pub fn with_log(mut self, raw: impl Into<String>) -> Self {
        self.log_output = raw.into();
        self
    }

    /// Fail the Nth (1-based) invocation of the named operation.
    pub fn fail_on(mut self, operation: &str, occurrence: usize) -> Self {
        self.failures
            .entry(operation.to_string())
            .or_default()
            .push(occurrence);
        self
    }

    /// The sequence of calls made so far, e.g. `"checkout master"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &str, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);

        let mut counters = self.counters.lock().unwrap();
        let count = counters.entry(operation.to_string()).or_insert(0);
        *count += 1;

        if let Some(occurrences) = self.failures.get(operation) {
            if occurrences.contains(count) {
                return Err(GitMergerError::gateway(operation, "scripted failure"));
            }
        }
        Ok(())
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for MockGateway {
    fn checkout(&self, branch: &str) -> Result<String> {
        self.record("checkout", format!("checkout {}", branch))?;
        Ok(String::new())
    }

    fn create_branch(&self, name: &str) -> Result<String> {
        self.record("create_branch", format!("create_branch {}", name))?;
        Ok(String::new())
    }

    fn merge(&self, branch: &str) -> Result<String> {
        self.record("merge", format!("merge {}", branch))?;
        Ok(String::new())
    }

    fn abort_merge(&self) -> Result<String> {
        self.record("abort_merge", "abort_merge".to_string())?;
        Ok(String::new())
    }

    fn delete_branch(&self, name: &str) -> Result<String> {
        self.record("delete_branch", format!("delete_branch {}", name))?;
        Ok(String::new())
    }

    fn create_tag(&self, name: &str) -> Result<String> {
        self.record("create_tag", format!("create_tag {}", name))?;
        Ok(String::new())
    }

    fn tags_merged_into(&self, branch: &str) -> Result<Vec<String>> {
        self.record("tags_merged_into", format!("tags_merged_into {}", branch))?;
        Ok(self
            .tags_by_branch
            .get(branch)
            .cloned()
            .unwrap_or_default())
    }

    fn commit_log(&self, from: &str, to: &str) -> Result<String> {
        self.record("commit_log", format!("commit_log {}..{}", from, to))?;
        Ok(self.log_output.clone())
    }
}
