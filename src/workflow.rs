//! Command workflows: what the CLI subcommands actually run.

use crate::changes::{change_list, Format};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::merge::{MergeEvent, MergeObserver, MergeOrchestrator, MergeSession};
use crate::tags::next_tag;
use crate::version::VersionPart;

/// Arguments for one merge-and-tag run.
///
/// Mirrors the CLI flags in a format suitable for orchestration logic, so
/// the workflow can be driven programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    pub source: String,
    pub target: String,
    pub part: VersionPart,
    /// Explicit release tag; bypasses auto-increment when set.
    pub tag: Option<String>,
}

/// Result of a successful merge-and-tag run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// The release tag that was applied.
    pub tag: String,
    /// Text changelog for the new release.
    pub changes: String,
}

/// Merge source into target, apply the release tag, render the changelog.
///
/// The tag is resolved before the merge runs: an explicit tag is used as
/// given, otherwise the next tag is computed from the target branch's
/// current tags. Tagging happens only after the merge succeeds; a tagging
/// failure propagates but the merge is already committed to history at
/// that point (merge and tag are not atomic).
pub fn run_merge(
    gateway: &dyn Gateway,
    observer: &dyn MergeObserver,
    request: &MergeRequest,
) -> Result<MergeSummary> {
    let tag = match &request.tag {
        Some(tag) => tag.clone(),
        None => next_tag(gateway, &request.target, request.part)?,
    };

    let orchestrator = MergeOrchestrator::new(gateway, observer);
    let session = MergeSession::new(request.source.clone(), request.target.clone());
    orchestrator.merge(&session)?;

    observer.on_event(&MergeEvent::Tagging { tag: tag.clone() });
    gateway.create_tag(&tag)?;

    let changes = change_list(gateway, &tag, None, Format::Text)?;
    Ok(MergeSummary { tag, changes })
}

/// Render the changelog for `version` since its predecessor tag.
pub fn run_changes(gateway: &dyn Gateway, version: &str, format: Format) -> Result<String> {
    change_list(gateway, version, None, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitMergerError;
    use crate::gateway::MockGateway;
    use crate::merge::NullObserver;

    fn request(tag: Option<&str>) -> MergeRequest {
        MergeRequest {
            source: "dev".to_string(),
            target: "master".to_string(),
            part: VersionPart::Minor,
            tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_run_merge_computes_next_tag_before_merging() {
        let gateway = MockGateway::new()
            .with_tags("master", &["v1.0.0", "v1.1.0"])
            .with_tags("HEAD", &["v1.0.0", "v1.1.0", "v1.2.0"]);
        let summary = run_merge(&gateway, &NullObserver, &request(None)).unwrap();

        assert_eq!(summary.tag, "v1.2.0");
        let calls = gateway.calls();
        assert_eq!(calls[0], "tags_merged_into master");
        assert_eq!(calls[1], "checkout master");
        assert!(calls.contains(&"create_tag v1.2.0".to_string()));
    }

    #[test]
    fn test_run_merge_explicit_tag_bypasses_increment() {
        let gateway = MockGateway::new().with_tags("HEAD", &["v1.0.0", "v9.9.9"]);
        let summary = run_merge(&gateway, &NullObserver, &request(Some("v9.9.9"))).unwrap();

        assert_eq!(summary.tag, "v9.9.9");
        let calls = gateway.calls();
        assert!(!calls.contains(&"tags_merged_into master".to_string()));
        assert!(calls.contains(&"create_tag v9.9.9".to_string()));
    }

    #[test]
    fn test_run_merge_does_not_tag_when_merge_fails() {
        let gateway = MockGateway::new()
            .with_tags("master", &["v1.0.0"])
            .fail_on("merge", 1);
        let err = run_merge(&gateway, &NullObserver, &request(None)).unwrap_err();

        assert!(matches!(err, GitMergerError::Gateway { ref operation, .. } if operation == "merge"));
        assert!(!gateway
            .calls()
            .iter()
            .any(|c| c.starts_with("create_tag")));
    }

    #[test]
    fn test_run_merge_tagging_failure_propagates_after_merge() {
        let gateway = MockGateway::new()
            .with_tags("master", &["v1.0.0"])
            .fail_on("create_tag", 1);
        let err = run_merge(&gateway, &NullObserver, &request(None)).unwrap_err();

        assert!(matches!(err, GitMergerError::Gateway { ref operation, .. } if operation == "create_tag"));
        // The merge already ran to completion; only the tag is missing.
        assert!(gateway.calls().contains(&"merge dev".to_string()));
    }

    #[test]
    fn test_run_changes_delegates_to_extractor() {
        let gateway = MockGateway::new().with_tags("HEAD", &["v1.0.0", "v1.1.0"]);
        let out = run_changes(&gateway, "v1.1.0", Format::Text).unwrap();
        assert_eq!(out, "");
        assert!(gateway
            .calls()
            .contains(&"commit_log v1.0.0..v1.1.0".to_string()));
    }
}
