//! Tag repository reader: discovery and ordering of release tags.

use crate::error::Result;
use crate::gateway::Gateway;
use crate::version::{is_valid_tag, SemVer, VersionPart};

/// Tag applied when a branch carries no release tags yet.
const BOOTSTRAP_TAG: &str = "v1.0.0";

/// List release tags reachable from `branch`, oldest first.
///
/// Tags not matching the release pattern are silently ignored; a branch
/// with no release tags yields an empty list, not an error. Gateway
/// failures (e.g. the branch does not exist) propagate unretried.
pub fn list_valid_tags(gateway: &dyn Gateway, branch: &str) -> Result<Vec<String>> {
    let mut tags: Vec<String> = gateway
        .tags_merged_into(branch)?
        .into_iter()
        .filter(|tag| is_valid_tag(tag))
        .collect();
    tags.sort_by_key(|tag| SemVer::parse(tag));
    Ok(tags)
}

/// Compute the next release tag for `branch` by incrementing the highest
/// existing tag's selected component. Returns `v1.0.0` when the branch has
/// no release tags yet.
pub fn next_tag(gateway: &dyn Gateway, branch: &str, part: VersionPart) -> Result<String> {
    let tags = list_valid_tags(gateway, branch)?;
    match tags.last() {
        Some(latest) => Ok(SemVer::parse(latest).increment(part).to_string()),
        None => Ok(BOOTSTRAP_TAG.to_string()),
    }
}
