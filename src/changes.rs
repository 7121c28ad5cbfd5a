//! Change extractor: commit-range retrieval and changelog rendering.

use crate::error::{GitMergerError, Result};
use crate::gateway::Gateway;
use crate::tags::list_valid_tags;
use serde::Serialize;

/// ASCII unit separator between fields of one exported commit record.
const FIELD_SEPARATOR: char = '\u{1f}';
/// ASCII record separator terminating each exported commit record.
const RECORD_SEPARATOR: char = '\u{1e}';

const RECORD_FIELDS: usize = 5;

/// One completed change in repository history.
///
/// Field order doubles as the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: String,
    pub message: String,
}

/// Output rendering for a change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Render the commits between two release versions.
///
/// When `version2` is `None` it resolves to the valid tag immediately
/// preceding `version1` among the tags reachable from `HEAD`; if `version1`
/// is not a known release tag, or is the oldest one, this fails with a
/// not-found error. Commits come back newest first, matching git log order.
pub fn change_list(
    gateway: &dyn Gateway,
    version1: &str,
    version2: Option<&str>,
    format: Format,
) -> Result<String> {
    let version2 = match version2 {
        Some(v) => v.to_string(),
        None => resolve_predecessor(gateway, version1)?,
    };

    let raw = gateway.commit_log(&version2, version1)?;
    let commits = parse_commit_log(&raw)?;
    Ok(render(&commits, format))
}

/// Find the valid tag immediately preceding `version` on `HEAD`.
fn resolve_predecessor(gateway: &dyn Gateway, version: &str) -> Result<String> {
    let tags = list_valid_tags(gateway, "HEAD")?;
    tags.iter()
        .rposition(|tag| tag == version)
        .filter(|&pos| pos > 0)
        .map(|pos| tags[pos - 1].clone())
        .ok_or_else(|| {
            GitMergerError::not_found(format!(
                "version {} not found or has no predecessor",
                version
            ))
        })
}

/// Parse the gateway's delimited log export into commit records.
///
/// Each record carries exactly five fields (hash, author, email, date,
/// message) separated by `\x1f` and terminated by `\x1e`. Empty output
/// means an empty range, not an error.
pub fn parse_commit_log(raw: &str) -> Result<Vec<CommitRecord>> {
    let mut commits = Vec::new();
    for record in raw.split(RECORD_SEPARATOR) {
        let record = record.trim_matches(['\n', '\r', ' ']);
        if record.is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        if fields.len() != RECORD_FIELDS {
            return Err(GitMergerError::parse(format!(
                "expected {} fields per commit record, got {}",
                RECORD_FIELDS,
                fields.len()
            )));
        }
        commits.push(CommitRecord {
            hash: fields[0].to_string(),
            author: fields[1].to_string(),
            email: fields[2].to_string(),
            date: fields[3].to_string(),
            message: fields[4].to_string(),
        });
    }
    Ok(commits)
}

/// Render a change set as text (one message per line) or indented JSON.
pub fn render(commits: &[CommitRecord], format: Format) -> String {
    match format {
        // Serializing Vec<CommitRecord> cannot fail: all fields are strings.
        Format::Json => serde_json::to_string_pretty(commits).unwrap_or_else(|_| "[]".to_string()),
        Format::Text => {
            let mut out = String::new();
            for commit in commits {
                out.push_str(&commit.message);
                out.push('\n');
            }
            out
        }
    }
}
