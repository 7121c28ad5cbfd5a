use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Pattern that release tags must match to participate in version ordering.
const VALID_TAG_PATTERN: &str = r"^v?(\d+)\.(\d+)\.(\d+)$";

fn valid_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VALID_TAG_PATTERN).unwrap())
}

/// Returns true if the tag looks like a release version (`1.2.3` or `v1.2.3`).
///
/// Tags that don't match are ignored by the tag reader, not rejected.
pub fn is_valid_tag(tag: &str) -> bool {
    valid_tag_regex().is_match(tag)
}

/// Which component of a semantic version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

/// Semantic version triple parsed from a release tag.
///
/// Ordering is the derived lexicographic order over (major, minor, patch),
/// so two tags compare equal regardless of their `v` prefix spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemVer {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemVer {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        SemVer {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a tag string, stripping an optional leading `v`.
    ///
    /// Parsing is permissive: a malformed or missing component becomes 0.
    /// Callers that need meaningful values must pre-filter with
    /// [is_valid_tag]; the tag reader does exactly that.
    pub fn parse(tag: &str) -> Self {
        let clean = tag.strip_prefix('v').unwrap_or(tag);
        let mut parts = clean.split('.');
        let mut next = || {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .unwrap_or(0)
        };
        SemVer {
            major: next(),
            minor: next(),
            patch: next(),
        }
    }

    /// Increment exactly the selected component by one.
    ///
    /// Lower components are left unchanged: incrementing major on `v1.2.3`
    /// yields `v2.2.3`, not `v2.0.0`.
    pub fn increment(&self, part: VersionPart) -> Self {
        let mut next = *self;
        match part {
            VersionPart::Major => next.major += 1,
            VersionPart::Minor => next.minor += 1,
            VersionPart::Patch => next.patch += 1,
        }
        next
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
