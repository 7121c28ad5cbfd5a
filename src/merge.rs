//! Staged merge protocol with rollback.
//!
//! A merge runs through a disposable staging branch first: the staging
//! merge proves the source merges cleanly before the target branch is
//! touched. On a conflict the staging branch is torn down and the target
//! is left exactly as it was.

use crate::error::Result;
use crate::gateway::Gateway;
use std::fmt;

/// One merge operation in flight. Exists only for the duration of the
/// protocol run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSession {
    pub source: String,
    pub target: String,
    pub staging: String,
}

impl MergeSession {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        let staging = staging_branch_name(&source, &target);
        MergeSession {
            source,
            target,
            staging,
        }
    }
}

/// Name for the disposable staging branch of one source/target pair.
///
/// Deterministic so a leftover staging branch from an interrupted run is
/// recognizable (and force-deleted on the next cleanup).
pub fn staging_branch_name(source: &str, target: &str) -> String {
    format!("merge-staging/{}-into-{}", source, target)
}

/// Step transitions the orchestrator reports while the protocol runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    CheckingOutTarget { target: String },
    CreatingStaging { staging: String },
    MergingIntoStaging { source: String, staging: String },
    RollingBack { staging: String },
    MergingIntoTarget { source: String, target: String },
    DeletingStaging { staging: String },
    Tagging { tag: String },
}

impl fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEvent::CheckingOutTarget { target } => {
                write!(f, "Checking out branch {}", target)
            }
            MergeEvent::CreatingStaging { staging } => {
                write!(f, "Creating staging branch {}", staging)
            }
            MergeEvent::MergingIntoStaging { source, staging } => {
                write!(f, "Merging {} into staging branch {}", source, staging)
            }
            MergeEvent::RollingBack { staging } => {
                write!(f, "Merge failed, rolling back staging branch {}", staging)
            }
            MergeEvent::MergingIntoTarget { source, target } => {
                write!(f, "Merging {} into {}", source, target)
            }
            MergeEvent::DeletingStaging { staging } => {
                write!(f, "Deleting staging branch {}", staging)
            }
            MergeEvent::Tagging { tag } => write!(f, "Tagging release {}", tag),
        }
    }
}

/// Observer the orchestrator reports step transitions to.
///
/// Injected instead of an ambient logger so tests can assert on the step
/// sequence without capturing process output.
pub trait MergeObserver {
    fn on_event(&self, event: &MergeEvent);
}

/// Observer that discards all events.
pub struct NullObserver;

impl MergeObserver for NullObserver {
    fn on_event(&self, _event: &MergeEvent) {}
}

/// Drives the staged merge protocol against a gateway.
pub struct MergeOrchestrator<'a> {
    gateway: &'a dyn Gateway,
    observer: &'a dyn MergeObserver,
}

impl<'a> MergeOrchestrator<'a> {
    pub fn new(gateway: &'a dyn Gateway, observer: &'a dyn MergeObserver) -> Self {
        MergeOrchestrator { gateway, observer }
    }

    /// Merge `source` into `target` through a disposable staging branch.
    ///
    /// Sequence: checkout target, create the staging branch from it, merge
    /// source into staging. A staging-merge failure rolls everything back
    /// (abort, re-checkout target, delete staging — each best-effort) and
    /// propagates the original merge error. On staging success the same
    /// merge is repeated against the real target, then the staging branch
    /// is deleted.
    ///
    /// A target-merge failure after a clean staging merge propagates
    /// without deleting the staging branch; the branch survives for
    /// inspection. See DESIGN.md.
    pub fn merge(&self, session: &MergeSession) -> Result<()> {
        let MergeSession {
            source,
            target,
            staging,
        } = session;

        self.emit(MergeEvent::CheckingOutTarget {
            target: target.clone(),
        });
        self.gateway.checkout(target)?;

        self.emit(MergeEvent::CreatingStaging {
            staging: staging.clone(),
        });
        self.gateway.create_branch(staging)?;

        self.emit(MergeEvent::MergingIntoStaging {
            source: source.clone(),
            staging: staging.clone(),
        });
        if let Err(merge_err) = self.gateway.merge(source) {
            self.emit(MergeEvent::RollingBack {
                staging: staging.clone(),
            });
            // Best-effort rollback: only the triggering merge error is
            // surfaced, cleanup failures must not mask the root cause.
            let _ = self.gateway.abort_merge();
            let _ = self.gateway.checkout(target);
            let _ = self.gateway.delete_branch(staging);
            return Err(merge_err);
        }

        self.emit(MergeEvent::MergingIntoTarget {
            source: source.clone(),
            target: target.clone(),
        });
        self.gateway.checkout(target)?;
        self.gateway.merge(source)?;

        self.emit(MergeEvent::DeletingStaging {
            staging: staging.clone(),
        });
        let _ = self.gateway.delete_branch(staging);

        Ok(())
    }

    fn emit(&self, event: MergeEvent) {
        self.observer.on_event(&event);
    }
}
