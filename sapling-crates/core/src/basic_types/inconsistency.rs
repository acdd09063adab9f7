use thiserror::Error;

use crate::engine::EmptyDomain;

/// The outcome of executing a single branch action.
pub type BranchResult = Result<(), Inconsistency>;

/// Signals that a decision is infeasible in the current state.
///
/// This is the recoverable failure of the search: it is caught by the search driver at the level of
/// the branch action which raised it, counted as a failure, and followed by a restore of the parent
/// state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain operation removed the last value from a domain.
    #[error("a domain became empty")]
    EmptyDomain,
    /// The decision violates a condition which is not expressed through a domain, e.g. a bound on
    /// the objective or a check performed by the caller inside a branch action.
    #[error("the decision is in conflict with the current state")]
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
