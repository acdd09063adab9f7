//! A [`TerminationCondition`] is the limit predicate of a search. It is polled by the
//! [`DepthFirstSearch`] once per node, before the node is branched on, and stops the traversal when it
//! triggers. Reaching a limit is not a failure: the search reports it through
//! [`SearchStatistics::is_completed`].
mod budgets;
mod combinator;
mod indefinite;
mod time_budget;

pub use budgets::*;
pub use combinator::*;
pub use indefinite::*;
pub use time_budget::*;

#[cfg(doc)]
use crate::search::DepthFirstSearch;
use crate::search::SearchStatistics;

/// The central trait that defines a termination condition.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool;
}

/// Any closure over the statistics of the search is a limit predicate.
impl<F: FnMut(&SearchStatistics) -> bool> TerminationCondition for F {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        self(statistics)
    }
}
