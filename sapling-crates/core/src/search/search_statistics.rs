use std::time::Duration;

use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The counters of a single run of the [`DepthFirstSearch`](super::DepthFirstSearch).
///
/// The root of the tree is not counted as a node; every branch action which was applied
/// successfully is.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SearchStatistics {
    pub(crate) num_nodes: u64,
    pub(crate) num_solutions: u64,
    pub(crate) num_failures: u64,
    pub(crate) peak_depth: u64,
    pub(crate) completed: bool,
    pub(crate) time_spent: Duration,
}

impl SearchStatistics {
    /// The number of branch actions which were applied without an inconsistency.
    pub fn num_nodes(&self) -> u64 {
        self.num_nodes
    }

    pub fn num_solutions(&self) -> u64 {
        self.num_solutions
    }

    /// The number of branch actions which resulted in an inconsistency.
    pub fn num_failures(&self) -> u64 {
        self.num_failures
    }

    /// The largest number of decisions on a single path.
    pub fn peak_depth(&self) -> u64 {
        self.peak_depth
    }

    /// Whether the whole tree was explored, i.e. the search was not stopped by a limit.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn time_spent(&self) -> Duration {
        self.time_spent
    }
}

impl Statistic for SearchStatistics {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger
            .attach_to_prefix("numNodes")
            .log_statistic(self.num_nodes);
        statistic_logger
            .attach_to_prefix("numSolutions")
            .log_statistic(self.num_solutions);
        statistic_logger
            .attach_to_prefix("numFailures")
            .log_statistic(self.num_failures);
        statistic_logger
            .attach_to_prefix("peakDepth")
            .log_statistic(self.peak_depth);
        statistic_logger
            .attach_to_prefix("completed")
            .log_statistic(self.completed);
        statistic_logger
            .attach_to_prefix("timeSpentInSearchMs")
            .log_statistic(self.time_spent.as_millis());
    }
}
