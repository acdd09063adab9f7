use super::TerminationCondition;
use crate::search::SearchStatistics;

/// Stops the search once `budget` nodes have been explored.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> Self {
        Self { budget }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.num_nodes() >= self.budget
    }
}

/// Stops the search once `budget` solutions have been found.
#[derive(Debug, Copy, Clone)]
pub struct SolutionBudget {
    budget: u64,
}

impl SolutionBudget {
    pub fn new(budget: u64) -> Self {
        Self { budget }
    }
}

impl TerminationCondition for SolutionBudget {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.num_solutions() >= self.budget
    }
}

/// Stops the search once `budget` failures have been encountered.
#[derive(Debug, Copy, Clone)]
pub struct FailureBudget {
    budget: u64,
}

impl FailureBudget {
    pub fn new(budget: u64) -> Self {
        Self { budget }
    }
}

impl TerminationCondition for FailureBudget {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.num_failures() >= self.budget
    }
}
