use std::time::Instant;

use log::debug;
use log::trace;

use super::objective::Satisfaction;
use super::Objective;
use super::SearchStatistics;
use crate::basic_types::BranchResult;
use crate::basic_types::Inconsistency;
use crate::branching::Brancher;
use crate::state::SearchContext;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::termination::TerminationCondition;

/// A callback which is notified of a solution or a failure.
pub type SearchListener<Ctx> = Box<dyn FnMut(&Ctx, &SearchStatistics)>;

/// Raised when the termination condition triggers; unwinds the traversal to the entry point.
#[derive(Debug, Clone, Copy)]
struct SearchStopped;

/// Explores the tree defined by a [`Brancher`] in depth-first order.
///
/// At every node the brancher is asked for the children of the node; no children means that the
/// node is a solution. Otherwise each child is explored in turn: the search takes a checkpoint,
/// applies the [`BranchAction`](crate::branching::BranchAction) and, if that succeeded, explores
/// the resulting node before restoring the checkpoint. A branch action which returns an
/// [`Inconsistency`] is a failure.
///
/// Every entry point returns the context to the checkpoint level it was called at, also when the
/// search is stopped by its [`TerminationCondition`].
///
/// # Example
/// ```
/// # use sapling_core::branching::branchers::FirstFail;
/// # use sapling_core::engine::Domains;
/// # use sapling_core::search::DepthFirstSearch;
/// # use sapling_core::termination::Indefinite;
/// let mut domains = Domains::default();
/// let variables = (0..3)
///     .map(|_| domains.new_bounded_integer(0, 1))
///     .collect::<Vec<_>>();
///
/// let mut search = DepthFirstSearch::new(domains, FirstFail::new(&variables));
/// let statistics = search.solve(&mut Indefinite);
///
/// assert_eq!(8, statistics.num_solutions());
/// assert_eq!(0, statistics.num_failures());
/// assert!(statistics.is_completed());
/// ```
pub struct DepthFirstSearch<Ctx, B> {
    context: Ctx,
    brancher: B,
    solution_listeners: Vec<SearchListener<Ctx>>,
    failure_listeners: Vec<SearchListener<Ctx>>,
    statistics: SearchStatistics,
}

impl<Ctx, B> std::fmt::Debug for DepthFirstSearch<Ctx, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthFirstSearch")
            .field("num_solution_listeners", &self.solution_listeners.len())
            .field("num_failure_listeners", &self.failure_listeners.len())
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

impl<Ctx: SearchContext, B: Brancher<Ctx>> DepthFirstSearch<Ctx, B> {
    pub fn new(context: Ctx, brancher: B) -> Self {
        DepthFirstSearch {
            context,
            brancher,
            solution_listeners: vec![],
            failure_listeners: vec![],
            statistics: SearchStatistics::default(),
        }
    }

    /// Registers a callback which is invoked at every solution, with the context in the state of
    /// the solution. Callbacks are invoked in the order in which they were registered.
    pub fn on_solution(&mut self, listener: impl FnMut(&Ctx, &SearchStatistics) + 'static) {
        self.solution_listeners.push(Box::new(listener));
    }

    /// Registers a callback which is invoked at every failure, with the context in the state in
    /// which the failing branch action left it.
    pub fn on_failure(&mut self, listener: impl FnMut(&Ctx, &SearchStatistics) + 'static) {
        self.failure_listeners.push(Box::new(listener));
    }

    pub fn context(&self) -> &Ctx {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Ctx {
        &mut self.context
    }

    pub fn into_context(self) -> Ctx {
        self.context
    }

    pub fn brancher(&self) -> &B {
        &self.brancher
    }

    /// The statistics of the most recent run.
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Enumerates the solutions of the tree until it is exhausted or `termination` triggers.
    pub fn solve(&mut self, termination: &mut impl TerminationCondition) -> SearchStatistics {
        self.run(termination, &mut Satisfaction, |_| Ok(()))
    }

    /// Like [`DepthFirstSearch::solve`], but first applies `setup` to the context. The effects of
    /// `setup` only last for this run; if it fails, the run ends with a single failure.
    pub fn solve_subject_to(
        &mut self,
        termination: &mut impl TerminationCondition,
        setup: impl FnOnce(&mut Ctx) -> BranchResult,
    ) -> SearchStatistics {
        self.run(termination, &mut Satisfaction, setup)
    }

    /// Searches for solutions which improve on the [`Objective`] one after the other; the last
    /// solution found is optimal if the returned statistics report a completed search.
    pub fn optimise(
        &mut self,
        objective: &mut impl Objective<Ctx>,
        termination: &mut impl TerminationCondition,
    ) -> SearchStatistics {
        self.run(termination, objective, |_| Ok(()))
    }

    /// Logs the statistics of the most recent run and those of the brancher.
    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics.log(StatisticLogger::default());
            self.brancher
                .log_statistics(StatisticLogger::new(["brancher"]));
            log_statistic_postfix();
        }
    }

    fn run(
        &mut self,
        termination: &mut impl TerminationCondition,
        objective: &mut impl Objective<Ctx>,
        setup: impl FnOnce(&mut Ctx) -> BranchResult,
    ) -> SearchStatistics {
        let start = Instant::now();
        self.statistics = SearchStatistics::default();

        let initial_level = self.context.state_manager().level();
        let _ = self.context.state_manager_mut().checkpoint();
        debug!("Starting search at checkpoint level {initial_level}");

        let outcome = match setup(&mut self.context).and_then(|_| objective.filter(&mut self.context))
        {
            Ok(()) => self.explore(termination, objective, 0),
            Err(inconsistency) => {
                self.notify_failure(inconsistency);
                Ok(())
            }
        };

        self.statistics.completed = outcome.is_ok();
        self.context
            .state_manager_mut()
            .restore_to_level(initial_level);
        self.statistics.time_spent = start.elapsed();

        debug!(
            "Search {} after {} nodes, {} solutions and {} failures",
            if self.statistics.completed {
                "completed"
            } else {
                "stopped"
            },
            self.statistics.num_nodes,
            self.statistics.num_solutions,
            self.statistics.num_failures,
        );
        self.statistics
    }

    /// Explores the subtree below the current node; on [`SearchStopped`] the checkpoints taken on
    /// the way down are left for [`DepthFirstSearch::run`] to restore.
    fn explore(
        &mut self,
        termination: &mut impl TerminationCondition,
        objective: &mut impl Objective<Ctx>,
        depth: u64,
    ) -> Result<(), SearchStopped> {
        if termination.should_stop(&self.statistics) {
            debug!("Termination condition triggered at depth {depth}");
            return Err(SearchStopped);
        }

        let actions = self.brancher.branch(&mut self.context);
        if actions.is_empty() {
            self.notify_solution(objective, depth);
            return Ok(());
        }

        for action in actions {
            let _ = self.context.state_manager_mut().checkpoint();

            let result = action
                .execute(&mut self.context)
                .and_then(|_| objective.filter(&mut self.context));
            match result {
                Ok(()) => {
                    self.statistics.num_nodes += 1;
                    self.statistics.peak_depth = self.statistics.peak_depth.max(depth + 1);
                    self.explore(termination, objective, depth + 1)?;
                }
                Err(inconsistency) => self.notify_failure(inconsistency),
            }

            self.context.state_manager_mut().restore_to_checkpoint();
        }

        Ok(())
    }

    fn notify_solution(&mut self, objective: &mut impl Objective<Ctx>, depth: u64) {
        self.statistics.num_solutions += 1;
        trace!("Solution at depth {depth}");

        objective.tighten(&self.context);
        for listener in self.solution_listeners.iter_mut() {
            listener(&self.context, &self.statistics);
        }
    }

    fn notify_failure(&mut self, inconsistency: Inconsistency) {
        self.statistics.num_failures += 1;
        trace!("Failure: {inconsistency}");

        for listener in self.failure_listeners.iter_mut() {
            listener(&self.context, &self.statistics);
        }
    }
}
