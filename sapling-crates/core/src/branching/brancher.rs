use crate::basic_types::BranchResult;
#[cfg(doc)]
use crate::search::DepthFirstSearch;
use crate::statistics::StatisticLogger;

/// Defines the children of a node in the search tree.
pub trait Brancher<Ctx> {
    /// Returns the branch actions for the current state, in the order in which they should be
    /// tried; an empty list means that the current node is a solution.
    ///
    /// The context is mutable so that stateful branchers can update their reversible cells; such
    /// updates are undone together with the rest of the node when the search backtracks.
    fn branch(&mut self, context: &mut Ctx) -> Vec<BranchAction<Ctx>>;

    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the
    /// [`create_statistics_struct!`](crate::create_statistics_struct) macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

impl<Ctx, B: Brancher<Ctx> + ?Sized> Brancher<Ctx> for Box<B> {
    fn branch(&mut self, context: &mut Ctx) -> Vec<BranchAction<Ctx>> {
        (**self).branch(context)
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }
}

/// One edge out of a search node: a decision which is applied to the context exactly once, after
/// the [`DepthFirstSearch`] has taken a checkpoint.
///
/// The decision is infeasible if it returns an [`Inconsistency`](crate::Inconsistency).
pub struct BranchAction<Ctx> {
    action: Box<dyn FnOnce(&mut Ctx) -> BranchResult>,
}

impl<Ctx> BranchAction<Ctx> {
    pub fn new(action: impl FnOnce(&mut Ctx) -> BranchResult + 'static) -> Self {
        BranchAction {
            action: Box::new(action),
        }
    }

    /// Applies the decision.
    pub fn execute(self, context: &mut Ctx) -> BranchResult {
        (self.action)(context)
    }
}

impl<Ctx: 'static> BranchAction<Ctx> {
    /// Returns an action which first runs `before` and then this action.
    pub fn preceded_by(self, before: impl FnOnce(&mut Ctx) + 'static) -> Self {
        BranchAction::new(move |context: &mut Ctx| {
            before(context);
            self.execute(context)
        })
    }
}

impl<Ctx> std::fmt::Debug for BranchAction<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchAction").finish_non_exhaustive()
    }
}
