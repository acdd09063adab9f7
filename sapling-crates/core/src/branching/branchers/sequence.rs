use crate::branching::BranchAction;
use crate::branching::Brancher;
use crate::state::ReversibleInt;
use crate::state::SearchContext;
use crate::state::StateManager;
use crate::statistics::StatisticLogger;

/// Runs a list of branchers one after the other: the first brancher which still has actions to
/// offer defines the children of a node, and a node is a solution only once every brancher is
/// exhausted.
///
/// The position in the list is stored in a reversible cell, so a brancher which was skipped on one
/// path is consulted again after backtracking above the point where it was skipped.
pub struct Sequence<Ctx> {
    branchers: Vec<Box<dyn Brancher<Ctx>>>,
    current: ReversibleInt,
}

impl<Ctx> Sequence<Ctx> {
    pub fn new(state: &mut StateManager, branchers: Vec<Box<dyn Brancher<Ctx>>>) -> Self {
        Sequence {
            branchers,
            current: state.make_reversible_int(0),
        }
    }
}

impl<Ctx> std::fmt::Debug for Sequence<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("num_branchers", &self.branchers.len())
            .field("current", &self.current)
            .finish()
    }
}

impl<Ctx: SearchContext> Brancher<Ctx> for Sequence<Ctx> {
    fn branch(&mut self, context: &mut Ctx) -> Vec<BranchAction<Ctx>> {
        let mut index = context.state_manager().get_int(self.current) as usize;
        while index < self.branchers.len() {
            let actions = self.branchers[index].branch(context);
            if !actions.is_empty() {
                return actions;
            }
            index += 1;
            let _ = context
                .state_manager_mut()
                .set_int(self.current, index as i64);
        }
        vec![]
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        for (index, brancher) in self.branchers.iter().enumerate() {
            brancher.log_statistics(statistic_logger.attach_to_prefix(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::FirstFail;
    use crate::engine::Domains;

    #[test]
    fn branchers_are_consulted_in_order() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);
        let y = domains.new_bounded_integer(0, 1);
        let branchers: Vec<Box<dyn Brancher<Domains>>> =
            vec![Box::new(FirstFail::new(&[y])), Box::new(FirstFail::new(&[x]))];
        let mut brancher = Sequence::new(domains.state_manager_mut(), branchers);

        let _ = domains.state_manager_mut().checkpoint();
        let assign_y = brancher
            .branch(&mut domains)
            .into_iter()
            .next()
            .expect("y is unfixed");
        assert_eq!(Ok(()), assign_y.execute(&mut domains));
        assert_eq!(Some(0), domains.value(y));

        let assign_x = brancher
            .branch(&mut domains)
            .into_iter()
            .next()
            .expect("x is unfixed");
        assert_eq!(Ok(()), assign_x.execute(&mut domains));
        assert!(brancher.branch(&mut domains).is_empty());
    }

    #[test]
    fn exhausted_branchers_are_revisited_after_backtracking() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);
        let y = domains.new_bounded_integer(0, 1);
        let branchers: Vec<Box<dyn Brancher<Domains>>> =
            vec![Box::new(FirstFail::new(&[x])), Box::new(FirstFail::new(&[y]))];
        let mut brancher = Sequence::new(domains.state_manager_mut(), branchers);

        let _ = domains.state_manager_mut().checkpoint();
        domains.assign(x, 1).expect("1 is in the domain");
        // the first brancher is exhausted, the sequence moves on to y
        assert_eq!(2, brancher.branch(&mut domains).len());
        assert_eq!(1, domains.state_manager().get_int(brancher.current));

        domains.state_manager_mut().restore_to_checkpoint();
        assert_eq!(0, domains.state_manager().get_int(brancher.current));

        let assign_x = brancher
            .branch(&mut domains)
            .into_iter()
            .next()
            .expect("x is unfixed again");
        assert_eq!(Ok(()), assign_x.execute(&mut domains));
        assert_eq!(Some(0), domains.value(x));
        assert_eq!(None, domains.value(y));
    }
}
