use log::debug;

use crate::branching::BranchAction;
use crate::branching::Brancher;
use crate::create_statistics_struct;
use crate::state::ReversibleInt;
use crate::state::SearchContext;
use crate::state::StateManager;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// The statistics of the [`LimitedDiscrepancy`] brancher.
    LimitedDiscrepancyStatistics {
        /// The number of children which were discarded because they exceeded the budget
        num_pruned_branches: u64,
    }
);

/// Restricts the tree of another brancher to the paths which deviate from its preferred order at
/// most `budget` times.
///
/// Taking the `i`-th child of a node (counting from 0) costs `i` discrepancies; a child is only
/// explored if the discrepancies spent on the path to the node plus its own cost stay within the
/// budget. For binary branchers this means that once the budget is spent only the leftmost child
/// is followed. The spent discrepancies are kept in a reversible cell, so they are refunded on
/// backtracking.
#[derive(Debug)]
pub struct LimitedDiscrepancy<B> {
    brancher: B,
    budget: u32,
    discrepancy: ReversibleInt,
    statistics: LimitedDiscrepancyStatistics,
}

impl<B> LimitedDiscrepancy<B> {
    pub fn new(state: &mut StateManager, brancher: B, budget: u32) -> Self {
        LimitedDiscrepancy {
            brancher,
            budget,
            discrepancy: state.make_reversible_int(0),
            statistics: LimitedDiscrepancyStatistics::default(),
        }
    }

    /// The discrepancies spent on the current path.
    pub fn discrepancy(&self, state: &StateManager) -> u32 {
        state.get_int(self.discrepancy) as u32
    }

    pub fn statistics(&self) -> LimitedDiscrepancyStatistics {
        self.statistics
    }
}

impl<Ctx, B> Brancher<Ctx> for LimitedDiscrepancy<B>
where
    Ctx: SearchContext + 'static,
    B: Brancher<Ctx>,
{
    fn branch(&mut self, context: &mut Ctx) -> Vec<BranchAction<Ctx>> {
        let spent = context.state_manager().get_int(self.discrepancy);
        let remaining = (i64::from(self.budget) - spent) as usize;

        let actions = self.brancher.branch(context);
        let num_actions = actions.len();

        let cell = self.discrepancy;
        let allowed = actions
            .into_iter()
            .take(remaining + 1)
            .enumerate()
            .map(|(index, action)| {
                action.preceded_by(move |context: &mut Ctx| {
                    let _ = context
                        .state_manager_mut()
                        .set_int(cell, spent + index as i64);
                })
            })
            .collect::<Vec<_>>();

        let num_pruned = num_actions - allowed.len();
        if num_pruned > 0 {
            debug!("Discrepancy budget exhausted, pruning {num_pruned} branches");
        }
        self.statistics.num_pruned_branches += num_pruned as u64;

        allowed
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger.clone());
        self.brancher
            .log_statistics(statistic_logger.attach_to_prefix("inner"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::FirstFail;
    use crate::engine::variables::DomainId;
    use crate::engine::Domains;

    /// One child per value of the leftmost unfixed variable, smallest value first.
    struct Ternary {
        variables: Vec<DomainId>,
    }

    impl Brancher<Domains> for Ternary {
        fn branch(&mut self, domains: &mut Domains) -> Vec<BranchAction<Domains>> {
            let Some(&variable) = self
                .variables
                .iter()
                .find(|&&variable| !domains.is_fixed(variable))
            else {
                return vec![];
            };
            domains
                .iterate_domain(variable)
                .collect::<Vec<_>>()
                .into_iter()
                .map(|value| {
                    BranchAction::new(move |domains: &mut Domains| {
                        domains.assign(variable, value)?;
                        Ok(())
                    })
                })
                .collect()
        }
    }

    #[test]
    fn the_ith_child_costs_i_discrepancies() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 2);
        let mut brancher = LimitedDiscrepancy::new(
            domains.state_manager_mut(),
            Ternary { variables: vec![x] },
            2,
        );

        let _ = domains.state_manager_mut().checkpoint();
        let mut actions = brancher.branch(&mut domains);
        assert_eq!(3, actions.len());
        let last = actions.pop().expect("three actions");
        assert_eq!(Ok(()), last.execute(&mut domains));
        assert_eq!(2, brancher.discrepancy(domains.state_manager()));

        domains.state_manager_mut().restore_to_checkpoint();
        let _ = domains.state_manager_mut().checkpoint();
        let middle = brancher.branch(&mut domains).remove(1);
        assert_eq!(Ok(()), middle.execute(&mut domains));
        assert_eq!(1, brancher.discrepancy(domains.state_manager()));
    }

    #[test]
    fn one_spent_discrepancy_keeps_the_first_two_children() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 2);
        let y = domains.new_bounded_integer(0, 2);
        let mut brancher = LimitedDiscrepancy::new(
            domains.state_manager_mut(),
            Ternary {
                variables: vec![x, y],
            },
            2,
        );

        let _ = domains.state_manager_mut().checkpoint();
        let middle = brancher.branch(&mut domains).remove(1);
        assert_eq!(Ok(()), middle.execute(&mut domains));
        assert_eq!(1, brancher.discrepancy(domains.state_manager()));

        let _ = domains.state_manager_mut().checkpoint();
        let actions = brancher.branch(&mut domains);
        assert_eq!(2, actions.len());
        assert_eq!(1, brancher.statistics().num_pruned_branches);

        let second = actions.into_iter().nth(1).expect("two actions");
        assert_eq!(Ok(()), second.execute(&mut domains));
        assert_eq!(Some(1), domains.value(y));
        assert_eq!(2, brancher.discrepancy(domains.state_manager()));
    }

    #[test]
    fn children_beyond_the_budget_are_pruned() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);
        let y = domains.new_bounded_integer(0, 1);
        let mut brancher =
            LimitedDiscrepancy::new(domains.state_manager_mut(), FirstFail::new(&[x, y]), 1);

        let _ = domains.state_manager_mut().checkpoint();
        let remove_x = brancher.branch(&mut domains).pop().expect("two actions");
        assert_eq!(Ok(()), remove_x.execute(&mut domains));
        assert_eq!(1, brancher.discrepancy(domains.state_manager()));

        let _ = domains.state_manager_mut().checkpoint();
        let actions = brancher.branch(&mut domains);
        assert_eq!(1, actions.len());
        assert_eq!(1, brancher.statistics().num_pruned_branches);
    }

    #[test]
    fn spent_discrepancies_are_refunded_on_restore() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);
        let mut brancher =
            LimitedDiscrepancy::new(domains.state_manager_mut(), FirstFail::new(&[x]), 3);

        let _ = domains.state_manager_mut().checkpoint();
        let remove_x = brancher.branch(&mut domains).pop().expect("two actions");
        assert_eq!(Ok(()), remove_x.execute(&mut domains));
        assert_eq!(1, brancher.discrepancy(domains.state_manager()));

        domains.state_manager_mut().restore_to_checkpoint();
        assert_eq!(0, brancher.discrepancy(domains.state_manager()));
    }

    #[test]
    fn zero_budget_follows_the_leftmost_path() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 3);
        let mut brancher =
            LimitedDiscrepancy::new(domains.state_manager_mut(), FirstFail::new(&[x]), 0);

        assert_eq!(1, brancher.branch(&mut domains).len());
        assert_eq!(0, brancher.discrepancy(domains.state_manager()));
    }
}
