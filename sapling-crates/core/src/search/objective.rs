use log::debug;

use crate::basic_types::BranchResult;
use crate::basic_types::Inconsistency;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainContext;

/// An objective for [`DepthFirstSearch::optimise`](super::DepthFirstSearch::optimise).
///
/// Whenever a solution is found the objective is tightened to the value of that solution; from then
/// on every node must be able to improve on it, which the search checks by calling
/// [`Objective::filter`] after each successful branch action.
pub trait Objective<Ctx> {
    /// Restricts the context to states which improve on the best solution found so far.
    fn filter(&mut self, context: &mut Ctx) -> BranchResult;

    /// Records the solution in `context` as the new best solution.
    fn tighten(&mut self, context: &Ctx);
}

/// The objective of a satisfaction search: every solution is as good as any other.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Satisfaction;

impl<Ctx> Objective<Ctx> for Satisfaction {
    fn filter(&mut self, _context: &mut Ctx) -> BranchResult {
        Ok(())
    }

    fn tighten(&mut self, _context: &Ctx) {}
}

/// Minimises the value of a variable.
#[derive(Debug, Clone, Copy)]
pub struct Minimise<Var> {
    variable: Var,
    best: Option<i32>,
}

impl<Var> Minimise<Var> {
    pub fn new(variable: Var) -> Self {
        Minimise {
            variable,
            best: None,
        }
    }

    /// The value of the best solution found so far.
    pub fn best(&self) -> Option<i32> {
        self.best
    }
}

impl<Ctx: DomainContext, Var: IntegerVariable> Objective<Ctx> for Minimise<Var> {
    fn filter(&mut self, context: &mut Ctx) -> BranchResult {
        let Some(best) = self.best else {
            return Ok(());
        };
        let bound = best.checked_sub(1).ok_or(Inconsistency::Conflict)?;
        self.variable.set_upper_bound(context.domains_mut(), bound)?;
        Ok(())
    }

    fn tighten(&mut self, context: &Ctx) {
        let value = self.variable.lower_bound(context.domains());
        debug!("Found a solution with objective value {value}");
        self.best = Some(value);
    }
}

/// Maximises the value of a variable.
#[derive(Debug, Clone, Copy)]
pub struct Maximise<Var> {
    variable: Var,
    best: Option<i32>,
}

impl<Var> Maximise<Var> {
    pub fn new(variable: Var) -> Self {
        Maximise {
            variable,
            best: None,
        }
    }

    /// The value of the best solution found so far.
    pub fn best(&self) -> Option<i32> {
        self.best
    }
}

impl<Ctx: DomainContext, Var: IntegerVariable> Objective<Ctx> for Maximise<Var> {
    fn filter(&mut self, context: &mut Ctx) -> BranchResult {
        let Some(best) = self.best else {
            return Ok(());
        };
        let bound = best.checked_add(1).ok_or(Inconsistency::Conflict)?;
        self.variable.set_lower_bound(context.domains_mut(), bound)?;
        Ok(())
    }

    fn tighten(&mut self, context: &Ctx) {
        let value = self.variable.upper_bound(context.domains());
        debug!("Found a solution with objective value {value}");
        self.best = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Domains;
    use crate::state::SearchContext;

    #[test]
    fn minimise_excludes_values_which_do_not_improve() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 10);
        let mut objective = Minimise::new(x);

        assert_eq!(Ok(()), objective.filter(&mut domains));
        assert_eq!(10, domains.upper_bound(x));

        domains.set_lower_bound(x, 6).expect("non-empty");
        objective.tighten(&domains);
        assert_eq!(Some(6), objective.best());

        assert_eq!(Err(Inconsistency::EmptyDomain), objective.filter(&mut domains));
    }

    #[test]
    fn maximise_raises_the_lower_bound() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 10);
        let mut objective = Maximise::new(x);

        let _ = domains.state_manager_mut().checkpoint();
        domains.set_upper_bound(x, 4).expect("non-empty");
        objective.tighten(&domains);
        domains.state_manager_mut().restore_to_checkpoint();

        assert_eq!(Ok(()), objective.filter(&mut domains));
        assert_eq!(5, domains.lower_bound(x));
    }

    #[test]
    fn no_improvement_beyond_the_representable_range() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(i32::MIN, i32::MIN + 1);
        let mut objective = Minimise::new(x);

        domains.assign(x, i32::MIN).expect("in the domain");
        objective.tighten(&domains);

        assert_eq!(Err(Inconsistency::Conflict), objective.filter(&mut domains));
    }
}
