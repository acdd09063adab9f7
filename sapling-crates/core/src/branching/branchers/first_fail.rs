use log::warn;

use crate::branching::BranchAction;
use crate::branching::Brancher;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainContext;

/// Branches on the leftmost unfixed variable, trying its smallest value first.
///
/// A node has two children: `x = v` and `x != v` where `v` is the lower bound of `x`. Both children
/// run [`DomainContext::propagate`] after applying their decision. A node in which every variable
/// is fixed is a solution.
#[derive(Debug, Clone)]
pub struct FirstFail<Var> {
    variables: Box<[Var]>,
}

impl<Var: Clone> FirstFail<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail brancher was not provided with any variables");
        }
        FirstFail {
            variables: variables.into(),
        }
    }
}

impl<Ctx, Var> Brancher<Ctx> for FirstFail<Var>
where
    Ctx: DomainContext + 'static,
    Var: IntegerVariable + 'static,
{
    fn branch(&mut self, context: &mut Ctx) -> Vec<BranchAction<Ctx>> {
        let domains = context.domains();
        let Some(&variable) = self
            .variables
            .iter()
            .find(|variable| variable.size(domains) > 1)
        else {
            return vec![];
        };
        let value = variable.lower_bound(domains);

        vec![
            BranchAction::new(move |context: &mut Ctx| {
                variable.assign(context.domains_mut(), value)?;
                context.propagate()
            }),
            BranchAction::new(move |context: &mut Ctx| {
                variable.remove(context.domains_mut(), value)?;
                context.propagate()
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Domains;

    #[test]
    fn leftmost_unfixed_variable_is_selected() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(3, 3);
        let y = domains.new_bounded_integer(1, 4);
        let z = domains.new_bounded_integer(0, 9);
        let mut brancher = FirstFail::new(&[x, y, z]);

        let actions = brancher.branch(&mut domains);
        assert_eq!(2, actions.len());

        let mut actions = actions.into_iter();
        let assign = actions.next().expect("two actions");
        assert_eq!(Ok(()), assign.execute(&mut domains));
        assert_eq!(Some(1), domains.value(y));
        assert_eq!(10, domains.size(z));
    }

    #[test]
    fn second_child_removes_the_value() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(1, 4);
        let mut brancher = FirstFail::new(&[x]);

        let remove = brancher
            .branch(&mut domains)
            .pop()
            .expect("two actions");

        assert_eq!(Ok(()), remove.execute(&mut domains));
        assert_eq!(vec![2, 3, 4], domains.iterate_domain(x).collect::<Vec<_>>());
    }

    #[test]
    fn fixed_variables_yield_a_solution() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 0);
        let y = domains.new_bounded_integer(5, 5);
        let mut brancher = FirstFail::new(&[x, y]);

        assert!(brancher.branch(&mut domains).is_empty());
    }

    #[test]
    fn no_variables_yields_a_solution() {
        let mut domains = Domains::default();
        let mut brancher = FirstFail::<crate::engine::variables::DomainId>::new(&[]);

        assert!(brancher.branch(&mut domains).is_empty());
    }
}
