use log::warn;

use crate::branching::select_min;
use crate::branching::BranchAction;
use crate::branching::Brancher;
use crate::engine::variables::MarginalVariable;
use crate::engine::DomainContext;

/// Branches on the value whose marginal stands out the most from a uniform distribution over its
/// domain.
///
/// The strength of a variable `x` is `max_marginal(x) - 1 / |D(x)|`; the unfixed variable with the
/// largest strength is selected (the leftmost one on ties), and the children are `x = v` and
/// `x != v` for the value `v` with the largest marginal.
#[derive(Debug, Clone)]
pub struct MaxMarginalStrength<Var> {
    variables: Box<[Var]>,
}

impl<Var: Clone> MaxMarginalStrength<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The MaxMarginalStrength brancher was not provided with any variables");
        }
        MaxMarginalStrength {
            variables: variables.into(),
        }
    }
}

impl<Ctx, Var> Brancher<Ctx> for MaxMarginalStrength<Var>
where
    Ctx: DomainContext + 'static,
    Var: MarginalVariable + 'static,
{
    fn branch(&mut self, context: &mut Ctx) -> Vec<BranchAction<Ctx>> {
        let domains = context.domains();
        let Some(variable) = select_min(
            self.variables.iter().copied(),
            |variable| variable.size(domains) > 1,
            |variable| -(variable.max_marginal(domains) - 1.0 / variable.size(domains) as f64),
        ) else {
            return vec![];
        };
        let value = variable.value_with_max_marginal(domains);

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
    fn strongest_variable_and_value_are_selected() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);
        let y = domains.new_bounded_integer(0, 3);
        // strength of x is 0.6 - 0.5, strength of y is 0.4 - 0.25
        domains.set_marginal(x, 0, 0.4);
        domains.set_marginal(x, 1, 0.6);
        domains.set_marginal(y, 0, 0.2);
        domains.set_marginal(y, 1, 0.2);
        domains.set_marginal(y, 2, 0.4);
        domains.set_marginal(y, 3, 0.2);
        let mut brancher = MaxMarginalStrength::new(&[x, y]);

        let assign = brancher
            .branch(&mut domains)
            .into_iter()
            .next()
            .expect("two actions");

        assert_eq!(Ok(()), assign.execute(&mut domains));
        assert_eq!(Some(2), domains.value(y));
        assert_eq!(2, domains.size(x));
    }

    #[test]
    fn uniform_marginals_select_the_leftmost_variable() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 2);
        let y = domains.new_bounded_integer(0, 2);
        let mut brancher = MaxMarginalStrength::new(&[x, y]);

        let remove = brancher.branch(&mut domains).pop().expect("two actions");

        assert_eq!(Ok(()), remove.execute(&mut domains));
        assert_eq!(vec![1, 2], domains.iterate_domain(x).collect::<Vec<_>>());
        assert_eq!(3, domains.size(y));
    }

    #[test]
    fn fixed_variables_are_skipped() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);
        domains.set_marginal(x, 1, 1.0);
        domains.assign(x, 1).expect("1 is in the domain");
        let mut brancher = MaxMarginalStrength::new(&[x]);

        assert!(brancher.branch(&mut domains).is_empty());
    }
}
