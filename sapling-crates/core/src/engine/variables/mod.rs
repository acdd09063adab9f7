//! Variables over which the branching heuristics are defined.
mod affine_view;
mod domain_id;

use std::fmt::Debug;

pub use affine_view::AffineView;
pub use domain_id::DomainId;

use super::Domains;
use super::EmptyDomain;

/// The capabilities a branching heuristic needs from an integer variable: querying its domain and
/// applying decisions to it.
pub trait IntegerVariable: Copy + Debug {
    fn lower_bound(&self, domains: &Domains) -> i32;

    fn upper_bound(&self, domains: &Domains) -> i32;

    fn size(&self, domains: &Domains) -> usize;

    fn contains(&self, domains: &Domains, value: i32) -> bool;

    fn is_fixed(&self, domains: &Domains) -> bool {
        self.size(domains) == 1
    }

    fn assign(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain>;

    fn remove(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain>;

    fn set_lower_bound(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain>;

    fn set_upper_bound(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain>;
}

/// A variable whose values carry a marginal, i.e. an estimate of how likely the value is to be part
/// of a solution.
pub trait MarginalVariable: IntegerVariable {
    /// The largest marginal among the values in the domain.
    fn max_marginal(&self, domains: &Domains) -> f64;

    /// The value in the domain with the largest marginal.
    fn value_with_max_marginal(&self, domains: &Domains) -> i32;
}
