use super::variables::AffineView;
use super::variables::DomainId;
use super::DomainError;
use super::EmptyDomain;
use crate::basic_types::BranchResult;
use crate::containers::KeyedVec;
use crate::sapling_assert_simple;
use crate::state::CellStrategy;
use crate::state::ReversibleDouble;
use crate::state::ReversibleSparseSet;
use crate::state::SearchContext;
use crate::state::StateManager;

/// A context which exposes integer domains to the branching heuristics.
///
/// Heuristic branch actions apply their decision to [`DomainContext::domains_mut`] and then call
/// [`DomainContext::propagate`]; a propagation engine implements the latter to compute the
/// consequences of the decision, returning an [`Inconsistency`](crate::Inconsistency) when the
/// decision turns out to be infeasible.
pub trait DomainContext: SearchContext {
    fn domains(&self) -> &Domains;

    fn domains_mut(&mut self) -> &mut Domains;

    fn propagate(&mut self) -> BranchResult {
        Ok(())
    }
}

/// A store of reversible integer domains.
///
/// Every domain is a [`ReversibleSparseSet`] living in the [`StateManager`] owned by the store, and
/// every value of a domain carries a reversible marginal which a probabilistic reasoning layer can
/// maintain. Operations which would empty a domain leave it untouched and report [`EmptyDomain`].
#[derive(Debug, Default, Clone)]
pub struct Domains {
    state: StateManager,
    domains: KeyedVec<DomainId, IntegerDomain>,
}

#[derive(Debug, Clone)]
struct IntegerDomain {
    values: ReversibleSparseSet,
    /// The marginal of value `initial_lower_bound + i` is stored at index `i`
    marginals: Vec<ReversibleDouble>,
    initial_lower_bound: i32,
    initial_upper_bound: i32,
}

/// The largest number of values a single domain can hold; every value owns a slot in the sparse set
/// and a marginal cell.
pub const MAX_DOMAIN_SIZE: u32 = 1 << 24;

impl Domains {
    pub fn new(strategy: CellStrategy) -> Self {
        Domains::with_state_manager(StateManager::new(strategy))
    }

    pub fn with_state_manager(state: StateManager) -> Self {
        Domains {
            state,
            domains: KeyedVec::default(),
        }
    }

    /// Creates a variable with the domain `[lower_bound, upper_bound]`. Every value starts with a
    /// uniform marginal.
    ///
    /// # Panics
    /// If the domain is empty or holds more than [`MAX_DOMAIN_SIZE`] values; see
    /// [`Domains::try_new_bounded_integer`] for the fallible version.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        sapling_assert_simple!(
            lower_bound <= upper_bound,
            "the domain [{lower_bound}, {upper_bound}] is empty"
        );
        sapling_assert_simple!(
            Self::domain_size(lower_bound, upper_bound) <= u64::from(MAX_DOMAIN_SIZE),
            "the domain [{lower_bound}, {upper_bound}] has more than {MAX_DOMAIN_SIZE} values"
        );

        self.create_domain(lower_bound, upper_bound)
    }

    /// Creates a variable with the domain `[lower_bound, upper_bound]`, failing with
    /// [`DomainError::DomainTooLarge`] instead of allocating a domain with more than
    /// [`MAX_DOMAIN_SIZE`] values.
    ///
    /// # Panics
    /// If the domain is empty.
    pub fn try_new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, DomainError> {
        sapling_assert_simple!(
            lower_bound <= upper_bound,
            "the domain [{lower_bound}, {upper_bound}] is empty"
        );
        if Self::domain_size(lower_bound, upper_bound) > u64::from(MAX_DOMAIN_SIZE) {
            return Err(DomainError::DomainTooLarge {
                lower_bound,
                upper_bound,
                max_size: MAX_DOMAIN_SIZE,
            });
        }

        Ok(self.create_domain(lower_bound, upper_bound))
    }

    fn domain_size(lower_bound: i32, upper_bound: i32) -> u64 {
        (i64::from(upper_bound) - i64::from(lower_bound) + 1) as u64
    }

    fn create_domain(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let values = ReversibleSparseSet::new(&mut self.state, lower_bound, upper_bound);
        let size = Self::domain_size(lower_bound, upper_bound) as usize;
        let uniform = 1.0 / size as f64;
        let marginals = (0..size)
            .map(|_| self.state.make_reversible_double(uniform))
            .collect();

        self.domains.push(IntegerDomain {
            values,
            marginals,
            initial_lower_bound: lower_bound,
            initial_upper_bound: upper_bound,
        })
    }

    /// Creates the view `scale * variable + offset`.
    ///
    /// Fails with [`DomainError::IntegerOverflow`] if the bounds of the view are not representable.
    pub fn affine_view(
        &self,
        variable: DomainId,
        scale: i32,
        offset: i32,
    ) -> Result<AffineView, DomainError> {
        AffineView::new(variable, scale, offset, self)
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    /// All variables in the order in which they were created.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    pub fn lower_bound(&self, variable: DomainId) -> i32 {
        self.domains[variable].values.min(&self.state)
    }

    pub fn upper_bound(&self, variable: DomainId) -> i32 {
        self.domains[variable].values.max(&self.state)
    }

    /// The lower bound `variable` was created with; no restore can take it below this value.
    pub fn initial_lower_bound(&self, variable: DomainId) -> i32 {
        self.domains[variable].initial_lower_bound
    }

    /// The upper bound `variable` was created with; no restore can take it above this value.
    pub fn initial_upper_bound(&self, variable: DomainId) -> i32 {
        self.domains[variable].initial_upper_bound
    }

    pub fn size(&self, variable: DomainId) -> usize {
        self.domains[variable].values.size(&self.state)
    }

    pub fn is_fixed(&self, variable: DomainId) -> bool {
        self.size(variable) == 1
    }

    pub fn contains(&self, variable: DomainId, value: i32) -> bool {
        self.domains[variable].values.contains(&self.state, value)
    }

    /// The assigned value of `variable`, if it is fixed.
    pub fn value(&self, variable: DomainId) -> Option<i32> {
        self.is_fixed(variable).then(|| self.lower_bound(variable))
    }

    /// The values of all variables in the order in which they were created, if every variable is
    /// fixed.
    pub fn solution(&self) -> Option<Vec<i32>> {
        self.get_domains()
            .map(|variable| self.value(variable))
            .collect()
    }

    /// The values of the domain in increasing order.
    pub fn iterate_domain(&self, variable: DomainId) -> impl Iterator<Item = i32> + '_ {
        (self.lower_bound(variable)..=self.upper_bound(variable))
            .filter(move |&value| self.contains(variable, value))
    }

    pub fn assign(&mut self, variable: DomainId, value: i32) -> Result<(), EmptyDomain> {
        if !self.contains(variable, value) {
            return Err(EmptyDomain);
        }
        self.domains[variable]
            .values
            .remove_all_but(&mut self.state, value);
        Ok(())
    }

    pub fn remove(&mut self, variable: DomainId, value: i32) -> Result<(), EmptyDomain> {
        if !self.contains(variable, value) {
            return Ok(());
        }
        if self.is_fixed(variable) {
            return Err(EmptyDomain);
        }
        let _ = self.domains[variable]
            .values
            .remove(&mut self.state, value);
        Ok(())
    }

    pub fn set_lower_bound(&mut self, variable: DomainId, value: i32) -> Result<(), EmptyDomain> {
        if value > self.upper_bound(variable) {
            return Err(EmptyDomain);
        }
        self.domains[variable]
            .values
            .remove_below(&mut self.state, value);
        Ok(())
    }

    pub fn set_upper_bound(&mut self, variable: DomainId, value: i32) -> Result<(), EmptyDomain> {
        if value < self.lower_bound(variable) {
            return Err(EmptyDomain);
        }
        self.domains[variable]
            .values
            .remove_above(&mut self.state, value);
        Ok(())
    }

    /// Sets the marginal of `value` for `variable`; reverted on backtracking like any other cell.
    pub fn set_marginal(&mut self, variable: DomainId, value: i32, marginal: f64) {
        let cell = self.marginal_cell(variable, value);
        let _ = self.state.set_double(cell, marginal);
    }

    pub fn marginal(&self, variable: DomainId, value: i32) -> f64 {
        self.state.get_double(self.marginal_cell(variable, value))
    }

    /// The largest marginal among the values still in the domain of `variable`.
    pub fn max_marginal(&self, variable: DomainId) -> f64 {
        self.marginal(variable, self.value_with_max_marginal(variable))
    }

    /// The value of the domain with the largest marginal; the smallest such value on ties.
    pub fn value_with_max_marginal(&self, variable: DomainId) -> i32 {
        let mut best = self.lower_bound(variable);
        for value in self.iterate_domain(variable) {
            if self.marginal(variable, value) > self.marginal(variable, best) {
                best = value;
            }
        }
        best
    }

    fn marginal_cell(&self, variable: DomainId, value: i32) -> ReversibleDouble {
        let domain = &self.domains[variable];
        let index = i64::from(value) - i64::from(domain.initial_lower_bound);
        sapling_assert_simple!(
            (0..domain.marginals.len() as i64).contains(&index),
            "{value} was never part of the domain of {variable}"
        );
        domain.marginals[index as usize]
    }
}

impl SearchContext for Domains {
    fn state_manager(&self) -> &StateManager {
        &self.state
    }

    fn state_manager_mut(&mut self) -> &mut StateManager {
        &mut self.state
    }
}

impl DomainContext for Domains {
    fn domains(&self) -> &Domains {
        self
    }

    fn domains_mut(&mut self) -> &mut Domains {
        self
    }
}
