use super::IntegerVariable;
use super::MarginalVariable;
use crate::containers::StorageKey;
use crate::engine::Domains;
use crate::engine::EmptyDomain;

/// A handle to an integer domain in [`Domains`].
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DomainId {
    pub(crate) id: u32,
}

impl DomainId {
    pub const fn new(id: u32) -> Self {
        DomainId { id }
    }
}

impl IntegerVariable for DomainId {
    fn lower_bound(&self, domains: &Domains) -> i32 {
        domains.lower_bound(*self)
    }

    fn upper_bound(&self, domains: &Domains) -> i32 {
        domains.upper_bound(*self)
    }

    fn size(&self, domains: &Domains) -> usize {
        domains.size(*self)
    }

    fn contains(&self, domains: &Domains, value: i32) -> bool {
        domains.contains(*self, value)
    }

    fn assign(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        domains.assign(*self, value)
    }

    fn remove(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        domains.remove(*self, value)
    }

    fn set_lower_bound(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        domains.set_lower_bound(*self, value)
    }

    fn set_upper_bound(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        domains.set_upper_bound(*self, value)
    }
}

impl MarginalVariable for DomainId {
    fn max_marginal(&self, domains: &Domains) -> f64 {
        domains.max_marginal(*self)
    }

    fn value_with_max_marginal(&self, domains: &Domains) -> i32 {
        domains.value_with_max_marginal(*self)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId::new(index as u32)
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
