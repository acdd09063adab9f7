use sapling_core::engine::variables::DomainId;
use sapling_core::engine::DomainContext;
use sapling_core::engine::Domains;
use sapling_core::state::CellStrategy;
use sapling_core::state::SearchContext;
use sapling_core::state::StateManager;

/// `n` unconstrained 0/1 variables; every assignment is a solution.
#[derive(Debug, Clone)]
pub struct Binary {
    domains: Domains,
    variables: Vec<DomainId>,
}

impl Binary {
    pub fn new(n: usize, strategy: CellStrategy) -> Self {
        let mut domains = Domains::new(strategy);
        let variables = (0..n)
            .map(|_| domains.new_bounded_integer(0, 1))
            .collect();
        Binary { domains, variables }
    }

    pub fn variables(&self) -> &[DomainId] {
        &self.variables
    }
}

impl SearchContext for Binary {
    fn state_manager(&self) -> &StateManager {
        self.domains.state_manager()
    }

    fn state_manager_mut(&mut self) -> &mut StateManager {
        self.domains.state_manager_mut()
    }
}

impl DomainContext for Binary {
    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn domains_mut(&mut self) -> &mut Domains {
        &mut self.domains
    }
}

#[cfg(test)]
mod tests {
    use sapling_core::branching::branchers::FirstFail;
    use sapling_core::search::DepthFirstSearch;
    use sapling_core::termination::Indefinite;

    use super::*;

    #[test]
    fn every_assignment_is_a_solution() {
        let model = Binary::new(5, CellStrategy::Copy);
        let brancher = FirstFail::new(model.variables());
        let mut search = DepthFirstSearch::new(model, brancher);

        let statistics = search.solve(&mut Indefinite);

        assert_eq!(32, statistics.num_solutions());
        assert_eq!(62, statistics.num_nodes());
    }
}
