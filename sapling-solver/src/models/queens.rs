use sapling_core::engine::variables::DomainId;
use sapling_core::engine::DomainContext;
use sapling_core::engine::Domains;
use sapling_core::state::CellStrategy;
use sapling_core::state::SearchContext;
use sapling_core::state::StateManager;
use sapling_core::BranchResult;

/// The n-queens problem: one queen per column, `queens[i]` is the row of the queen in column `i`,
/// and no two queens share a row or a diagonal.
///
/// Propagation is forward checking: every fixed queen removes the rows it attacks from the domains
/// of the other queens, until no domain changes.
#[derive(Debug, Clone)]
pub struct Queens {
    domains: Domains,
    queens: Vec<DomainId>,
}

impl Queens {
    pub fn new(n: usize, strategy: CellStrategy) -> Self {
        let mut domains = Domains::new(strategy);
        let max_row = n as i32 - 1;
        let queens = (0..n)
            .map(|_| domains.new_bounded_integer(0, max_row))
            .collect();
        Queens { domains, queens }
    }

    pub fn queens(&self) -> &[DomainId] {
        &self.queens
    }

    fn total_domain_size(&self) -> usize {
        self.queens
            .iter()
            .map(|&queen| self.domains.size(queen))
            .sum()
    }
}

impl SearchContext for Queens {
    fn state_manager(&self) -> &StateManager {
        self.domains.state_manager()
    }

    fn state_manager_mut(&mut self) -> &mut StateManager {
        self.domains.state_manager_mut()
    }
}

impl DomainContext for Queens {
    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn domains_mut(&mut self) -> &mut Domains {
        &mut self.domains
    }

    fn propagate(&mut self) -> BranchResult {
        loop {
            let size_before = self.total_domain_size();

            for (column, &queen) in self.queens.iter().enumerate() {
                let Some(row) = self.domains.value(queen) else {
                    continue;
                };
                for (other_column, &other) in self.queens.iter().enumerate() {
                    if other_column == column {
                        continue;
                    }
                    let distance = column.abs_diff(other_column) as i32;
                    self.domains.remove(other, row)?;
                    self.domains.remove(other, row - distance)?;
                    self.domains.remove(other, row + distance)?;
                }
            }

            if self.total_domain_size() == size_before {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sapling_core::branching::branchers::FirstFail;
    use sapling_core::branching::branchers::MaxMarginalStrength;
    use sapling_core::search::DepthFirstSearch;
    use sapling_core::termination::Indefinite;
    use sapling_core::Inconsistency;

    use super::*;

    fn attacks(rows: &[i32]) -> bool {
        (0..rows.len()).any(|i| {
            (i + 1..rows.len()).any(|j| {
                rows[i] == rows[j] || rows[i].abs_diff(rows[j]) as usize == j - i
            })
        })
    }

    #[test]
    fn eight_queens_has_92_solutions() {
        let model = Queens::new(8, CellStrategy::Trail);
        let brancher = FirstFail::new(model.queens());
        let mut search = DepthFirstSearch::new(model, brancher);
        search.on_solution(|model: &Queens, _| {
            let rows = model.domains().solution().expect("all queens are placed");
            assert!(!attacks(&rows));
        });

        let statistics = search.solve(&mut Indefinite);

        assert_eq!(92, statistics.num_solutions());
        assert!(statistics.is_completed());
    }

    #[test]
    fn heuristics_and_strategies_agree_on_the_number_of_solutions() {
        for strategy in [CellStrategy::Trail, CellStrategy::Copy] {
            let model = Queens::new(6, strategy);
            let brancher = MaxMarginalStrength::new(model.queens());
            let mut search = DepthFirstSearch::new(model, brancher);

            assert_eq!(4, search.solve(&mut Indefinite).num_solutions());
        }
    }

    #[test]
    fn three_queens_is_infeasible() {
        let model = Queens::new(3, CellStrategy::Trail);
        let brancher = FirstFail::new(model.queens());
        let mut search = DepthFirstSearch::new(model, brancher);

        let statistics = search.solve(&mut Indefinite);

        assert_eq!(0, statistics.num_solutions());
        assert!(statistics.num_failures() > 0);
    }

    #[test]
    fn placing_a_queen_prunes_the_attacked_rows() {
        let mut model = Queens::new(4, CellStrategy::Trail);
        let queens = model.queens().to_vec();

        model
            .domains_mut()
            .assign(queens[0], 0)
            .expect("0 is in the domain");
        assert_eq!(Ok(()), model.propagate());

        assert_eq!(
            vec![2, 3],
            model.domains().iterate_domain(queens[1]).collect::<Vec<_>>()
        );
        assert_eq!(
            vec![1, 3],
            model.domains().iterate_domain(queens[2]).collect::<Vec<_>>()
        );
        assert_eq!(
            vec![1, 2],
            model.domains().iterate_domain(queens[3]).collect::<Vec<_>>()
        );
    }

    #[test]
    fn conflicting_queens_are_detected() {
        let mut model = Queens::new(4, CellStrategy::Trail);
        let queens = model.queens().to_vec();

        model
            .domains_mut()
            .assign(queens[0], 1)
            .expect("1 is in the domain");
        model
            .domains_mut()
            .assign(queens[1], 2)
            .expect("2 is in the domain");

        assert_eq!(Err(Inconsistency::EmptyDomain), model.propagate());
    }
}
