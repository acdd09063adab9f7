//! # Sapling
//! Sapling is the search core of a constraint solver: a manager of reversible state together with
//! a depth-first search driver and composable branching strategies.
//!
//! The crate is organised around three pieces:
//! - the [`state::StateManager`], which owns reversible cells and restores them to their value at
//!   an earlier checkpoint;
//! - the [`branching::Brancher`], which defines the children of every node of the search tree;
//! - the [`search::DepthFirstSearch`], which explores that tree, taking a checkpoint before every
//!   branch action and restoring it afterwards.
//!
//! The search is generic over its context: any type implementing [`state::SearchContext`] can be
//! searched over. [`engine::Domains`] is a ready-made context of reversible integer domains on
//! which the heuristics in [`branching::branchers`] operate; a propagation engine can be plugged in
//! by implementing [`engine::DomainContext`] for a type which wraps it.
//!
//! # Enumerating solutions
//! ```rust
//! # use sapling_core::branching::branchers::FirstFail;
//! # use sapling_core::engine::Domains;
//! # use sapling_core::search::DepthFirstSearch;
//! # use sapling_core::termination::Indefinite;
//! let mut domains = Domains::default();
//! let x = domains.new_bounded_integer(0, 2);
//! let y = domains.new_bounded_integer(0, 2);
//!
//! let mut search = DepthFirstSearch::new(domains, FirstFail::new(&[x, y]));
//! search.on_solution(move |domains, _| {
//!     println!("x = {:?}, y = {:?}", domains.value(x), domains.value(y));
//! });
//!
//! let statistics = search.solve(&mut Indefinite);
//! assert_eq!(9, statistics.num_solutions());
//! ```
//!
//! # Limiting the search
//! A [`termination::TerminationCondition`] is polled at every node; when it triggers the search
//! unwinds, restores the state it started from, and reports that it did not complete.
//! ```rust
//! # use sapling_core::branching::branchers::FirstFail;
//! # use sapling_core::branching::branchers::LimitedDiscrepancy;
//! # use sapling_core::engine::Domains;
//! # use sapling_core::search::DepthFirstSearch;
//! # use sapling_core::state::SearchContext;
//! # use sapling_core::termination::SolutionBudget;
//! let mut domains = Domains::default();
//! let variables = (0..10)
//!     .map(|_| domains.new_bounded_integer(0, 1))
//!     .collect::<Vec<_>>();
//!
//! let brancher = LimitedDiscrepancy::new(
//!     domains.state_manager_mut(),
//!     FirstFail::new(&variables),
//!     2,
//! );
//! let mut search = DepthFirstSearch::new(domains, brancher);
//!
//! let statistics = search.solve(&mut SolutionBudget::new(5));
//! assert_eq!(5, statistics.num_solutions());
//! assert!(!statistics.is_completed());
//! assert_eq!(0, search.context().state_manager().level());
//! ```
#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub mod engine;
pub(crate) mod math;
pub mod state;

pub mod branching;
pub mod search;
pub mod statistics;
pub mod termination;

pub use convert_case;

pub use crate::basic_types::BranchResult;
pub use crate::basic_types::Inconsistency;
pub use crate::search::DepthFirstSearch;
pub use crate::search::SearchStatistics;
pub use crate::state::StateManager;
