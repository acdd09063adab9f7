//! The reversible-state manager.
//!
//! A [`StateManager`] owns a set of reversible cells and a trail of undo records. Taking a
//! checkpoint with [`StateManager::checkpoint`] opens a new level; every cell mutated afterwards
//! records its prior value (once per level for [`CellStrategy::Trail`] cells, on every mutation for
//! [`CellStrategy::Copy`] cells), and [`StateManager::restore_to_checkpoint`] puts all of those cells
//! back to their value as of the checkpoint.
//!
//! Cells are handed out as lightweight handles ([`ReversibleInt`], [`ReversibleDouble`],
//! [`ReversibleBool`]); every read and write goes through the manager which created them.
mod reversible_cells;
mod reversible_sparse_set;
mod state_change;
mod state_manager;

pub use reversible_cells::*;
pub use reversible_sparse_set::*;
pub(crate) use state_change::*;
pub use state_manager::*;

/// A structure which owns the [`StateManager`] of a search.
///
/// The search driver uses this to take and restore checkpoints around every branch action, and
/// stateful branchers use it to read and write their own reversible cells.
pub trait SearchContext {
    fn state_manager(&self) -> &StateManager;

    fn state_manager_mut(&mut self) -> &mut StateManager;
}

impl SearchContext for StateManager {
    fn state_manager(&self) -> &StateManager {
        self
    }

    fn state_manager_mut(&mut self) -> &mut StateManager {
        self
    }
}
