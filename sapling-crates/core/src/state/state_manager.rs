use std::fmt::Display;

use log::trace;

use super::CellEntry;
use super::CellStrategy;
use super::ReversibleBool;
use super::ReversibleDouble;
use super::ReversibleInt;
use super::StateChange;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::sapling_assert_simple;

/// Identifies a checkpoint interval.
///
/// A fresh id is handed out by every [`StateManager::checkpoint`] and by every restore, so ids
/// strictly increase over the lifetime of a manager and an id is never reused for a different
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckpointId(u64);

impl CheckpointId {
    #[cfg(test)]
    pub(crate) const fn new(id: u64) -> Self {
        CheckpointId(id)
    }

    fn next(self) -> Self {
        CheckpointId(self.0 + 1)
    }
}

impl Display for CheckpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns reversible cells and the trail of undo records needed to roll them back.
///
/// Checkpoints nest: [`StateManager::restore_to_checkpoint`] always rolls back to the most recent
/// checkpoint which has not been restored yet. Restoring without an outstanding checkpoint is a
/// protocol violation and panics.
///
/// # Example
/// ```
/// # use sapling_core::state::StateManager;
/// let mut state = StateManager::default();
/// let counter = state.make_reversible_int(0);
///
/// let _ = state.checkpoint();
/// let _ = state.increment(counter);
/// let _ = state.increment(counter);
/// assert_eq!(state.get_int(counter), 2);
///
/// state.restore_to_checkpoint();
/// assert_eq!(state.get_int(counter), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct StateManager {
    default_strategy: CellStrategy,
    trail: Trail<StateChange>,
    current_id: CheckpointId,
    ints: KeyedVec<ReversibleInt, CellEntry<i64>>,
    doubles: KeyedVec<ReversibleDouble, CellEntry<f64>>,
}

impl Default for CheckpointId {
    fn default() -> Self {
        CheckpointId(0)
    }
}

impl StateManager {
    /// Creates a manager whose cells use `default_strategy` unless specified otherwise at creation.
    pub fn new(default_strategy: CellStrategy) -> Self {
        StateManager {
            default_strategy,
            ..Default::default()
        }
    }

    pub fn default_strategy(&self) -> CellStrategy {
        self.default_strategy
    }

    /// Opens a new checkpoint level and returns its id.
    pub fn checkpoint(&mut self) -> CheckpointId {
        self.current_id = self.current_id.next();
        self.trail.new_checkpoint();
        trace!(
            "checkpoint {} opened at level {}",
            self.current_id,
            self.level()
        );
        self.current_id
    }

    /// Undoes every mutation since the most recent outstanding checkpoint and closes it.
    ///
    /// # Panics
    /// If there is no outstanding checkpoint.
    pub fn restore_to_checkpoint(&mut self) {
        sapling_assert_simple!(
            self.level() > 0,
            "restore_to_checkpoint called without an outstanding checkpoint"
        );
        self.restore_to_level(self.level() - 1);
    }

    /// Closes checkpoints until `level` checkpoints remain outstanding, undoing every mutation made
    /// since then. Restoring to the current level does nothing.
    ///
    /// # Panics
    /// If `level` is deeper than the current level.
    pub fn restore_to_level(&mut self, level: usize) {
        sapling_assert_simple!(
            level <= self.level(),
            "cannot restore to level {level} while at level {}",
            self.level()
        );
        if level == self.level() {
            return;
        }

        for change in self.trail.synchronise(level) {
            match change {
                StateChange::Int { cell, old_value } => self.ints[cell].value = old_value,
                StateChange::Double { cell, old_value } => self.doubles[cell].value = old_value,
            }
        }
        self.current_id = self.current_id.next();
    }

    /// Closes every outstanding checkpoint.
    pub fn restore_all(&mut self) {
        self.restore_to_level(0);
    }

    /// Runs `body` inside a fresh checkpoint which is restored afterwards.
    pub fn with_new_checkpoint<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        let level = self.level();
        let _ = self.checkpoint();
        let result = body(self);
        self.restore_to_level(level);
        result
    }

    /// The id of the currently active checkpoint interval.
    pub fn current_id(&self) -> CheckpointId {
        self.current_id
    }

    /// The number of outstanding checkpoints.
    pub fn level(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// The number of undo records currently on the trail.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// The number of undo records pushed since the most recent checkpoint.
    pub fn trail_len_at_current_level(&self) -> usize {
        self.trail.values_at_checkpoint(self.level()).len()
    }

    pub fn make_reversible_int(&mut self, initial_value: i64) -> ReversibleInt {
        self.make_reversible_int_with_strategy(initial_value, self.default_strategy)
    }

    pub fn make_reversible_int_with_strategy(
        &mut self,
        initial_value: i64,
        strategy: CellStrategy,
    ) -> ReversibleInt {
        self.ints.push(CellEntry::new(initial_value, strategy))
    }

    pub fn make_reversible_double(&mut self, initial_value: f64) -> ReversibleDouble {
        self.make_reversible_double_with_strategy(initial_value, self.default_strategy)
    }

    pub fn make_reversible_double_with_strategy(
        &mut self,
        initial_value: f64,
        strategy: CellStrategy,
    ) -> ReversibleDouble {
        self.doubles.push(CellEntry::new(initial_value, strategy))
    }

    pub fn make_reversible_bool(&mut self, initial_value: bool) -> ReversibleBool {
        ReversibleBool(self.make_reversible_int(i64::from(initial_value)))
    }

    pub fn get_int(&self, cell: ReversibleInt) -> i64 {
        self.ints[cell].value
    }

    /// Writes `value` to `cell` and returns it.
    pub fn set_int(&mut self, cell: ReversibleInt, value: i64) -> i64 {
        let level = self.level();
        if let Some(old_value) = self.ints[cell].overwrite(value, self.current_id, level) {
            self.trail.push(StateChange::Int { cell, old_value });
        }
        value
    }

    pub fn increment(&mut self, cell: ReversibleInt) -> i64 {
        self.set_int(cell, self.get_int(cell) + 1)
    }

    pub fn decrement(&mut self, cell: ReversibleInt) -> i64 {
        self.set_int(cell, self.get_int(cell) - 1)
    }

    pub fn get_double(&self, cell: ReversibleDouble) -> f64 {
        self.doubles[cell].value
    }

    /// Writes `value` to `cell` and returns it.
    pub fn set_double(&mut self, cell: ReversibleDouble, value: f64) -> f64 {
        let level = self.level();
        if let Some(old_value) = self.doubles[cell].overwrite(value, self.current_id, level) {
            self.trail.push(StateChange::Double { cell, old_value });
        }
        value
    }

    pub fn get_bool(&self, cell: ReversibleBool) -> bool {
        self.get_int(cell.0) != 0
    }

    pub fn set_bool(&mut self, cell: ReversibleBool, value: bool) -> bool {
        let _ = self.set_int(cell.0, i64::from(value));
        value
    }
}
