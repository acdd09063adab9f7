use super::CheckpointId;
use crate::containers::StorageKey;

/// How a reversible cell records its prior value.
///
/// Both strategies restore exactly the same values; they differ in cost. A [`CellStrategy::Trail`]
/// cell records at most one undo entry per checkpoint interval regardless of how often it is
/// written, at the price of keeping a watermark. A [`CellStrategy::Copy`] cell records on every
/// write, which is cheaper when a cell is written rarely compared to how often checkpoints are taken.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CellStrategy {
    #[default]
    Trail,
    Copy,
}

/// A handle to a reversible integer owned by a [`StateManager`](super::StateManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReversibleInt {
    id: u32,
}

impl StorageKey for ReversibleInt {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}

/// A handle to a reversible floating-point value owned by a
/// [`StateManager`](super::StateManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReversibleDouble {
    id: u32,
}

impl StorageKey for ReversibleDouble {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}

/// A handle to a reversible boolean; stored as a reversible integer which is either 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReversibleBool(pub(crate) ReversibleInt);

/// The storage behind a cell handle.
#[derive(Debug, Clone)]
pub(crate) struct CellEntry<Value> {
    pub(crate) value: Value,
    strategy: CellStrategy,
    /// The checkpoint during which the last undo record for this cell was pushed.
    last_recorded: Option<CheckpointId>,
}

impl<Value: Copy + PartialEq> CellEntry<Value> {
    pub(crate) fn new(value: Value, strategy: CellStrategy) -> Self {
        Self {
            value,
            strategy,
            last_recorded: None,
        }
    }

    /// Overwrites the value of the cell.
    ///
    /// Returns the previous value if an undo record has to be pushed for this write. Nothing is
    /// recorded at level 0 since that level can never be restored.
    pub(crate) fn overwrite(
        &mut self,
        value: Value,
        current_id: CheckpointId,
        level: usize,
    ) -> Option<Value> {
        let old_value = self.value;
        let should_record = level > 0
            && match self.strategy {
                CellStrategy::Trail => {
                    old_value != value && self.last_recorded != Some(current_id)
                }
                CellStrategy::Copy => true,
            };

        if should_record && self.strategy == CellStrategy::Trail {
            self.last_recorded = Some(current_id);
        }
        self.value = value;

        should_record.then_some(old_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_entry_records_once_per_checkpoint() {
        let mut entry = CellEntry::new(0_i64, CellStrategy::Trail);
        let id = CheckpointId::new(1);

        assert_eq!(Some(0), entry.overwrite(1, id, 1));
        assert_eq!(None, entry.overwrite(2, id, 1));
        assert_eq!(Some(2), entry.overwrite(3, CheckpointId::new(2), 2));
    }

    #[test]
    fn trail_entry_ignores_writes_of_the_same_value() {
        let mut entry = CellEntry::new(4_i64, CellStrategy::Trail);

        assert_eq!(None, entry.overwrite(4, CheckpointId::new(1), 1));
    }

    #[test]
    fn copy_entry_records_every_write() {
        let mut entry = CellEntry::new(0.5_f64, CellStrategy::Copy);
        let id = CheckpointId::new(1);

        assert_eq!(Some(0.5), entry.overwrite(0.5, id, 1));
        assert_eq!(Some(0.5), entry.overwrite(0.25, id, 1));
        assert_eq!(Some(0.25), entry.overwrite(0.0, id, 1));
    }

    #[test]
    fn nothing_is_recorded_at_the_root_level() {
        let mut entry = CellEntry::new(0_i64, CellStrategy::Copy);

        assert_eq!(None, entry.overwrite(1, CheckpointId::new(0), 0));
        assert_eq!(1, entry.value);
    }
}
