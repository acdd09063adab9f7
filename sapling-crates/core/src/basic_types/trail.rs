use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::sapling_assert_simple;

/// A stack of undo records which is partitioned into checkpoint levels.
///
/// Records pushed after the `i`-th call to [`Trail::new_checkpoint`] belong to level `i`; level 0
/// holds the records pushed before any checkpoint was taken.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_level: usize,
    /// At index i is the position where the records of level i end (exclusive) on the trail
    level_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// Implemented by hand so that `T` is not required to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_level: Default::default(),
            level_delimiter: Default::default(),
            trail: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_level += 1;
        self.level_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_level
    }

    /// The records which were pushed while `level` was the active level.
    pub(crate) fn values_at_checkpoint(&self, level: usize) -> &[T] {
        assert!(level <= self.current_level);

        let start = if level == 0 {
            0
        } else {
            self.level_delimiter[level - 1]
        };

        let end = if level == self.current_level {
            self.trail.len()
        } else {
            self.level_delimiter[level]
        };

        &self.trail[start..end]
    }

    /// Removes every record pushed after `new_level` was the active level and returns them,
    /// most recent first.
    pub(crate) fn synchronise(&mut self, new_level: usize) -> Rev<Drain<'_, T>> {
        sapling_assert_simple!(
            new_level < self.current_level,
            "cannot restore to level {new_level} from level {}",
            self.current_level
        );

        let new_trail_len = self.level_delimiter[new_level];

        self.current_level = new_level;
        self.level_delimiter.truncate(new_level);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}
