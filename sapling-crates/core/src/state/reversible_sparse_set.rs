use super::ReversibleInt;
use super::StateManager;
use crate::sapling_assert_moderate;
use crate::sapling_assert_simple;

/// A set of integers over a fixed universe `[min, max]` whose removals are undone on restore.
///
/// The members are kept in a permutation of the universe with the present values in front; only
/// the size and the bounds are stored in reversible cells. Restoring the size is sufficient to
/// restore membership, since removed values are swapped behind the present ones and a restore never
/// observes the order within either part.
#[derive(Debug, Clone)]
pub struct ReversibleSparseSet {
    /// A permutation of `0..universe_size`
    values: Vec<u32>,
    /// The position of every value in `values`
    indices: Vec<u32>,
    offset: i32,
    size: ReversibleInt,
    min: ReversibleInt,
    max: ReversibleInt,
}

impl ReversibleSparseSet {
    /// Creates the set `{min, ..., max}`.
    pub fn new(state: &mut StateManager, min: i32, max: i32) -> Self {
        sapling_assert_simple!(min <= max, "empty universe [{min}, {max}]");

        let universe_size = (i64::from(max) - i64::from(min) + 1) as u32;
        ReversibleSparseSet {
            values: (0..universe_size).collect(),
            indices: (0..universe_size).collect(),
            offset: min,
            size: state.make_reversible_int(i64::from(universe_size)),
            min: state.make_reversible_int(0),
            max: state.make_reversible_int(i64::from(universe_size) - 1),
        }
    }

    pub fn size(&self, state: &StateManager) -> usize {
        state.get_int(self.size) as usize
    }

    pub fn is_empty(&self, state: &StateManager) -> bool {
        self.size(state) == 0
    }

    /// The smallest member.
    ///
    /// # Panics
    /// If the set is empty.
    pub fn min(&self, state: &StateManager) -> i32 {
        sapling_assert_simple!(!self.is_empty(state), "the minimum of an empty set");
        state.get_int(self.min) as i32 + self.offset
    }

    /// The largest member.
    ///
    /// # Panics
    /// If the set is empty.
    pub fn max(&self, state: &StateManager) -> i32 {
        sapling_assert_simple!(!self.is_empty(state), "the maximum of an empty set");
        state.get_int(self.max) as i32 + self.offset
    }

    pub fn contains(&self, state: &StateManager, value: i32) -> bool {
        match self.relative(value) {
            Some(relative) => (self.indices[relative as usize] as usize) < self.size(state),
            None => false,
        }
    }

    /// The members in no particular order.
    pub fn iter<'a>(&'a self, state: &StateManager) -> impl Iterator<Item = i32> + 'a {
        let offset = self.offset;
        self.values[..self.size(state)]
            .iter()
            .map(move |&relative| relative as i32 + offset)
    }

    /// Removes `value`; returns whether it was a member.
    pub fn remove(&mut self, state: &mut StateManager, value: i32) -> bool {
        if !self.contains(state, value) {
            return false;
        }
        let relative = value - self.offset;
        let last = self.size(state) - 1;
        self.exchange(relative as u32, self.values[last]);
        let _ = state.decrement(self.size);

        self.update_bounds_after_removal(state, relative as i64);
        true
    }

    /// Removes every member except `value`.
    ///
    /// # Panics
    /// If `value` is not a member.
    pub fn remove_all_but(&mut self, state: &mut StateManager, value: i32) {
        sapling_assert_simple!(self.contains(state, value));

        let relative = (value - self.offset) as u32;
        self.exchange(relative, self.values[0]);
        let _ = state.set_int(self.size, 1);
        let _ = state.set_int(self.min, i64::from(relative));
        let _ = state.set_int(self.max, i64::from(relative));
    }

    pub fn remove_all(&mut self, state: &mut StateManager) {
        let _ = state.set_int(self.size, 0);
    }

    /// Removes every member smaller than `value`.
    pub fn remove_below(&mut self, state: &mut StateManager, value: i32) {
        if self.is_empty(state) || value <= self.min(state) {
            return;
        }
        if value > self.max(state) {
            self.remove_all(state);
            return;
        }
        for removed in self.min(state)..value {
            let _ = self.remove(state, removed);
        }
    }

    /// Removes every member larger than `value`.
    pub fn remove_above(&mut self, state: &mut StateManager, value: i32) {
        if self.is_empty(state) || value >= self.max(state) {
            return;
        }
        if value < self.min(state) {
            self.remove_all(state);
            return;
        }
        for removed in (value + 1)..=self.max(state) {
            let _ = self.remove(state, removed);
        }
    }

    fn relative(&self, value: i32) -> Option<u32> {
        let relative = i64::from(value) - i64::from(self.offset);
        (0..self.values.len() as i64)
            .contains(&relative)
            .then_some(relative as u32)
    }

    /// Swaps the positions of two relative values in the permutation.
    fn exchange(&mut self, first: u32, second: u32) {
        let first_index = self.indices[first as usize];
        let second_index = self.indices[second as usize];
        self.values[first_index as usize] = second;
        self.values[second_index as usize] = first;
        self.indices[first as usize] = second_index;
        self.indices[second as usize] = first_index;
    }

    fn update_bounds_after_removal(&mut self, state: &mut StateManager, removed: i64) {
        if self.is_empty(state) {
            return;
        }

        let contains_relative = |state: &StateManager, relative: i64| {
            (self.indices[relative as usize] as usize) < self.size(state)
        };

        if removed == state.get_int(self.min) {
            let mut new_min = removed + 1;
            while !contains_relative(state, new_min) {
                new_min += 1;
            }
            let _ = state.set_int(self.min, new_min);
        }
        if removed == state.get_int(self.max) {
            let mut new_max = removed - 1;
            while !contains_relative(state, new_max) {
                new_max -= 1;
            }
            let _ = state.set_int(self.max, new_max);
        }

        sapling_assert_moderate!(self.iter(state).all(|value| {
            self.min(state) <= value && value <= self.max(state)
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: &ReversibleSparseSet, state: &StateManager) -> Vec<i32> {
        let mut values = set.iter(state).collect::<Vec<_>>();
        values.sort();
        values
    }

    #[test]
    fn removal_updates_bounds() {
        let mut state = StateManager::default();
        let mut set = ReversibleSparseSet::new(&mut state, -2, 3);

        assert!(set.remove(&mut state, -2));
        assert!(set.remove(&mut state, 3));
        assert!(!set.remove(&mut state, 3));

        assert_eq!(-1, set.min(&state));
        assert_eq!(2, set.max(&state));
        assert_eq!(4, set.size(&state));
    }

    #[test]
    fn removals_are_undone_on_restore() {
        let mut state = StateManager::default();
        let mut set = ReversibleSparseSet::new(&mut state, 0, 9);

        let _ = state.checkpoint();
        let _ = set.remove(&mut state, 0);
        let _ = set.remove(&mut state, 5);
        let _ = state.checkpoint();
        set.remove_all_but(&mut state, 7);
        assert_eq!(vec![7], sorted(&set, &state));

        state.restore_to_checkpoint();
        assert_eq!(vec![1, 2, 3, 4, 6, 7, 8, 9], sorted(&set, &state));
        assert_eq!(1, set.min(&state));

        state.restore_to_checkpoint();
        assert_eq!((0..10).collect::<Vec<_>>(), sorted(&set, &state));
        assert_eq!(0, set.min(&state));
        assert_eq!(9, set.max(&state));
    }

    #[test]
    fn bound_removals() {
        let mut state = StateManager::default();
        let mut set = ReversibleSparseSet::new(&mut state, 1, 10);

        set.remove_below(&mut state, 4);
        set.remove_above(&mut state, 6);
        assert_eq!(vec![4, 5, 6], sorted(&set, &state));

        set.remove_above(&mut state, 0);
        assert!(set.is_empty(&state));
    }

    #[test]
    fn values_outside_the_universe_are_not_members() {
        let mut state = StateManager::default();
        let set = ReversibleSparseSet::new(&mut state, 1, 3);

        assert!(!set.contains(&state, 0));
        assert!(!set.contains(&state, 4));
        assert!(!set.contains(&state, i32::MIN));
    }
}
