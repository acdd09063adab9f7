use super::ReversibleDouble;
use super::ReversibleInt;

/// Restores one cell to the value it had when the record was pushed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum StateChange {
    Int {
        cell: ReversibleInt,
        old_value: i64,
    },
    Double {
        cell: ReversibleDouble,
        old_value: f64,
    },
}
