//! Tie-breakers decide which candidate is selected when several candidates have the same value.
mod in_order_tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;

/// Whether the tie-breaker looks for the minimum or the maximum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

/// Considers candidates one at a time and selects the best one.
pub trait TieBreaker<Var, Value> {
    /// Considers the next candidate with its value.
    fn consider(&mut self, variable: Var, value: Value);

    /// Returns the selected candidate and resets the tie-breaker.
    fn select(&mut self) -> Option<Var>;
}
